use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuración del daemon, leída desde JSON. Los campos ausentes toman el valor
/// por defecto gracias a `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub frame: FrameConfig,
    pub mixer: MixerConfig,
    pub remote: RemoteConfig,
    pub executor: ExecutorConfig,
}

/// Tamaño del frame para escalar coordenadas normalizadas a píxeles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixerConfig {
    pub program: String,
    pub control: String,
}

/// Host de presentaciones al que se envían "next"/"back" por ssh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub ssh_program: String,
    pub user: String,
    pub host: String,
    /// Comando a ejecutar en el host remoto; el token se añade al final
    pub program: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExecutorKind {
    /// amixer + ssh reales
    System,
    /// Solo registra las acciones
    DryRun,
    /// Teclado virtual por /dev/uinput (feature `hid`)
    Hid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    pub kind: ExecutorKind,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

impl Default for MixerConfig {
    fn default() -> Self {
        Self {
            program: "amixer".to_string(),
            control: "Master".to_string(),
        }
    }
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            ssh_program: "ssh".to_string(),
            user: "presenter".to_string(),
            host: "presenter.local".to_string(),
            program: "python remote_control.py".to_string(),
        }
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            kind: ExecutorKind::System,
        }
    }
}

impl RemoteConfig {
    /// Destino ssh en formato user@host
    pub fn destination(&self) -> String {
        if self.user.is_empty() {
            self.host.clone()
        } else {
            format!("{}@{}", self.user, self.host)
        }
    }
}

impl AppConfig {
    pub const DEFAULT_PATH: &'static str = "quirodedos.json";

    /// Carga la configuración; si el archivo no existe se usan los valores por defecto
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "No existe {}, usando configuración por defecto",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("No se pudo leer la configuración {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("Configuración inválida en {}", path.display()))?;
        log::info!("Configuración cargada desde {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("No se pudo escribir {}", path.display()))?;
        Ok(())
    }
}
