use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Sender};
use thiserror::Error;

use crate::actions::{ActionEffect, GestureAction};
use crate::config::{MixerConfig, RemoteConfig};

#[derive(Error, Debug)]
pub enum ExecutorError {
    #[error("No se pudo lanzar {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} terminó con {status}")]
    Failed { program: String, status: ExitStatus },

    #[error("La acción {0} no está soportada por este ejecutor")]
    Unsupported(GestureAction),

    #[error("No se pudo iniciar el hilo ejecutor: {0}")]
    Worker(#[source] io::Error),

    #[cfg(feature = "hid")]
    #[error("Error HID: {0}")]
    Hid(#[from] uinput::Error),
}

/// Lado "fire-and-forget" que ve el despachador: no devuelve nada y no debe
/// bloquear el procesamiento de frames.
pub trait ActionExecutor {
    fn execute(&mut self, action: GestureAction);
}

impl<E: ActionExecutor + ?Sized> ActionExecutor for Box<E> {
    fn execute(&mut self, action: GestureAction) {
        (**self).execute(action)
    }
}

/// Ejecución real y bloqueante de una acción, con resultado observable.
/// La corre el hilo de `BackgroundExecutor`.
pub trait ActionRunner {
    fn run(&mut self, action: GestureAction) -> Result<(), ExecutorError>;
}

/// Ejecuta las acciones con procesos del sistema: `amixer` para el volumen y
/// `ssh` para los comandos de presentación
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    mixer: MixerConfig,
    remote: RemoteConfig,
}

impl SystemExecutor {
    pub fn new(mixer: MixerConfig, remote: RemoteConfig) -> Self {
        Self { mixer, remote }
    }

    /// Arma el comando para una acción sin lanzarlo
    pub fn command_for(&self, action: GestureAction) -> Command {
        match action.effect() {
            ActionEffect::MixerLevel { percent } => {
                let mut cmd = Command::new(&self.mixer.program);
                cmd.arg("sset")
                    .arg(&self.mixer.control)
                    .arg(format!("{}%", percent));
                cmd
            }
            ActionEffect::Remote { token } => {
                let mut cmd = Command::new(&self.remote.ssh_program);
                cmd.arg(self.remote.destination())
                    .arg(format!("{} {}", self.remote.program, token));
                cmd
            }
        }
    }
}

impl ActionRunner for SystemExecutor {
    fn run(&mut self, action: GestureAction) -> Result<(), ExecutorError> {
        let mut cmd = self.command_for(action);
        let program = cmd.get_program().to_string_lossy().into_owned();

        let status = cmd
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|source| ExecutorError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(ExecutorError::Failed { program, status });
        }
        Ok(())
    }
}

/// Envía las acciones por canal a un hilo dedicado que las ejecuta con un
/// `ActionRunner`. El resultado solo se registra en el log.
pub struct BackgroundExecutor {
    tx: Option<Sender<GestureAction>>,
    worker: Option<JoinHandle<()>>,
}

impl BackgroundExecutor {
    pub fn spawn<R>(mut runner: R) -> Result<Self, ExecutorError>
    where
        R: ActionRunner + Send + 'static,
    {
        let (tx, rx) = unbounded::<GestureAction>();

        let worker = thread::Builder::new()
            .name("action-executor".to_string())
            .spawn(move || {
                while let Ok(action) = rx.recv() {
                    log::debug!("Ejecutando acción {}", action);
                    match runner.run(action) {
                        Ok(()) => log::info!("Acción {} completada", action),
                        Err(e) => log::error!("Acción {} falló: {}", action, e),
                    }
                }
                log::debug!("Hilo ejecutor terminado");
            })
            .map_err(ExecutorError::Worker)?;

        Ok(Self {
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    /// Cierra el canal y espera a que terminen las acciones pendientes
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        self.tx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("El hilo ejecutor terminó con pánico");
            }
        }
    }
}

impl ActionExecutor for BackgroundExecutor {
    fn execute(&mut self, action: GestureAction) {
        let sent = self.tx.as_ref().map(|tx| tx.send(action).is_ok());
        if sent != Some(true) {
            log::warn!("Hilo ejecutor no disponible, se descarta {}", action);
        }
    }
}

impl Drop for BackgroundExecutor {
    fn drop(&mut self) {
        self.stop();
    }
}

/// No ejecuta nada: solo registra la acción (para `--dry-run` y replays)
#[derive(Debug, Default)]
pub struct DryRunExecutor {
    executed: usize,
}

impl DryRunExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executed(&self) -> usize {
        self.executed
    }
}

impl ActionExecutor for DryRunExecutor {
    fn execute(&mut self, action: GestureAction) {
        self.executed += 1;
        log::info!("[dry-run] {} ({})", action, action.label());
    }
}

/// Ejecutor falso que guarda las invocaciones en orden
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Vec<GestureAction>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[GestureAction] {
        &self.calls
    }
}

impl ActionExecutor for RecordingExecutor {
    fn execute(&mut self, action: GestureAction) {
        self.calls.push(action);
    }
}
