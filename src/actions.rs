use std::fmt;

use crate::types::{GestureCode, MAX_GESTURE_CODE};

/// Acciones que puede disparar un gesto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureAction {
    VolumeMin,
    VolumeMax,
    SlideBack,
    SlideNext,
}

/// Efecto externo que describe una acción; lo interpreta el ejecutor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// Fijar el nivel del mezclador de audio local (porcentaje)
    MixerLevel { percent: u8 },
    /// Enviar un token de control al host de presentaciones remoto
    Remote { token: &'static str },
}

impl GestureAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VolumeMin => "volume-min",
            Self::VolumeMax => "volume-max",
            Self::SlideBack => "slide-back",
            Self::SlideNext => "slide-next",
        }
    }

    /// Texto corto para el overlay y la tabla de comandos
    pub fn label(&self) -> &'static str {
        match self {
            Self::VolumeMin => "Volume 0%",
            Self::VolumeMax => "Volume 100%",
            Self::SlideBack => "Ctrl+Alt+b",
            Self::SlideNext => "Ctrl+Alt+n",
        }
    }

    pub fn effect(&self) -> ActionEffect {
        match self {
            Self::VolumeMin => ActionEffect::MixerLevel { percent: 0 },
            Self::VolumeMax => ActionEffect::MixerLevel { percent: 100 },
            Self::SlideBack => ActionEffect::Remote { token: "back" },
            Self::SlideNext => ActionEffect::Remote { token: "next" },
        }
    }
}

impl fmt::Display for GestureAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const TABLE_LEN: usize = MAX_GESTURE_CODE as usize + 1;

/// Tabla inmutable código de gesto → acción. Los códigos sin entrada no hacen nada.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionMapping {
    table: [Option<GestureAction>; TABLE_LEN],
}

impl ActionMapping {
    /// Mapeo del sistema: 1 baja el volumen, 2 lo sube, 3 retrocede y 4 avanza
    /// la presentación. 0 y 5 quedan libres.
    pub fn standard() -> Self {
        Self {
            table: [
                None,
                Some(GestureAction::VolumeMin),
                Some(GestureAction::VolumeMax),
                Some(GestureAction::SlideBack),
                Some(GestureAction::SlideNext),
                None,
            ],
        }
    }

    pub fn get(&self, code: GestureCode) -> Option<GestureAction> {
        self.table[code.value() as usize]
    }

    /// Entradas definidas en orden de código
    pub fn entries(&self) -> impl Iterator<Item = (GestureCode, GestureAction)> + '_ {
        GestureCode::all().filter_map(move |code| self.get(code).map(|action| (code, action)))
    }
}

impl Default for ActionMapping {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_mapping_has_four_entries() {
        let mapping = ActionMapping::standard();
        let codes: Vec<u8> = mapping.entries().map(|(c, _)| c.value()).collect();
        assert_eq!(codes, vec![1, 2, 3, 4]);
        assert_eq!(mapping.get(GestureCode::new(0).unwrap()), None);
        assert_eq!(mapping.get(GestureCode::new(5).unwrap()), None);
    }

    #[test]
    fn test_standard_mapping_targets() {
        let mapping = ActionMapping::standard();
        let get = |v| mapping.get(GestureCode::new(v).unwrap());
        assert_eq!(get(1), Some(GestureAction::VolumeMin));
        assert_eq!(get(2), Some(GestureAction::VolumeMax));
        assert_eq!(get(3), Some(GestureAction::SlideBack));
        assert_eq!(get(4), Some(GestureAction::SlideNext));
    }

    #[test]
    fn test_effects() {
        assert_eq!(
            GestureAction::VolumeMin.effect(),
            ActionEffect::MixerLevel { percent: 0 }
        );
        assert_eq!(
            GestureAction::VolumeMax.effect(),
            ActionEffect::MixerLevel { percent: 100 }
        );
        assert_eq!(
            GestureAction::SlideNext.effect(),
            ActionEffect::Remote { token: "next" }
        );
        assert_eq!(
            GestureAction::SlideBack.effect(),
            ActionEffect::Remote { token: "back" }
        );
    }
}
