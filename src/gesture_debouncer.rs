use crate::types::GestureCode;

/// Estados de la máquina antirrebote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DebounceState {
    /// Sin mano en el último frame procesado (o inicio de sesión)
    #[default]
    NoHand,
    /// Siguiendo un gesto ya despachado
    Tracking(GestureCode),
}

/// Antirrebote por flanco: emite un evento solo cuando el gesto cambia.
///
/// Mientras se mantiene el mismo gesto no se vuelve a disparar nada. Un frame sin
/// mano limpia el estado, así que el mismo gesto presentado de nuevo vuelve a
/// contar como transición.
#[derive(Debug, Default)]
pub struct GestureDebouncer {
    state: DebounceState,
}

impl GestureDebouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Alimenta el resultado de un frame (`None` = sin mano).
    /// Retorna el gesto a despachar si hubo transición.
    pub fn observe(&mut self, gesture: Option<GestureCode>) -> Option<GestureCode> {
        match (self.state, gesture) {
            (_, None) => {
                self.state = DebounceState::NoHand;
                None
            }
            (DebounceState::Tracking(last), Some(current)) if last == current => None,
            (_, Some(current)) => {
                self.state = DebounceState::Tracking(current);
                Some(current)
            }
        }
    }

    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Último gesto registrado, `None` si no hay mano
    pub fn last_gesture(&self) -> Option<GestureCode> {
        match self.state {
            DebounceState::NoHand => None,
            DebounceState::Tracking(code) => Some(code),
        }
    }

    pub fn reset(&mut self) {
        self.state = DebounceState::NoHand;
    }
}
