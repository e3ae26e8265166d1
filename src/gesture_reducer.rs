use crate::types::{FingerStates, GestureCode};

/// Reduce el vector de dedos al código de gesto: cuántos dedos están extendidos.
/// No importa cuáles; dos formas de mano con la misma cuenta dan el mismo código.
pub fn reduce(states: &FingerStates) -> GestureCode {
    let count = states.as_array().iter().filter(|&&up| up).count();
    // El vector tiene tamaño fijo 5, la cuenta nunca pasa de MAX_GESTURE_CODE
    GestureCode::new(count as u8).unwrap_or_else(|err| unreachable!("{err}"))
}
