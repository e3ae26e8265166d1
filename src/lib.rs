//! Conteo de dedos a partir de landmarks de mano y disparo de comandos por
//! transición de gesto.
//!
//! Flujo por frame: proveedor de landmarks → extractor de dedos → reductor →
//! antirrebote → despachador. El overlay consume el mismo `FrameReport`.

pub mod actions;
pub mod annotator;
pub mod config;
pub mod dispatcher;
pub mod executor;
pub mod finger_extractor;
pub mod gesture_debouncer;
pub mod gesture_reducer;
#[cfg(feature = "hid")]
pub mod hid;
pub mod landmark_csv;
pub mod provider;
pub mod session;
pub mod types;
