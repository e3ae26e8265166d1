use std::fmt;

use thiserror::Error;

/// Número de landmarks que entrega el modelo de mano (convención MediaPipe)
pub const NUM_LANDMARKS: usize = 21;

/// Número de dedos por mano: [pulgar, índice, medio, anular, meñique]
pub const NUM_FINGERS: usize = 5;

/// Código de gesto máximo (los 5 dedos extendidos)
pub const MAX_GESTURE_CODE: u8 = NUM_FINGERS as u8;

/// Índices anatómicos de los landmarks de la mano
pub mod landmarks {
    pub const WRIST: usize = 0;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_MCP: usize = 5;
    pub const INDEX_PIP: usize = 6;
    pub const INDEX_TIP: usize = 8;
    pub const MIDDLE_PIP: usize = 10;
    pub const MIDDLE_TIP: usize = 12;
    pub const RING_PIP: usize = 14;
    pub const RING_TIP: usize = 16;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_TIP: usize = 20;
}

/// Un landmark en coordenadas de píxel del frame actual (y crece hacia abajo)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkPoint {
    pub index: usize,
    pub x: f32,
    pub y: f32,
}

impl LandmarkPoint {
    pub fn new(index: usize, x: f32, y: f32) -> Self {
        Self { index, x, y }
    }
}

/// Observación de una mano en un solo frame.
///
/// El proveedor de landmarks promete 21 puntos en orden anatómico, pero la
/// observación guarda lo que llegó tal cual: la validación la hace el extractor
/// de dedos, que rechaza el frame si falta o sobra algún punto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandObservation {
    points: Vec<LandmarkPoint>,
}

impl HandObservation {
    pub fn new(points: Vec<LandmarkPoint>) -> Self {
        Self { points }
    }

    /// Construye una observación a partir de pares (x, y) ya en píxeles,
    /// asignando los índices por posición
    pub fn from_pixels<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        let points = coords
            .into_iter()
            .enumerate()
            .map(|(index, (x, y))| LandmarkPoint::new(index, x, y))
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[LandmarkPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Lateralidad estimada de la mano (solo sirve para interpretar el pulgar)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "izquierda",
            Self::Right => "derecha",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    /// Orden fijo del vector de estados
    pub const ALL: [Finger; NUM_FINGERS] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Letra corta para el overlay
    pub fn initial(&self) -> char {
        match self {
            Self::Thumb => 'P',
            Self::Index => 'I',
            Self::Middle => 'M',
            Self::Ring => 'A',
            Self::Pinky => 'm',
        }
    }
}

/// Vector de estados por dedo: true si el dedo está extendido
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates([bool; NUM_FINGERS]);

impl FingerStates {
    pub fn new(states: [bool; NUM_FINGERS]) -> Self {
        Self(states)
    }

    pub fn is_extended(&self, finger: Finger) -> bool {
        self.0[finger as usize]
    }

    pub fn as_array(&self) -> [bool; NUM_FINGERS] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Finger, bool)> + '_ {
        Finger::ALL.iter().copied().zip(self.0.iter().copied())
    }
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Código de gesto fuera de rango: {0} (máximo 5)")]
pub struct GestureCodeError(pub u8);

/// Número de dedos extendidos en un frame, siempre en [0, 5]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureCode(u8);

impl GestureCode {
    pub fn new(value: u8) -> Result<Self, GestureCodeError> {
        if value > MAX_GESTURE_CODE {
            return Err(GestureCodeError(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Dedos flexionados (el complemento de `value`)
    pub fn folded(&self) -> u8 {
        MAX_GESTURE_CODE - self.0
    }

    /// Todos los códigos válidos en orden ascendente
    pub fn all() -> impl Iterator<Item = GestureCode> {
        (0..=MAX_GESTURE_CODE).map(GestureCode)
    }
}

impl TryFrom<u8> for GestureCode {
    type Error = GestureCodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for GestureCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_code_range() {
        for v in 0..=5u8 {
            assert_eq!(GestureCode::new(v).unwrap().value(), v);
        }
        assert_eq!(GestureCode::new(6), Err(GestureCodeError(6)));
        assert_eq!(GestureCode::all().count(), 6);
    }

    #[test]
    fn test_folded_complement() {
        let code = GestureCode::new(4).unwrap();
        assert_eq!(code.folded(), 1);
    }

    #[test]
    fn test_from_pixels_assigns_indices() {
        let obs = HandObservation::from_pixels((0..21).map(|i| (i as f32, 0.0)));
        assert_eq!(obs.len(), NUM_LANDMARKS);
        for (i, p) in obs.points().iter().enumerate() {
            assert_eq!(p.index, i);
        }
    }

    #[test]
    fn test_finger_states_order() {
        let states = FingerStates::new([true, false, false, false, true]);
        assert!(states.is_extended(Finger::Thumb));
        assert!(states.is_extended(Finger::Pinky));
        assert!(!states.is_extended(Finger::Middle));
        let order: Vec<Finger> = states.iter().map(|(f, _)| f).collect();
        assert_eq!(order, Finger::ALL.to_vec());
    }
}
