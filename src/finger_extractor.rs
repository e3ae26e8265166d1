use crate::types::landmarks::*;
use crate::types::{FingerStates, HandObservation, Handedness, LandmarkPoint, NUM_FINGERS, NUM_LANDMARKS};
use thiserror::Error;

/// Pares (punta, articulación media) de índice, medio, anular y meñique
const TIP_PIP_PAIRS: [(usize, usize); NUM_FINGERS - 1] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractError {
    #[error("Observación malformada: se esperaban {expected} landmarks, llegaron {actual}")]
    WrongLandmarkCount { expected: usize, actual: usize },

    #[error("Observación malformada: posición {position} trae el landmark {found}")]
    MissingLandmark { position: usize, found: usize },

    #[error("Observación malformada: landmark {index} con coordenadas no finitas")]
    NonFiniteLandmark { index: usize },
}

/// Resultado del extractor para un frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerReading {
    pub handedness: Handedness,
    pub states: FingerStates,
}

/// Convierte una observación de 21 landmarks en el vector de dedos extendidos.
///
/// Un frame incompleto es un error: no se intenta adivinar el estado de los dedos.
pub fn extract_fingers(observation: &HandObservation) -> Result<FingerReading, ExtractError> {
    let points = validate(observation)?;

    let handedness = handedness_of(points);
    let mut states = [false; NUM_FINGERS];
    states[0] = thumb_extended(points, handedness);

    for (slot, &(tip, pip)) in states[1..].iter_mut().zip(TIP_PIP_PAIRS.iter()) {
        // y crece hacia abajo: la punta por encima de la articulación => extendido
        *slot = points[tip].y < points[pip].y;
    }

    Ok(FingerReading {
        handedness,
        states: FingerStates::new(states),
    })
}

/// Heurística de lateralidad: base del índice a la izquierda de la muñeca => derecha.
/// No corrige el espejado de la cámara.
pub fn classify_handedness(observation: &HandObservation) -> Result<Handedness, ExtractError> {
    validate(observation).map(handedness_of)
}

/// Requiere puntos ya validados
fn handedness_of(points: &[LandmarkPoint]) -> Handedness {
    if points[INDEX_MCP].x < points[WRIST].x {
        Handedness::Right
    } else {
        Handedness::Left
    }
}

/// El pulgar se extiende hacia el costado, así que se compara en x
fn thumb_extended(points: &[LandmarkPoint], handedness: Handedness) -> bool {
    let tip = points[THUMB_TIP].x;
    let ip = points[THUMB_IP].x;
    match handedness {
        Handedness::Right => tip < ip,
        Handedness::Left => tip > ip,
    }
}

fn validate(observation: &HandObservation) -> Result<&[LandmarkPoint], ExtractError> {
    let points = observation.points();
    if points.len() != NUM_LANDMARKS {
        return Err(ExtractError::WrongLandmarkCount {
            expected: NUM_LANDMARKS,
            actual: points.len(),
        });
    }

    for (position, point) in points.iter().enumerate() {
        if point.index != position {
            return Err(ExtractError::MissingLandmark {
                position,
                found: point.index,
            });
        }
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(ExtractError::NonFiniteLandmark { index: position });
        }
    }

    Ok(points)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Mano derecha en reposo: muñeca abajo al centro, todos los dedos flexionados
    /// (punta por debajo de la articulación) y el pulgar recogido
    pub(crate) fn fist_right() -> Vec<(f32, f32)> {
        let mut pts = vec![(0.0f32, 0.0f32); NUM_LANDMARKS];
        pts[WRIST] = (320.0, 400.0);
        pts[1] = (290.0, 380.0);
        pts[2] = (270.0, 360.0);
        pts[THUMB_IP] = (260.0, 340.0);
        pts[THUMB_TIP] = (275.0, 330.0);
        pts[INDEX_MCP] = (300.0, 300.0);
        pts[9] = (320.0, 295.0);
        pts[13] = (340.0, 300.0);
        pts[17] = (360.0, 310.0);
        for &(tip, pip) in TIP_PIP_PAIRS.iter() {
            let base_x = pts[tip - 3].0;
            pts[pip] = (base_x, 260.0);
            pts[pip + 1] = (base_x, 270.0);
            pts[tip] = (base_x, 280.0);
        }
        pts
    }

    pub(crate) fn raise(pts: &mut [(f32, f32)], tip: usize, pip: usize) {
        pts[tip].1 = pts[pip].1 - 40.0;
    }

    fn obs(pts: &[(f32, f32)]) -> HandObservation {
        HandObservation::from_pixels(pts.iter().copied())
    }

    /// Refleja horizontalmente una mano para obtener la contraria
    fn mirror(pts: &[(f32, f32)]) -> Vec<(f32, f32)> {
        pts.iter().map(|&(x, y)| (640.0 - x, y)).collect()
    }

    #[test]
    fn test_fist_has_no_extended_fingers() {
        let reading = extract_fingers(&obs(&fist_right())).unwrap();
        assert_eq!(reading.handedness, Handedness::Right);
        assert_eq!(reading.states.as_array(), [false; 5]);
    }

    #[test]
    fn test_four_fingers_thumb_folded() {
        let mut pts = fist_right();
        for &(tip, pip) in TIP_PIP_PAIRS.iter() {
            raise(&mut pts, tip, pip);
        }
        let reading = extract_fingers(&obs(&pts)).unwrap();
        assert_eq!(reading.states.as_array(), [false, true, true, true, true]);
    }

    #[test]
    fn test_right_thumb_extended_when_tip_left_of_joint() {
        let mut pts = fist_right();
        pts[THUMB_TIP].0 = pts[THUMB_IP].0 - 25.0;
        let reading = extract_fingers(&obs(&pts)).unwrap();
        assert_eq!(reading.handedness, Handedness::Right);
        assert!(reading.states.as_array()[0]);
    }

    #[test]
    fn test_left_thumb_mirrors_right() {
        let mut pts = fist_right();
        pts[THUMB_TIP].0 = pts[THUMB_IP].0 - 25.0;
        let left = mirror(&pts);

        let reading = extract_fingers(&obs(&left)).unwrap();
        assert_eq!(reading.handedness, Handedness::Left);
        assert!(reading.states.as_array()[0]);

        // El pulgar recogido de la mano izquierda sigue contando como flexionado
        let reading = extract_fingers(&obs(&mirror(&fist_right()))).unwrap();
        assert_eq!(reading.handedness, Handedness::Left);
        assert!(!reading.states.as_array()[0]);
    }

    #[test]
    fn test_index_base_level_with_wrist_is_left() {
        let mut pts = fist_right();
        pts[INDEX_MCP].0 = pts[WRIST].0;
        assert_eq!(classify_handedness(&obs(&pts)), Ok(Handedness::Left));
    }

    #[test]
    fn test_handedness_of_short_observation_is_error() {
        let pts: Vec<(f32, f32)> = fist_right().into_iter().take(3).collect();
        assert_eq!(
            classify_handedness(&obs(&pts)),
            Err(ExtractError::WrongLandmarkCount {
                expected: 21,
                actual: 3
            })
        );
    }

    #[test]
    fn test_ties_are_not_extended() {
        let mut pts = fist_right();
        pts[INDEX_TIP].1 = pts[INDEX_PIP].1;
        pts[THUMB_TIP].0 = pts[THUMB_IP].0;
        let reading = extract_fingers(&obs(&pts)).unwrap();
        assert!(!reading.states.as_array()[0]);
        assert!(!reading.states.as_array()[1]);
    }

    #[test]
    fn test_twenty_landmarks_rejected() {
        let mut pts = fist_right();
        pts.pop();
        let err = extract_fingers(&obs(&pts)).unwrap_err();
        assert_eq!(
            err,
            ExtractError::WrongLandmarkCount {
                expected: 21,
                actual: 20
            }
        );
    }

    #[test]
    fn test_out_of_order_index_rejected() {
        let mut points: Vec<LandmarkPoint> = obs(&fist_right()).points().to_vec();
        points.swap(6, 7);
        let err = extract_fingers(&HandObservation::new(points)).unwrap_err();
        assert!(matches!(err, ExtractError::MissingLandmark { position: 6, found: 7 }));
    }

    #[test]
    fn test_nan_coordinate_rejected() {
        let mut pts = fist_right();
        pts[12].1 = f32::NAN;
        let err = extract_fingers(&obs(&pts)).unwrap_err();
        assert_eq!(err, ExtractError::NonFiniteLandmark { index: 12 });
    }
}
