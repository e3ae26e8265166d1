use serde::Serialize;

use crate::session::FrameReport;

pub const GREEN: [u8; 3] = [0, 255, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const GRAY: [u8; 3] = [160, 160, 160];

/// Una línea de texto a dibujar sobre el frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOverlay {
    pub text: String,
    /// Esquina inferior izquierda del texto, en píxeles
    pub origin: (i32, i32),
    pub scale: f32,
    /// RGB
    pub color: [u8; 3],
}

impl TextOverlay {
    fn new(text: String, origin: (i32, i32), scale: f32, color: [u8; 3]) -> Self {
        Self {
            text,
            origin,
            scale,
            color,
        }
    }
}

/// Construye las etiquetas de un frame. No dibuja: la capa de presentación
/// decide cómo pintar cada `TextOverlay`.
pub fn annotate(report: &FrameReport) -> Vec<TextOverlay> {
    let mut overlays = Vec::new();

    let (Some(gesture), Some(reading)) = (report.gesture, report.reading) else {
        return overlays;
    };

    overlays.push(TextOverlay::new(
        format!("Up: {}, Down: {}", gesture.value(), gesture.folded()),
        (10, 30),
        1.0,
        GREEN,
    ));

    let fingers: String = reading
        .states
        .iter()
        .map(|(finger, up)| if up { finger.initial() } else { '-' })
        .collect();
    overlays.push(TextOverlay::new(
        format!("{} [{}]", fingers, reading.handedness.as_str()),
        (10, 110),
        0.6,
        GRAY,
    ));

    if let Some(action) = report.dispatched {
        overlays.push(TextOverlay::new(
            format!("Command: {}", action.label()),
            (10, 70),
            0.7,
            RED,
        ));
    }

    overlays
}
