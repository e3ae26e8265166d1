use std::io::BufRead;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::config::FrameConfig;
use crate::types::HandObservation;

/// Detector de landmarks: dado un frame devuelve cero o una mano.
/// El modelo en sí queda fuera de este crate.
pub trait LandmarkProvider {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame) -> Option<HandObservation>;
}

/// Punto tal como lo emite el detector externo: `[x, y]`, `[x, y, z]` o
/// `{"x": .., "y": ..}`. Coordenadas normalizadas a [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPoint {
    Pair([f32; 2]),
    Triple([f32; 3]),
    Object { x: f32, y: f32 },
}

impl RawPoint {
    fn xy(&self) -> (f32, f32) {
        match *self {
            RawPoint::Pair([x, y]) => (x, y),
            RawPoint::Triple([x, y, _]) => (x, y),
            RawPoint::Object { x, y } => (x, y),
        }
    }
}

/// Un registro por línea del detector externo. `landmarks` ausente o `null`
/// significa que no se detectó mano.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LandmarkFrame {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub landmarks: Option<Vec<RawPoint>>,
}

/// Escala landmarks normalizados a píxeles del frame, truncando como una
/// conversión a entero
#[derive(Debug, Clone)]
pub struct ScaledLandmarkProvider {
    width: u32,
    height: u32,
}

impl ScaledLandmarkProvider {
    pub fn new(frame: &FrameConfig) -> Self {
        Self {
            width: frame.width,
            height: frame.height,
        }
    }
}

impl LandmarkProvider for ScaledLandmarkProvider {
    type Frame = LandmarkFrame;

    fn detect(&mut self, frame: &LandmarkFrame) -> Option<HandObservation> {
        let landmarks = frame.landmarks.as_ref()?;
        let w = frame.width.unwrap_or(self.width) as f32;
        let h = frame.height.unwrap_or(self.height) as f32;

        Some(HandObservation::from_pixels(landmarks.iter().map(|p| {
            let (x, y) = p.xy();
            ((x * w).trunc(), (y * h).trunc())
        })))
    }
}

/// Lee registros JSON, uno por línea.
///
/// Cada elemento es `Ok(Some(frame))` si la línea se pudo decodificar y
/// `Ok(None)` si no (ese ciclo cuenta como frame sin mano, también si la línea
/// no es UTF-8). Solo un error de lectura termina la secuencia.
pub struct FrameReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_no: usize,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_no: 0,
        }
    }
}

impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Option<LandmarkFrame>>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            let read = self
                .reader
                .read_until(b'\n', &mut self.buf)
                .with_context(|| format!("Error leyendo línea {}", self.line_no + 1));
            match read {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => return Some(Err(e)),
            }

            let line = match std::str::from_utf8(&self.buf) {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Línea {} no es UTF-8, se trata como sin mano: {}", self.line_no, e);
                    return Some(Ok(None));
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            return match serde_json::from_str::<LandmarkFrame>(trimmed) {
                Ok(frame) => Some(Ok(Some(frame))),
                Err(e) => {
                    log::warn!("Línea {} ilegible, se trata como sin mano: {}", self.line_no, e);
                    Some(Ok(None))
                }
            };
        }
    }
}
