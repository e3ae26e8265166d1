use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use csv::{ReaderBuilder, Writer};

use crate::types::{HandObservation, LandmarkPoint, NUM_LANDMARKS};

pub const CSV_HEADER: [&str; 4] = ["frame", "landmark", "x", "y"];

/// Tope de frames de una grabación (más de 3 días a 30 fps)
pub const MAX_RECORDING_FRAMES: usize = 10_000_000;

/// Carga una grabación de landmarks en formato frame,landmark,x,y (píxeles).
///
/// Devuelve un elemento por frame desde 0 hasta el último número de frame; los
/// frames sin filas, o con una fila marcador `frame,,,`, quedan como `None`
/// (sin mano). Los landmarks de cada frame se ordenan por índice, pero no se
/// completan: un frame con puntos faltantes lo rechazará el extractor.
pub fn load_recording(path: impl AsRef<Path>) -> Result<Vec<Option<HandObservation>>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("No se pudo abrir el CSV {:?}", path))?;

    let mut frames: BTreeMap<usize, Vec<LandmarkPoint>> = BTreeMap::new();

    for (row_idx, result) in reader.records().enumerate() {
        let row = row_idx + 1;
        let record = result.with_context(|| format!("Fila {} inválida en {:?}", row, path))?;
        if record.len() < CSV_HEADER.len() {
            bail!("La fila {} no tiene {} columnas", row, CSV_HEADER.len());
        }

        let frame: usize = record[0]
            .trim()
            .parse()
            .with_context(|| format!("frame inválido en fila {}", row))?;
        ensure!(
            frame < MAX_RECORDING_FRAMES,
            "Frame {} fuera de rango (fila {}, máximo {})",
            frame,
            row,
            MAX_RECORDING_FRAMES - 1
        );

        let points = frames.entry(frame).or_default();
        if record[1].trim().is_empty() {
            // Marcador de frame sin mano
            continue;
        }

        let landmark: usize = record[1]
            .trim()
            .parse()
            .with_context(|| format!("landmark inválido en fila {}", row))?;
        ensure!(
            landmark < NUM_LANDMARKS,
            "Landmark {} fuera de rango (fila {})",
            landmark,
            row
        );

        let x: f32 = record[2]
            .trim()
            .parse()
            .with_context(|| format!("x inválido en fila {}", row))?;
        let y: f32 = record[3]
            .trim()
            .parse()
            .with_context(|| format!("y inválido en fila {}", row))?;

        points.push(LandmarkPoint::new(landmark, x, y));
    }

    let Some(&last_frame) = frames.keys().next_back() else {
        bail!("El CSV {:?} no contiene datos", path);
    };

    let mut out = Vec::with_capacity(frames.len());
    for frame_idx in 0..=last_frame {
        let observation = match frames.remove(&frame_idx) {
            Some(mut points) if !points.is_empty() => {
                points.sort_by_key(|p| p.index);
                Some(HandObservation::new(points))
            }
            _ => None,
        };
        out.push(observation);
    }

    Ok(out)
}

/// Escritor incremental de grabaciones: cada frame se escribe y se vuelca al
/// disco en cuanto llega, así una sesión cortada con Ctrl+C conserva lo grabado.
///
/// Los frames sin mano se escriben como una fila marcador `frame,,,` para que
/// la grabación conserve el número exacto de frames.
pub struct RecordingWriter<W: Write> {
    writer: Writer<W>,
    next_frame: usize,
}

impl RecordingWriter<File> {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let writer =
            Writer::from_path(path).with_context(|| format!("No se pudo crear {:?}", path))?;
        Self::with_writer(writer)
    }
}

impl<W: Write> RecordingWriter<W> {
    pub fn from_writer(inner: W) -> Result<Self> {
        Self::with_writer(Writer::from_writer(inner))
    }

    fn with_writer(mut writer: Writer<W>) -> Result<Self> {
        writer.write_record(CSV_HEADER)?;
        writer.flush()?;
        Ok(Self {
            writer,
            next_frame: 0,
        })
    }

    /// Añade el siguiente frame y lo vuelca
    pub fn write_frame(&mut self, observation: Option<&HandObservation>) -> Result<()> {
        let frame = self.next_frame.to_string();

        match observation {
            Some(observation) if !observation.is_empty() => {
                for point in observation.points() {
                    self.writer.write_record(&[
                        frame.clone(),
                        point.index.to_string(),
                        point.x.to_string(),
                        point.y.to_string(),
                    ])?;
                }
            }
            _ => self.writer.write_record(&[frame.as_str(), "", "", ""])?,
        }

        self.writer
            .flush()
            .with_context(|| format!("No se pudo volcar el frame {}", self.next_frame))?;
        self.next_frame += 1;
        Ok(())
    }

    /// Frames escritos hasta ahora
    pub fn frames(&self) -> usize {
        self.next_frame
    }

    /// Cierra la grabación devolviendo el número de frames y el destino
    pub fn finish(mut self) -> Result<(usize, W)> {
        self.writer.flush()?;
        let frames = self.next_frame;
        let inner = self
            .writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("No se pudo cerrar la grabación: {}", e.error()))?;
        Ok((frames, inner))
    }
}

/// Escribe una grabación completa en el mismo formato que lee `load_recording`
pub fn save_recording(path: impl AsRef<Path>, frames: &[Option<HandObservation>]) -> Result<()> {
    let mut writer = RecordingWriter::create(path)?;
    for observation in frames {
        writer.write_frame(observation.as_ref())?;
    }
    writer.finish()?;
    Ok(())
}
