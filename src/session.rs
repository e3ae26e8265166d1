use crate::actions::{ActionMapping, GestureAction};
use crate::dispatcher::CommandDispatcher;
use crate::executor::ActionExecutor;
use crate::finger_extractor::{extract_fingers, ExtractError, FingerReading};
use crate::gesture_debouncer::{DebounceState, GestureDebouncer};
use crate::gesture_reducer::reduce;
use crate::types::{FingerStates, GestureCode, HandObservation};

/// Instantánea de un frame procesado, de solo lectura para el overlay
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub reading: Option<FingerReading>,
    pub gesture: Option<GestureCode>,
    /// Gesto que produjo evento de despacho en este frame
    pub transition: Option<GestureCode>,
    pub dispatched: Option<GestureAction>,
    /// Motivo de rechazo si la observación venía malformada
    pub rejected: Option<ExtractError>,
}

impl FrameReport {
    pub fn states(&self) -> Option<FingerStates> {
        self.reading.map(|r| r.states)
    }

    pub fn has_hand(&self) -> bool {
        self.gesture.is_some()
    }
}

/// Contadores de la sesión
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub frames: u64,
    pub hand_frames: u64,
    pub rejected_frames: u64,
    pub transitions: u64,
    pub dispatches: u64,
}

/// Una sesión de video: procesa un frame a la vez y es la única dueña del
/// estado antirrebote.
pub struct GestureSession<E> {
    debouncer: GestureDebouncer,
    dispatcher: CommandDispatcher<E>,
    stats: SessionStats,
}

impl<E: ActionExecutor> GestureSession<E> {
    pub fn new(mapping: ActionMapping, executor: E) -> Self {
        Self {
            debouncer: GestureDebouncer::new(),
            dispatcher: CommandDispatcher::new(mapping, executor),
            stats: SessionStats::default(),
        }
    }

    /// Procesa el resultado del detector para un frame (`None` = sin mano o sin frame)
    pub fn process(&mut self, observation: Option<&HandObservation>) -> FrameReport {
        self.stats.frames += 1;
        let mut report = FrameReport::default();

        if let Some(observation) = observation {
            match extract_fingers(observation) {
                Ok(reading) => {
                    report.reading = Some(reading);
                    report.gesture = Some(reduce(&reading.states));
                }
                Err(e) => {
                    // Frame descartado: cuenta como frame sin mano
                    log::warn!("Frame {} descartado: {}", self.stats.frames, e);
                    self.stats.rejected_frames += 1;
                    report.rejected = Some(e);
                }
            }
        }

        if let Some(gesture) = report.gesture {
            self.stats.hand_frames += 1;
            log::trace!(
                "Fingers Up: {}, Fingers Down: {}",
                gesture.value(),
                gesture.folded()
            );
        }

        report.transition = self.debouncer.observe(report.gesture);
        if let Some(gesture) = report.transition {
            self.stats.transitions += 1;
            report.dispatched = self.dispatcher.dispatch(gesture);
            if report.dispatched.is_some() {
                self.stats.dispatches += 1;
            }
        }

        report
    }

    pub fn debounce_state(&self) -> DebounceState {
        self.debouncer.state()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn mapping(&self) -> &ActionMapping {
        self.dispatcher.mapping()
    }

    pub fn executor(&self) -> &E {
        self.dispatcher.executor()
    }

    /// Termina la sesión: el estado antirrebote se descarta y se devuelve el ejecutor
    pub fn finish(self) -> (SessionStats, E) {
        log::info!(
            "Sesión terminada: {} frames, {} con mano, {} descartados, {} despachos",
            self.stats.frames,
            self.stats.hand_frames,
            self.stats.rejected_frames,
            self.stats.dispatches
        );
        (self.stats, self.dispatcher.into_executor())
    }
}
