use crate::actions::{ActionMapping, GestureAction};
use crate::executor::ActionExecutor;
use crate::types::GestureCode;

/// Traduce eventos de gesto a acciones y se las pasa al ejecutor, una vez por evento
pub struct CommandDispatcher<E> {
    mapping: ActionMapping,
    executor: E,
}

impl<E: ActionExecutor> CommandDispatcher<E> {
    pub fn new(mapping: ActionMapping, executor: E) -> Self {
        Self { mapping, executor }
    }

    /// Despacha el evento de un gesto. Un código sin acción asignada no es un
    /// error: simplemente no se ejecuta nada.
    pub fn dispatch(&mut self, gesture: GestureCode) -> Option<GestureAction> {
        let Some(action) = self.mapping.get(gesture) else {
            log::debug!("Gesto {} sin acción asignada", gesture);
            return None;
        };

        log::info!("Gesto {} → {} ({})", gesture, action, action.label());
        self.executor.execute(action);
        Some(action)
    }

    pub fn mapping(&self) -> &ActionMapping {
        &self.mapping
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }
}
