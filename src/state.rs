use tracing::debug;

use crate::error::AuthError;
use crate::step::{Step, StepCode, Tokens};

/// Terminal-outcome handlers supplied by the embedding layer.
pub struct StepEvents {
    on_complete: Box<dyn Fn(Tokens) + Send + Sync>,
    on_error: Box<dyn Fn(AuthError) + Send + Sync>,
}

impl StepEvents {
    #[must_use]
    pub fn new<C, E>(on_complete: C, on_error: E) -> Self
    where
        C: Fn(Tokens) + Send + Sync + 'static,
        E: Fn(AuthError) + Send + Sync + 'static,
    {
        Self {
            on_complete: Box::new(on_complete),
            on_error: Box::new(on_error),
        }
    }
}

/// Single source of truth for "what step is the exchange on", plus delivery
/// of terminal outcomes to the registered handlers.
pub struct StepState {
    step: Option<Step>,
    events: StepEvents,
}

impl StepState {
    #[must_use]
    pub fn new(events: StepEvents) -> Self {
        Self { step: None, events }
    }

    /// The step the exchange is currently on; `None` before the first round
    /// and after a reset.
    #[must_use]
    pub fn current(&self) -> Option<&Step> {
        self.step.as_ref()
    }

    /// Unconditionally replace the tracked step and deliver any terminal
    /// outcome it carries, synchronously.
    ///
    /// Every call evaluates its own step; there is no already-completed
    /// guard at this layer. A step populating both `response` and `error`
    /// delivers only the error.
    pub fn set_step(&mut self, step: Option<Step>) {
        self.step = step;
        let Some(step) = &self.step else {
            return;
        };
        debug!(code = ?step.code, "step published");
        if let Some(error) = &step.error {
            (self.events.on_error)(error.clone());
        } else if step.code == StepCode::Tokens {
            if let Some(response) = &step.response {
                (self.events.on_complete)(response.clone());
            }
        }
    }
}
