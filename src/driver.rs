use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info_span, Instrument};
use ulid::Ulid;

use crate::config::{DeviceDescriptor, ProtocolConfig};
use crate::credentials::{Credentials, PartialCredentials};
use crate::error::AuthError;
use crate::generator::{BeginRequest, ExchangeHandle, StepGenerator};
use crate::state::StepState;
use crate::step::{ChallengeInput, Step};

/// Injected pure lookup from username to device identity.
pub type DeviceLookup = Box<dyn Fn(&str) -> Option<DeviceDescriptor> + Send + Sync>;

/// Drives an opaque challenge-response generator one round at a time,
/// funnelling every produced step through [`StepState`].
///
/// The generator round inside `start`/`advance` is the single suspension
/// point per call; `&mut self` rules out overlapping calls per instance, and
/// dropping an in-flight future means the stale round's step is never
/// published. There are no retries, timeouts, or step limits; the generator
/// is trusted to terminate.
pub struct ExchangeDriver {
    config: ProtocolConfig,
    generator: Arc<dyn StepGenerator>,
    device_for_username: DeviceLookup,
    state: StepState,
    handle: Option<Box<dyn ExchangeHandle>>,
    busy: watch::Sender<bool>,
    initial: PartialCredentials,
    auto_started: bool,
    attempt: Option<Ulid>,
}

impl ExchangeDriver {
    #[must_use]
    pub fn new(
        config: ProtocolConfig,
        generator: Arc<dyn StepGenerator>,
        device_for_username: DeviceLookup,
        state: StepState,
    ) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            config,
            generator,
            device_for_username,
            state,
            handle: None,
            busy,
            initial: PartialCredentials::default(),
            auto_started: false,
            attempt: None,
        }
    }

    /// Pre-fill consumed by [`auto_start`](Self::auto_start); typically the
    /// credentials the embedding layer already held at construction time.
    #[must_use]
    pub fn with_initial(mut self, initial: PartialCredentials) -> Self {
        self.initial = initial;
        self
    }

    /// Advisory busy flag: true while a generator round is in flight.
    ///
    /// Advisory state for the embedding layer, not an exclusion lock.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.busy.borrow()
    }

    /// Watch channel mirroring the busy flag, for observers that render
    /// progress while a round is suspended.
    #[must_use]
    pub fn busy_changes(&self) -> watch::Receiver<bool> {
        self.busy.subscribe()
    }

    /// The step the exchange is currently on.
    #[must_use]
    pub fn step(&self) -> Option<&Step> {
        self.state.current()
    }

    /// Begin a fresh exchange, replacing any prior session.
    ///
    /// Derives the device for the username, merges it with the fixed
    /// protocol configuration, runs the first generator round, and publishes
    /// the resulting step.
    ///
    /// # Errors
    /// [`AuthError::EmptyUsername`]/[`AuthError::EmptyPassword`] when a
    /// credential field is blank; any `Err` from the generator call itself
    /// is passed through unmodified, with the busy flag cleared first. An
    /// error-carrying step is not an `Err` here: it is published like any
    /// other step.
    pub async fn start(&mut self, credentials: Credentials) -> Result<(), AuthError> {
        credentials.validate()?;

        let attempt = Ulid::new();
        let span = info_span!(
            "exchange.begin",
            username = %credentials.username,
            attempt = %attempt,
        );

        let device = (self.device_for_username)(&credentials.username);
        let request = BeginRequest {
            config: self.config.clone(),
            username: credentials.username,
            password: credentials.password,
            device,
        };

        self.set_busy(true);
        let outcome = self.generator.begin(request).instrument(span).await;
        self.set_busy(false);

        let (step, handle) = outcome?;
        self.attempt = Some(attempt);
        self.handle = Some(handle);
        self.state.set_step(Some(step));

        Ok(())
    }

    /// Resume the in-progress exchange with the round-specific input, if
    /// any, and publish the resulting step.
    ///
    /// Without an active session the call is a silent no-op apart from the
    /// busy toggle: nothing is published and `Ok(())` is returned.
    ///
    /// # Errors
    /// Any `Err` from the generator call, passed through unmodified with the
    /// busy flag cleared first.
    pub async fn advance(&mut self, input: Option<ChallengeInput>) -> Result<(), AuthError> {
        self.set_busy(true);
        let outcome = match self.handle.as_mut() {
            Some(handle) => {
                let span = info_span!("exchange.resume", attempt = ?self.attempt);
                Some(handle.resume(input).instrument(span).await)
            }
            None => {
                debug!("advance without an active exchange, ignoring");
                None
            }
        };
        self.set_busy(false);

        if let Some(outcome) = outcome {
            self.state.set_step(Some(outcome?));
        }

        Ok(())
    }

    /// Explicit lifecycle hook for the construction-time pre-fill: runs
    /// [`start`](Self::start) at most once per driver, and only when both
    /// pre-fill fields are present and non-empty. Returns whether it fired.
    ///
    /// # Errors
    /// Propagates `start` failures. The once-latch is set before the
    /// attempt, so a failed first round does not re-fire.
    pub async fn auto_start(&mut self) -> Result<bool, AuthError> {
        if self.auto_started {
            return Ok(false);
        }
        let Some(credentials) = self.initial.complete() else {
            debug!("auto-start skipped, pre-fill incomplete");
            return Ok(false);
        };
        self.auto_started = true;
        self.start(credentials).await?;
        Ok(true)
    }

    /// Abandon the current session and publish the "no exchange in
    /// progress" state. Terminal handlers never fire for it.
    pub fn reset(&mut self) {
        self.handle = None;
        self.attempt = None;
        self.state.set_step(None);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.send_replace(busy);
    }
}
