use async_trait::async_trait;
use secrecy::SecretString;

use crate::config::{DeviceDescriptor, ProtocolConfig};
use crate::error::AuthError;
use crate::step::{ChallengeInput, Step};

/// Merged invocation payload handed to [`StepGenerator::begin`]: the fixed
/// protocol configuration plus the per-attempt credentials and device.
#[derive(Debug, Clone)]
pub struct BeginRequest {
    pub config: ProtocolConfig,
    pub username: String,
    pub password: SecretString,
    pub device: Option<DeviceDescriptor>,
}

/// Factory side of the challenge-response protocol.
///
/// One `begin` call per exchange attempt, yielding the first step and the
/// live session handle. Implementations own all transport and cryptography;
/// the driver treats every step, and every `Err`, as opaque.
#[async_trait]
pub trait StepGenerator: Send + Sync {
    /// Run the first round of a fresh exchange.
    ///
    /// # Errors
    /// Round failures are reported either as an error-carrying [`Step`]
    /// (published like any other step) or as `Err` (passed through to the
    /// caller of `start` unmodified).
    async fn begin(
        &self,
        request: BeginRequest,
    ) -> Result<(Step, Box<dyn ExchangeHandle>), AuthError>;
}

/// Live session for one in-progress exchange, exclusively owned by the
/// driver. Replaced on every `start`, abandoned once a terminal step is
/// produced or the driver is torn down.
#[async_trait]
pub trait ExchangeHandle: Send {
    /// Resume the exchange with the round-specific input, if any.
    ///
    /// Resuming after a terminal step is undefined at the protocol level;
    /// the driver never does it on its own.
    ///
    /// # Errors
    /// Same reporting contract as [`StepGenerator::begin`].
    async fn resume(&mut self, input: Option<ChallengeInput>) -> Result<Step, AuthError>;
}
