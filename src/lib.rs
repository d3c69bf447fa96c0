//! Step-driven challenge-response authentication exchange.
//!
//! Wraps an opaque, externally supplied step-generator (a zero-knowledge
//! password proof, a PAKE, any multi-round login protocol) and exposes the
//! exchange as discrete, independently-resumable steps for an interactive
//! caller: [`ExchangeDriver`] advances the generator one round at a time and
//! tracks an advisory busy flag, [`StepState`] tracks the current [`Step`]
//! and routes terminal outcomes (session tokens, error) to the caller's
//! handlers.

mod config;
mod credentials;
mod driver;
mod error;
mod generator;
mod state;
mod step;

pub use config::{DeviceDescriptor, ProtocolConfig};
pub use credentials::{Credentials, PartialCredentials};
pub use driver::{DeviceLookup, ExchangeDriver};
pub use error::AuthError;
pub use generator::{BeginRequest, ExchangeHandle, StepGenerator};
pub use state::{StepEvents, StepState};
pub use step::{ChallengeInput, NewDeviceMetadata, Step, StepCode, Tokens};
