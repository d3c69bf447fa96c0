use thiserror::Error;

/// Failure surfaced by an authentication exchange.
///
/// Carried on a terminal step, or returned directly when the generator call
/// itself fails. The driver forwards either form verbatim; it never retries,
/// classifies, or recovers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("credentials were refused by the verifier")]
    BadCredentials,
    #[error("verifier rejected the exchange: {0}")]
    Rejected(String),
    #[error("protocol violation: {0}")]
    Protocol(String),
    #[error("transport failure: {0}")]
    Transport(String),
}
