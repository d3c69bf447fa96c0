use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

/// Discriminator for the current point in the exchange.
///
/// Serialized names are the wire-facing codes (`"SMS_MFA"`, `"TOKENS"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepCode {
    /// Intermediate step, more input needed.
    Challenge,
    /// A one-time code sent out of band must be supplied.
    SmsMfa,
    /// A code from a TOTP authenticator must be supplied.
    SoftwareMfa,
    /// The verifier demands a replacement password before finishing.
    NewPassword,
    /// Terminal success, session tokens issued.
    Tokens,
    /// Terminal failure.
    Error,
}

impl StepCode {
    /// True once the exchange must not be advanced further.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Tokens | Self::Error)
    }
}

/// One discrete result of the authentication exchange: intermediate
/// (`response` and `error` both absent), terminal success (`response`
/// present), or terminal failure (`error` present).
///
/// Generators are expected to populate at most one of the two fields; a step
/// carrying both is resolved in favour of the error when published (see
/// [`StepState::set_step`](crate::StepState::set_step)).
#[derive(Debug, Clone)]
pub struct Step {
    pub code: StepCode,
    pub response: Option<Tokens>,
    pub error: Option<AuthError>,
}

impl Step {
    /// Intermediate step with no payload.
    #[must_use]
    pub const fn challenge(code: StepCode) -> Self {
        Self {
            code,
            response: None,
            error: None,
        }
    }

    /// Terminal success step carrying the issued tokens.
    #[must_use]
    pub fn tokens(tokens: Tokens) -> Self {
        Self {
            code: StepCode::Tokens,
            response: Some(tokens),
            error: None,
        }
    }

    /// Terminal failure step carrying the exchange error.
    #[must_use]
    pub fn failed(error: AuthError) -> Self {
        Self {
            code: StepCode::Error,
            response: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.code.is_terminal()
    }
}

/// Session tokens issued on terminal success, forwarded verbatim to the
/// caller's completion handler. The driver never inspects them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub id_token: String,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_device: Option<NewDeviceMetadata>,
}

/// Device registration material the verifier may attach to fresh tokens,
/// for the caller to persist and feed back through the device lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDeviceMetadata {
    pub key: String,
    pub group_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Round-specific input consumed by an intermediate step.
#[derive(Debug, Clone)]
pub enum ChallengeInput {
    /// One-time verification code (SMS or TOTP).
    Code(String),
    /// Replacement password demanded by a [`StepCode::NewPassword`] step.
    NewPassword(SecretString),
}
