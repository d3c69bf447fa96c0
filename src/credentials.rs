use secrecy::{ExposeSecret, SecretString};

use crate::error::AuthError;

/// Username and password for one exchange attempt. Not persisted beyond the
/// attempt; the password stays wrapped until the generator consumes it.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), AuthError> {
        if self.username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if self.password.expose_secret().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(())
    }
}

/// Construction-time pre-fill. An exchange can only be auto-started from it
/// once both fields are present and non-empty.
#[derive(Debug, Clone, Default)]
pub struct PartialCredentials {
    pub username: Option<String>,
    pub password: Option<SecretString>,
}

impl PartialCredentials {
    #[must_use]
    pub fn complete(&self) -> Option<Credentials> {
        let username = self.username.as_deref().filter(|u| !u.is_empty())?;
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())?;
        Some(Credentials::new(username, password.clone()))
    }
}
