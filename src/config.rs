use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

/// Fixed protocol parameters supplied once at driver construction and merged
/// into every generator invocation.
///
/// Passthrough data for the external protocol implementation; the driver
/// never interprets any of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Endpoint of the remote verifier.
    pub verifier_url: Url,
    /// Client identifier registered with the verifier.
    pub client_id: String,
    /// Optional tenant or user-pool qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Additional options recognized only by the protocol implementation.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ProtocolConfig {
    #[must_use]
    pub fn new(verifier_url: Url, client_id: impl Into<String>) -> Self {
        Self {
            verifier_url,
            client_id: client_id.into(),
            realm: None,
            params: Map::new(),
        }
    }
}

/// Per-username device identity handed to the protocol, derived by the
/// caller-injected lookup. The optional device password never leaves the
/// generator.
#[derive(Debug, Clone)]
pub struct DeviceDescriptor {
    pub key: String,
    pub group_key: String,
    pub password: Option<SecretString>,
}
