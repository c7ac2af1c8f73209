//! Integration credential settings

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::request::Credential;

/// Duo Auth API integration
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuoConfig {
    /// API hostname, e.g. `api-xxxxxxxx.duosecurity.com`
    pub api_host: String,
    pub integration_key: String,
    pub secret_key: String,
}

impl DuoConfig {
    pub fn credential(&self) -> Credential {
        Credential::new(
            self.integration_key.trim(),
            self.secret_key.trim(),
            self.api_host.trim(),
        )
    }
}

impl fmt::Debug for DuoConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuoConfig")
            .field("api_host", &self.api_host)
            .field("integration_key", &self.integration_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}
