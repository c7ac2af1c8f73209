//! Environment overrides

use std::env;
use tracing::debug;

use super::Config;
use crate::core::error::{DuoError, Result};

pub const ENV_API_HOST: &str = "DUO_API_HOST";
pub const ENV_INTEGRATION_KEY: &str = "DUO_INTEGRATION_KEY";
pub const ENV_SECRET_KEY: &str = "DUO_SECRET_KEY";
pub const ENV_API_BASE: &str = "DUO_API_BASE";
pub const ENV_TIMEOUT_SECONDS: &str = "DUO_TIMEOUT_SECONDS";
pub const ENV_CONNECT_TIMEOUT_SECONDS: &str = "DUO_CONNECT_TIMEOUT_SECONDS";

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_with(|name| env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_env_overrides_with<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(host) = var(ENV_API_HOST) {
            self.duo.api_host = host;
        }
        if let Some(ikey) = var(ENV_INTEGRATION_KEY) {
            self.duo.integration_key = ikey;
        }
        if let Some(skey) = var(ENV_SECRET_KEY) {
            self.duo.secret_key = skey;
        }
        if let Some(api_base) = var(ENV_API_BASE) {
            self.http.api_base = Some(api_base);
        }
        if let Some(timeout) = var(ENV_TIMEOUT_SECONDS) {
            self.http.timeout_seconds = timeout.trim().parse().map_err(|e| {
                DuoError::configuration(format!("Invalid {}: {}", ENV_TIMEOUT_SECONDS, e))
            })?;
        }
        if let Some(timeout) = var(ENV_CONNECT_TIMEOUT_SECONDS) {
            self.http.connect_timeout_seconds = timeout.trim().parse().map_err(|e| {
                DuoError::configuration(format!("Invalid {}: {}", ENV_CONNECT_TIMEOUT_SECONDS, e))
            })?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}
