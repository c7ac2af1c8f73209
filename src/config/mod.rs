//! Configuration management
//!
//! YAML file, then `DUO_*` environment overrides, then validation.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::*;
pub use models::*;
pub use validation::Validate;

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use crate::core::error::{DuoError, Result};
use crate::core::request::Credential;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub duo: DuoConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl Config {
    /// Load configuration from file, applying process environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_file_with(path, |name| std::env::var(name).ok()).await
    }

    /// Load configuration from file with overrides from `lookup`
    pub async fn from_file_with<P, F>(path: P, lookup: F) -> Result<Self>
    where
        P: AsRef<Path>,
        F: Fn(&str) -> Option<String>,
    {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DuoError::configuration(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::parse_yaml(&content)?;
        config.apply_env_overrides_with(lookup)?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from defaults and environment variables only
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without overrides or validation
    pub fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| DuoError::configuration(format!("Failed to parse config: {}", e)))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.duo
            .validate()
            .map_err(|e| DuoError::configuration(format!("Duo config error: {}", e)))?;
        self.http
            .validate()
            .map_err(|e| DuoError::configuration(format!("HTTP config error: {}", e)))?;
        self.extraction
            .validate()
            .map_err(|e| DuoError::configuration(format!("Extraction config error: {}", e)))?;

        Ok(())
    }

    pub fn credential(&self) -> Credential {
        self.duo.credential()
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            DuoError::configuration(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
