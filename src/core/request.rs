//! Authentication request data
//!
//! The immutable values an attempt is built from: the integration credential
//! and the per-attempt factor/device/passcode/username parameters.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::{DuoError, Result};

/// Auth API parameter names
pub const PARAM_USERNAME: &str = "username";
pub const PARAM_FACTOR: &str = "factor";
pub const PARAM_DEVICE: &str = "device";
pub const PARAM_PASSCODE: &str = "passcode";

/// Device value that lets the provider pick the user's default device
pub const DEVICE_AUTO: &str = "auto";

/// Second-factor challenge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Auto,
    Push,
    Passcode,
    Sms,
    Phone,
}

impl Factor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Auto => "auto",
            Factor::Push => "push",
            Factor::Passcode => "passcode",
            Factor::Sms => "sms",
            Factor::Phone => "phone",
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Factor {
    type Err = DuoError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Factor::Auto),
            "push" => Ok(Factor::Push),
            "passcode" => Ok(Factor::Passcode),
            "sms" => Ok(Factor::Sms),
            "phone" => Ok(Factor::Phone),
            other => Err(DuoError::invalid_request(format!(
                "unsupported factor '{}'",
                other
            ))),
        }
    }
}

/// Integration credential, read-only for the lifetime of the process
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    integration_key: String,
    secret_key: String,
    api_host: String,
}

impl Credential {
    pub fn new(
        integration_key: impl Into<String>,
        secret_key: impl Into<String>,
        api_host: impl Into<String>,
    ) -> Self {
        Self {
            integration_key: integration_key.into(),
            secret_key: secret_key.into(),
            api_host: api_host.into(),
        }
    }

    pub fn integration_key(&self) -> &str {
        &self.integration_key
    }

    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }

    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// Ensure every field needed for signing is present
    pub fn validate(&self) -> Result<()> {
        if self.integration_key.trim().is_empty() {
            return Err(DuoError::configuration("integration key cannot be empty"));
        }
        if self.secret_key.trim().is_empty() {
            return Err(DuoError::configuration("secret key cannot be empty"));
        }
        if self.api_host.trim().is_empty() {
            return Err(DuoError::configuration("API host cannot be empty"));
        }
        Ok(())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("integration_key", &self.integration_key)
            .field("secret_key", &"[REDACTED]")
            .field("api_host", &self.api_host)
            .finish()
    }
}

/// Parameters of a single authentication attempt
///
/// Built once, upstream of the engine, and only read afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthenticationRequestParams {
    username: String,
    factor: Factor,
    device: Option<String>,
    passcode: Option<String>,
}

impl AuthenticationRequestParams {
    /// Build and validate attempt parameters
    ///
    /// Empty device/passcode strings are treated as absent.
    pub fn new(
        username: impl Into<String>,
        factor: Factor,
        device: Option<String>,
        passcode: Option<String>,
    ) -> Result<Self> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(DuoError::invalid_request("username cannot be empty"));
        }

        let device = device.filter(|d| !d.is_empty());
        let passcode = passcode.filter(|p| !p.is_empty());

        if factor == Factor::Passcode && passcode.is_none() {
            return Err(DuoError::invalid_request(
                "passcode factor requires a passcode",
            ));
        }

        Ok(Self {
            username,
            factor,
            device,
            passcode,
        })
    }

    /// Convenience for push/auto with the provider's default device
    pub fn with_auto_device(username: impl Into<String>, factor: Factor) -> Result<Self> {
        Self::new(username, factor, Some(DEVICE_AUTO.to_string()), None)
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn factor(&self) -> Factor {
        self.factor
    }

    pub fn device(&self) -> Option<&str> {
        self.device.as_deref()
    }

    pub fn passcode(&self) -> Option<&str> {
        self.passcode.as_deref()
    }
}

impl fmt::Debug for AuthenticationRequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticationRequestParams")
            .field("username", &self.username)
            .field("factor", &self.factor)
            .field("device", &self.device)
            .field("passcode", &self.passcode.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
