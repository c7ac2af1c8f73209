//! Where inbound requests carry the factor, device and passcode

use serde::{Deserialize, Serialize};

use super::default_true;

pub const DEFAULT_FACTOR_HEADER: &str = "X-Shibboleth-Duo-Factor";
pub const DEFAULT_DEVICE_HEADER: &str = "X-Shibboleth-Duo-Device";
pub const DEFAULT_PASSCODE_HEADER: &str = "X-Shibboleth-Duo-Passcode";
pub const DEFAULT_FACTOR_PARAMETER: &str = "duoFactor";
pub const DEFAULT_DEVICE_PARAMETER: &str = "duoDevice";
pub const DEFAULT_PASSCODE_PARAMETER: &str = "duoPasscode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_factor_header")]
    pub factor_header: String,
    #[serde(default = "default_device_header")]
    pub device_header: String,
    #[serde(default = "default_passcode_header")]
    pub passcode_header: String,
    #[serde(default = "default_factor_parameter")]
    pub factor_parameter: String,
    #[serde(default = "default_device_parameter")]
    pub device_parameter: String,
    #[serde(default = "default_passcode_parameter")]
    pub passcode_parameter: String,
    #[serde(default = "default_true")]
    pub use_headers: bool,
    #[serde(default = "default_true")]
    pub use_parameters: bool,
    /// Fall back to factor `auto` and device `auto` when the request names neither
    #[serde(default = "default_true")]
    pub auto_authentication: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            factor_header: default_factor_header(),
            device_header: default_device_header(),
            passcode_header: default_passcode_header(),
            factor_parameter: default_factor_parameter(),
            device_parameter: default_device_parameter(),
            passcode_parameter: default_passcode_parameter(),
            use_headers: true,
            use_parameters: true,
            auto_authentication: true,
        }
    }
}

fn default_factor_header() -> String {
    DEFAULT_FACTOR_HEADER.to_string()
}

fn default_device_header() -> String {
    DEFAULT_DEVICE_HEADER.to_string()
}

fn default_passcode_header() -> String {
    DEFAULT_PASSCODE_HEADER.to_string()
}

fn default_factor_parameter() -> String {
    DEFAULT_FACTOR_PARAMETER.to_string()
}

fn default_device_parameter() -> String {
    DEFAULT_DEVICE_PARAMETER.to_string()
}

fn default_passcode_parameter() -> String {
    DEFAULT_PASSCODE_PARAMETER.to_string()
}
