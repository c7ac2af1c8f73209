//! Pre-authentication response

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::envelope::null_as_default;

/// `result` of a `/preauth` call
///
/// Values the engine does not know are kept verbatim in `Other` so that a
/// provider-side addition reaches the decision logic instead of failing the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PreauthDecision {
    /// User is in bypass; no factor challenge needed
    Allow,
    /// User must complete a factor challenge
    Auth,
    /// User is not permitted to authenticate
    Deny,
    /// User has no usable device and must enroll
    Enroll,
    Other(String),
}

impl PreauthDecision {
    pub fn as_str(&self) -> &str {
        match self {
            PreauthDecision::Allow => "allow",
            PreauthDecision::Auth => "auth",
            PreauthDecision::Deny => "deny",
            PreauthDecision::Enroll => "enroll",
            PreauthDecision::Other(value) => value,
        }
    }
}

impl From<String> for PreauthDecision {
    fn from(value: String) -> Self {
        match value.as_str() {
            "allow" => PreauthDecision::Allow,
            "auth" => PreauthDecision::Auth,
            "deny" => PreauthDecision::Deny,
            "enroll" => PreauthDecision::Enroll,
            _ => PreauthDecision::Other(value),
        }
    }
}

impl From<PreauthDecision> for String {
    fn from(decision: PreauthDecision) -> Self {
        decision.as_str().to_string()
    }
}

/// One of the user's enrolled devices
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Device {
    /// Device identifier to pass back as `device`
    #[serde(rename = "device", default, deserialize_with = "null_as_default")]
    pub id: String,
    /// `phone`, `token` or `desktop`
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub device_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Factors the device supports (`push`, `sms`, `phone`, `mobile_otp`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: BTreeSet<String>,
}

impl Device {
    pub fn supports(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreauthResult {
    pub result: PreauthDecision,
    #[serde(rename = "status_msg", default, deserialize_with = "null_as_default")]
    pub status_message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub devices: Vec<Device>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enroll_portal_url: Option<String>,
}

impl PreauthResult {
    pub fn find_device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }
}
