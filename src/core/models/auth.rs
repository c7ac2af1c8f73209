//! Authentication response

use serde::{Deserialize, Serialize};

use super::envelope::null_as_default;

/// `status` reported when the user authenticated through bypass
pub const STATUS_BYPASS: &str = "bypass";

/// `result` of an `/auth` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthDecision {
    Allow,
    Deny,
    Other(String),
}

impl AuthDecision {
    pub fn as_str(&self) -> &str {
        match self {
            AuthDecision::Allow => "allow",
            AuthDecision::Deny => "deny",
            AuthDecision::Other(value) => value,
        }
    }
}

impl From<String> for AuthDecision {
    fn from(value: String) -> Self {
        match value.as_str() {
            "allow" => AuthDecision::Allow,
            "deny" => AuthDecision::Deny,
            _ => AuthDecision::Other(value),
        }
    }
}

impl From<AuthDecision> for String {
    fn from(decision: AuthDecision) -> Self {
        decision.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResult {
    pub result: AuthDecision,
    /// Free-form detail such as `allow`, `bypass`, `deny` or `fraud`
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(rename = "status_msg", default, deserialize_with = "null_as_default")]
    pub status_message: String,
    /// Present when the integration remembers devices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_device_token: Option<String>,
}

impl AuthResult {
    pub fn is_bypass(&self) -> bool {
        self.status == STATUS_BYPASS
    }
}
