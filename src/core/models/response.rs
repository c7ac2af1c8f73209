//! Provider response handed back to the host for audit and principal building

use serde::Serialize;

use super::auth::{AuthDecision, AuthResult};
use super::preauth::{PreauthDecision, PreauthResult};

/// The response an attempt ended on, resolved once at parse time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "endpoint", rename_all = "lowercase")]
pub enum DuoResponse {
    Preauth(PreauthResult),
    Auth(AuthResult),
}

impl DuoResponse {
    pub fn is_allow(&self) -> bool {
        match self {
            DuoResponse::Preauth(r) => r.result == PreauthDecision::Allow,
            DuoResponse::Auth(r) => r.result == AuthDecision::Allow,
        }
    }

    pub fn is_deny(&self) -> bool {
        match self {
            DuoResponse::Preauth(r) => r.result == PreauthDecision::Deny,
            DuoResponse::Auth(r) => r.result == AuthDecision::Deny,
        }
    }

    /// Allowed without a live factor challenge
    pub fn is_bypass(&self) -> bool {
        match self {
            DuoResponse::Preauth(r) => r.result == PreauthDecision::Allow,
            DuoResponse::Auth(r) => r.is_bypass(),
        }
    }

    pub fn result(&self) -> &str {
        match self {
            DuoResponse::Preauth(r) => r.result.as_str(),
            DuoResponse::Auth(r) => r.result.as_str(),
        }
    }

    pub fn status_message(&self) -> &str {
        match self {
            DuoResponse::Preauth(r) => &r.status_message,
            DuoResponse::Auth(r) => &r.status_message,
        }
    }
}

impl From<PreauthResult> for DuoResponse {
    fn from(result: PreauthResult) -> Self {
        DuoResponse::Preauth(result)
    }
}

impl From<AuthResult> for DuoResponse {
    fn from(result: AuthResult) -> Self {
        DuoResponse::Auth(result)
    }
}
