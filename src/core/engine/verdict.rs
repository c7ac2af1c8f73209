//! Terminal classification of an authentication attempt

use serde::Serialize;
use std::fmt;

use crate::core::error::DuoError;
use crate::core::models::DuoResponse;

/// Final verdict of one attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// `bypass` is true when the provider allowed the user without a live challenge
    Allowed { bypass: bool },
    Denied { reason: String },
    EnrollmentRequired {
        portal_url: Option<String>,
        message: String,
    },
    Failed(DuoError),
}

/// How the host pipeline should route a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    Authenticated,
    Rejected,
    Remediation,
    Error,
}

impl Verdict {
    pub fn disposition(&self) -> Disposition {
        match self {
            Verdict::Allowed { .. } => Disposition::Authenticated,
            Verdict::Denied { .. } => Disposition::Rejected,
            Verdict::EnrollmentRequired { .. } => Disposition::Remediation,
            Verdict::Failed(_) => Disposition::Error,
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed { .. })
    }

    pub fn is_bypass(&self) -> bool {
        matches!(self, Verdict::Allowed { bypass: true })
    }

    pub fn error(&self) -> Option<&DuoError> {
        match self {
            Verdict::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Stable label for logs and summaries
    pub fn name(&self) -> &'static str {
        match self {
            Verdict::Allowed { .. } => "allowed",
            Verdict::Denied { .. } => "denied",
            Verdict::EnrollmentRequired { .. } => "enrollment_required",
            Verdict::Failed(_) => "failed",
        }
    }
}

// Provider text stays in logs; user-facing output gets the label only.
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Allowed { bypass: true } => f.write_str("allowed (bypass)"),
            Verdict::Failed(e) => write!(f, "failed ({})", e.kind()),
            other => f.write_str(other.name()),
        }
    }
}

/// Verdict plus the last provider response the attempt received
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationOutcome {
    pub verdict: Verdict,
    pub response: Option<DuoResponse>,
}

impl AuthenticationOutcome {
    pub fn new(verdict: Verdict, response: Option<DuoResponse>) -> Self {
        Self { verdict, response }
    }

    pub fn failed(error: DuoError, response: Option<DuoResponse>) -> Self {
        Self::new(Verdict::Failed(error), response)
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict.is_allowed()
    }
}
