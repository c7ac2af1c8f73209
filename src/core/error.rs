//! Duo Auth API Error Handling
//!
//! Single error type for every failure an authentication attempt can hit.
//!
//! | Variant | Raised by | Retryable |
//! |------|------|--------|
//! | Configuration | missing/invalid credential or config | No |
//! | Encoding | request cannot be expressed on the wire | No |
//! | InvalidRequest | inbound factor/device/passcode/username | No |
//! | Transport | connection failure, non-200/400 status | Yes |
//! | Timeout | caller deadline, or a network timeout (the timed-out case of Transport) | Yes |
//! | Cancelled | caller cancellation signal | No |
//! | MalformedResponse | unparseable body or null envelope | No |
//! | ProviderRejected | HTTP 400 failure envelope | No |
//! | UnexpectedStatus | `stat` or result value not understood | No |
//!
//! Retryable only means the caller may try again; nothing in this crate retries.

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, DuoError>;

/// Unified error type for the Duo Auth API client and decision engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DuoError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Encoding error: {message}")]
    Encoding { message: String },

    #[error("Invalid authentication request: {message}")]
    InvalidRequest { message: String },

    /// Network-level failure or an HTTP status other than 200/400
    #[error("Transport error{}: {message}", status_suffix(.status))]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Timeout: {message}")]
    Timeout { message: String },

    #[error("Operation cancelled: {message}")]
    Cancelled { message: String },

    #[error("Malformed response: {message}")]
    MalformedResponse { message: String },

    /// Explicit failure envelope returned with HTTP 400
    #[error("Request rejected by provider (code {code}): {message} ({message_detail})")]
    ProviderRejected {
        code: String,
        message: String,
        message_detail: String,
    },

    /// Well-formed response carrying a value the engine does not act on
    #[error("Unexpected '{field}' value: {value}")]
    UnexpectedStatus { field: &'static str, value: String },
}

fn status_suffix(status: &Option<u16>) -> String {
    status
        .map(|s| format!(" (status {s})"))
        .unwrap_or_default()
}

impl DuoError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Transport failure that never produced an HTTP status
    pub fn network(message: impl Into<String>) -> Self {
        Self::Transport {
            status: None,
            message: message.into(),
        }
    }

    /// Transport failure for an HTTP status the protocol does not define
    pub fn http_status(status: u16, reason: impl Into<String>) -> Self {
        Self::Transport {
            status: Some(status),
            message: reason.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn cancelled(message: impl Into<String>) -> Self {
        Self::Cancelled {
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    pub fn rejected(
        code: impl Into<String>,
        message: impl Into<String>,
        message_detail: impl Into<String>,
    ) -> Self {
        Self::ProviderRejected {
            code: code.into(),
            message: message.into(),
            message_detail: message_detail.into(),
        }
    }

    pub fn unexpected(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            field,
            value: value.into(),
        }
    }

    /// Whether the caller may reasonably retry the whole attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Timeout { .. })
    }

    /// HTTP status preserved from the provider, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            Self::ProviderRejected { .. } => Some(400),
            _ => None,
        }
    }

    /// Stable short name, suitable for log fields and audit records
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "configuration",
            Self::Encoding { .. } => "encoding",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::Cancelled { .. } => "cancelled",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::ProviderRejected { .. } => "provider_rejected",
            Self::UnexpectedStatus { .. } => "unexpected_status",
        }
    }
}
