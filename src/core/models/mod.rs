//! Auth API response models

mod auth;
mod envelope;
mod preauth;
mod response;

pub use auth::{AuthDecision, AuthResult, STATUS_BYPASS};
pub use envelope::{ApiEnvelope, FailureEnvelope, STAT_OK, parse_envelope};
pub use preauth::{Device, PreauthDecision, PreauthResult};
pub use response::DuoResponse;
