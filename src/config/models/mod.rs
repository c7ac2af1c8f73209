//! Configuration data models

pub mod duo;
pub mod extraction;
pub mod http;

pub use duo::*;
pub use extraction::*;
pub use http::*;

/// Default request timeout in seconds
pub fn default_timeout() -> u64 {
    60
}

/// Default connect timeout in seconds
pub fn default_connect_timeout() -> u64 {
    10
}

pub(crate) fn default_true() -> bool {
    true
}
