//! Common test utilities
//!
//! # Usage
//!
//! ```rust
//! use crate::common::{fixtures, MockDuo};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let duo = MockDuo::start().await;
//!     duo.preauth_returns(fixtures::preauth_allow(), 1).await;
//!     let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod mock_duo;

pub use mock_duo::MockDuo;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err and return the error
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}

/// Assert that a verdict is `Failed` with the given error kind
#[macro_export]
macro_rules! assert_failed_with {
    ($verdict:expr, $kind:expr) => {
        match &$verdict {
            duo_authapi::Verdict::Failed(e) => assert_eq!(e.kind(), $kind, "error: {}", e),
            other => panic!("Expected Failed({}), got {:?}", $kind, other),
        }
    };
}
