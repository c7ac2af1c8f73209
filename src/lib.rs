//! # duo-authapi
//!
//! Duo Auth API v2 client and second-factor decision engine for
//! identity-provider authentication pipelines.
//!
//! An attempt calls `/auth/v2/preauth`, then `/auth/v2/auth` only when
//! pre-authentication asks for a factor challenge, and ends in a [`Verdict`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use duo_authapi::{AuthenticationEngine, AuthenticationRequestParams, Config, DuoClient, Factor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/duo.yaml").await?;
//!     let client = DuoClient::new(config.credential(), &config.http)?;
//!     let engine = AuthenticationEngine::new(client);
//!
//!     let params = AuthenticationRequestParams::with_auto_device("alice", Factor::Push)?;
//!     let outcome = engine.authenticate(&params).await;
//!     println!("{}", outcome.verdict);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod utils;

pub use config::Config;
pub use crate::core::client::{DuoClient, Endpoint, HttpTransport, ReqwestTransport};
pub use crate::core::engine::{AuthenticationEngine, AuthenticationOutcome, Disposition, Verdict};
pub use crate::core::error::{DuoError, Result};
pub use crate::core::extract::{InboundParts, InboundRequest, RequestExtractor};
pub use crate::core::models::{AuthResult, Device, DuoResponse, PreauthResult};
pub use crate::core::request::{AuthenticationRequestParams, Credential, Factor};
pub use crate::core::signer::{ApiParams, SignedRequest, sign_request};

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// `User-Agent` sent with every provider call
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));
