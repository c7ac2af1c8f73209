//! Core protocol client and decision engine
//!
//! `signer` builds and signs canonical requests, `models` parses the provider's
//! envelopes, `client` performs the calls and `engine` turns results into a verdict.

pub mod client;
pub mod engine;
pub mod error;
pub mod extract;
pub mod models;
pub mod request;
pub mod signer;
