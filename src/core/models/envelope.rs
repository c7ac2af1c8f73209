//! Response envelopes and status-code classification
//!
//! Every Auth API response is either a success envelope
//! (`{"stat": "OK", "response": {...}}`, HTTP 200) or a failure envelope
//! (`{"stat": "FAIL", "code": ..., "message": ..., "message_detail": ...}`, HTTP 400).
//! Anything else is a transport failure and its body is not read.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::core::error::{DuoError, Result};

/// Value of `stat` on a successful call
pub const STAT_OK: &str = "OK";

/// Success envelope wrapping a typed response
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub stat: Option<String>,
    pub response: Option<T>,
}

/// Failure envelope returned with HTTP 400
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FailureEnvelope {
    #[serde(default, deserialize_with = "null_as_default")]
    pub stat: String,
    /// Numeric on the wire (`40002`); kept as text
    #[serde(default, deserialize_with = "code_as_string")]
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message_detail: String,
}

impl From<FailureEnvelope> for DuoError {
    fn from(failure: FailureEnvelope) -> Self {
        DuoError::rejected(failure.code, failure.message, failure.message_detail)
    }
}

/// Classify an HTTP status and body into a typed response or an error
pub fn parse_envelope<T: DeserializeOwned>(status: u16, reason: &str, body: &str) -> Result<T> {
    match status {
        200 => parse_success(body),
        400 => {
            let failure: FailureEnvelope = serde_json::from_str(body)
                .map_err(|e| DuoError::malformed(format!("Unparseable failure response: {}", e)))?;
            warn!(
                code = %failure.code,
                message = %failure.message,
                "Duo rejected the request"
            );
            Err(failure.into())
        }
        _ => Err(DuoError::http_status(
            status,
            format!("Non-ok status code ({}) returned from Duo: {}", status, reason),
        )),
    }
}

fn parse_success<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Option<ApiEnvelope<T>> = serde_json::from_str(body)
        .map_err(|e| DuoError::malformed(format!("Unable to parse JSON response: {}", e)))?;

    let envelope = envelope.ok_or_else(|| DuoError::malformed("Response envelope is null"))?;

    match envelope.stat.as_deref() {
        Some(STAT_OK) => {}
        Some(other) => return Err(DuoError::unexpected("stat", other)),
        None => return Err(DuoError::unexpected("stat", "<absent>")),
    }

    debug!("Duo response envelope accepted");
    envelope
        .response
        .ok_or_else(|| DuoError::malformed("Response envelope has no 'response' object"))
}

/// Deserialize `null` (or a missing field, with `#[serde(default)]`) as the type's default
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn code_as_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
