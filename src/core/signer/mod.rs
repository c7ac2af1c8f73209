//! Duo request signing
//!
//! Implementation of the Auth API v2 signing process: HMAC-SHA1 over the
//! canonical request, sent as HTTP Basic credentials next to a `Date` header.
//!
//! Signing is a pure function of its inputs; the caller passes the timestamp.

mod canonical;

pub use canonical::{ApiParams, CanonicalRequest, RFC_2822_FORMAT, encode_component, format_rfc2822};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, DATE, HeaderMap, HeaderValue};
use sha1::Sha1;

use super::error::{DuoError, Result};
use super::request::Credential;

type HmacSha1 = Hmac<Sha1>;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// A canonical request plus the headers that authenticate it
///
/// Signatures are bound to their timestamp; build a new one per call.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub canonical: CanonicalRequest,
    /// Full `Authorization` header value, including the `Basic ` scheme
    pub authorization: String,
    /// `Date` header value, identical to the canonical date line
    pub date: String,
}

impl SignedRequest {
    /// Headers to attach to the outgoing POST
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();

        let authorization = HeaderValue::from_str(&self.authorization)
            .map_err(|e| DuoError::encoding(format!("Invalid Authorization header: {}", e)))?;
        let date = HeaderValue::from_str(&self.date)
            .map_err(|e| DuoError::encoding(format!("Invalid Date header: {}", e)))?;

        headers.insert(AUTHORIZATION, authorization);
        headers.insert(DATE, date);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));

        Ok(headers)
    }
}

impl std::fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedRequest")
            .field("canonical", &self.canonical)
            .field("authorization", &"[REDACTED]")
            .field("date", &self.date)
            .finish()
    }
}

/// Sign one API call
pub fn sign_request(
    method: &str,
    host: &str,
    path: &str,
    params: &ApiParams,
    credential: &Credential,
    now: DateTime<Utc>,
) -> Result<SignedRequest> {
    if credential.integration_key().is_empty() {
        return Err(DuoError::configuration("integration key is required for signing"));
    }
    if credential.secret_key().is_empty() {
        return Err(DuoError::configuration("secret key is required for signing"));
    }

    let canonical = CanonicalRequest::new(method, host, path, params, &now);
    let signature = hmac_sha1_hex(credential.secret_key(), &canonical.to_canonical_string())?;

    let basic = STANDARD.encode(format!("{}:{}", credential.integration_key(), signature));

    Ok(SignedRequest {
        date: canonical.date.clone(),
        authorization: format!("Basic {}", basic),
        canonical,
    })
}

/// Hex-encoded HMAC-SHA1
pub fn hmac_sha1_hex(key: &str, data: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| DuoError::configuration(format!("HMAC key error: {}", e)))?;
    mac.update(data.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
