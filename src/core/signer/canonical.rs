//! Canonical request construction
//!
//! The exact byte sequence the request signature is computed over. Any
//! deviation here (ordering, percent-encoding, line order) produces a
//! signature the provider rejects with `40103 Invalid signature`.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use url::form_urlencoded;

/// RFC 2822 date format used for both the canonical string and the `Date` header
pub const RFC_2822_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Request parameters, kept sorted by name
///
/// Names compare byte-wise, which is the order the provider canonicalises in.
/// The protocol has no repeated names, so inserting an existing name replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiParams(BTreeMap<String, String>);

impl ApiParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(name.into(), value.into());
        self
    }

    /// Insert only when a value is present
    pub fn insert_opt(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.0.insert(name.into(), value.to_string());
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Query string used inside the signature
    pub fn canonical_query(&self) -> String {
        self.iter()
            .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `application/x-www-form-urlencoded` request body
    ///
    /// Standard form encoding (space as `+`); decodes to the same pairs as
    /// [`ApiParams::canonical_query`].
    pub fn form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ApiParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Percent-encode one name or value for the canonical query string
///
/// Form encoding, then `+` becomes `%20`, `*` becomes `%2A` and `%7E` becomes `~`.
/// A literal `+` is already `%2B` after form encoding, so the first
/// substitution only ever touches encoded spaces.
pub fn encode_component(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Format a timestamp the way the `Date` header and canonical string expect
pub fn format_rfc2822(now: &DateTime<Utc>) -> String {
    now.format(RFC_2822_FORMAT).to_string()
}

/// Canonical representation of one outgoing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    pub date: String,
    pub method: String,
    pub host: String,
    pub path: String,
    pub query: String,
}

impl CanonicalRequest {
    pub fn new(
        method: &str,
        host: &str,
        path: &str,
        params: &ApiParams,
        now: &DateTime<Utc>,
    ) -> Self {
        Self {
            date: format_rfc2822(now),
            method: method.to_uppercase(),
            host: host.to_lowercase(),
            path: path.to_string(),
            query: params.canonical_query(),
        }
    }

    /// Newline-joined string the HMAC is computed over (signature version 2)
    pub fn to_canonical_string(&self) -> String {
        [
            self.date.as_str(),
            self.method.as_str(),
            self.host.as_str(),
            self.path.as_str(),
            self.query.as_str(),
        ]
        .join("\n")
    }
}
