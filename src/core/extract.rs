//! Factor/device/passcode extraction from an inbound request
//!
//! Parameters are read first, then headers, so a header always wins over a
//! parameter of the same purpose. Empty values count as absent.

use reqwest::header::HeaderMap;
use std::collections::HashMap;
use tracing::debug;

use crate::config::ExtractionConfig;
use crate::core::error::{DuoError, Result};
use crate::core::request::{AuthenticationRequestParams, DEVICE_AUTO, Factor};

/// Read access to the parts of an inbound request the extractor looks at
pub trait InboundRequest {
    fn header(&self, name: &str) -> Option<&str>;
    fn parameter(&self, name: &str) -> Option<&str>;
}

/// Owned headers and query/form parameters of an inbound request
#[derive(Debug, Clone, Default)]
pub struct InboundParts {
    pub headers: HeaderMap,
    pub parameters: HashMap<String, String>,
}

impl InboundParts {
    pub fn new(headers: HeaderMap, parameters: HashMap<String, String>) -> Self {
        Self {
            headers,
            parameters,
        }
    }
}

impl InboundRequest for InboundParts {
    fn header(&self, name: &str) -> Option<&str> {
        // Values that are not visible ASCII are ignored
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).map(String::as_str)
    }
}

#[derive(Default)]
struct Extracted<'a> {
    factor: Option<&'a str>,
    device: Option<&'a str>,
    passcode: Option<&'a str>,
}

impl<'a> Extracted<'a> {
    fn overwrite(
        &mut self,
        factor: Option<&'a str>,
        device: Option<&'a str>,
        passcode: Option<&'a str>,
    ) {
        let non_empty = |v: Option<&'a str>| v.filter(|s| !s.is_empty());
        if let Some(f) = non_empty(factor) {
            self.factor = Some(f);
        }
        if let Some(d) = non_empty(device) {
            self.device = Some(d);
        }
        if let Some(p) = non_empty(passcode) {
            self.passcode = Some(p);
        }
    }
}

/// Builds attempt parameters from inbound requests
#[derive(Debug, Clone, Default)]
pub struct RequestExtractor {
    config: ExtractionConfig,
}

impl RequestExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn extract<R: InboundRequest + ?Sized>(
        &self,
        request: &R,
        username: &str,
    ) -> Result<AuthenticationRequestParams> {
        let config = &self.config;
        let mut extracted = Extracted {
            factor: config.auto_authentication.then_some(Factor::Auto.as_str()),
            ..Extracted::default()
        };

        if config.use_parameters {
            extracted.overwrite(
                request.parameter(&config.factor_parameter),
                request.parameter(&config.device_parameter),
                request.parameter(&config.passcode_parameter),
            );
        }

        if config.use_headers {
            extracted.overwrite(
                request.header(&config.factor_header),
                request.header(&config.device_header),
                request.header(&config.passcode_header),
            );
        }

        let factor: Factor = extracted
            .factor
            .ok_or_else(|| DuoError::invalid_request("request does not name a Duo factor"))?
            .parse()?;

        let device = match extracted.device {
            None if config.auto_authentication && factor != Factor::Passcode => {
                Some(DEVICE_AUTO.to_string())
            }
            other => other.map(str::to_string),
        };

        debug!(
            username,
            %factor,
            device = device.as_deref(),
            passcode = extracted.passcode.is_some(),
            "Extracted Duo request context"
        );

        AuthenticationRequestParams::new(
            username,
            factor,
            device,
            extracted.passcode.map(str::to_string),
        )
    }
}
