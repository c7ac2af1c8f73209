//! Configuration validation

use reqwest::header::HeaderName;
use url::Url;

use super::models::*;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for DuoConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_host.trim().is_empty() {
            return Err("api_host is required".to_string());
        }
        if self.api_host.contains("://") || self.api_host.contains('/') {
            return Err(format!("api_host must be a bare hostname, got '{}'", self.api_host));
        }
        if self.integration_key.trim().is_empty() {
            return Err("integration_key is required".to_string());
        }
        if self.secret_key.trim().is_empty() {
            return Err("secret_key is required".to_string());
        }
        Ok(())
    }
}

impl Validate for HttpConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("timeout_seconds must be greater than 0".to_string());
        }
        if self.connect_timeout_seconds == 0 {
            return Err("connect_timeout_seconds must be greater than 0".to_string());
        }
        if self.connect_timeout_seconds > self.timeout_seconds {
            return Err("connect_timeout_seconds cannot exceed timeout_seconds".to_string());
        }

        if let Some(api_base) = &self.api_base {
            let url = Url::parse(api_base)
                .map_err(|e| format!("api_base has invalid URL format: {}", e))?;
            match url.scheme() {
                "http" | "https" => {}
                scheme => {
                    return Err(format!(
                        "api_base must use http:// or https:// scheme, got: {}",
                        scheme
                    ));
                }
            }
            if url.host_str().is_none() {
                return Err("api_base URL must have a valid host".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for ExtractionConfig {
    fn validate(&self) -> Result<(), String> {
        if self.use_headers {
            for name in [
                &self.factor_header,
                &self.device_header,
                &self.passcode_header,
            ] {
                HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| format!("'{}' is not a valid header name", name))?;
            }
        }
        if self.use_parameters {
            for name in [
                &self.factor_parameter,
                &self.device_parameter,
                &self.passcode_parameter,
            ] {
                if name.trim().is_empty() {
                    return Err("parameter names cannot be empty".to_string());
                }
            }
        }
        Ok(())
    }
}
