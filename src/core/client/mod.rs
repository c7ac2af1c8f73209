//! Duo Auth API client
//!
//! Signs each call with the integration credential, sends it through the
//! transport and classifies the result. One network call per invocation.

mod transport;

pub use transport::{HttpRequest, HttpTransport, RawResponse, ReqwestTransport, map_network_error};

#[cfg(test)]
pub use transport::MockHttpTransport;

use chrono::Utc;
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error};

use crate::config::HttpConfig;
use crate::core::error::{DuoError, Result};
use crate::core::models::{AuthResult, PreauthResult, parse_envelope};
use crate::core::request::{
    AuthenticationRequestParams, Credential, PARAM_DEVICE, PARAM_FACTOR, PARAM_PASSCODE,
    PARAM_USERNAME,
};
use crate::core::signer::{ApiParams, sign_request};

const HTTP_METHOD: &str = "POST";

/// Auth API endpoints used by the decision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Preauth,
    Auth,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Preauth => "/auth/v2/preauth",
            Endpoint::Auth => "/auth/v2/auth",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Preauth => f.write_str("preauth"),
            Endpoint::Auth => f.write_str("auth"),
        }
    }
}

/// Parameters for `/preauth`: the username only
///
/// `factor` and `device` are left out even when the attempt names them; the
/// challenge they select only happens on `/auth`.
pub fn preauth_params(request: &AuthenticationRequestParams) -> ApiParams {
    let mut params = ApiParams::new();
    params.insert(PARAM_USERNAME, request.username());
    params
}

/// Parameters for `/auth`: username, factor, and device/passcode when present
pub fn auth_params(request: &AuthenticationRequestParams) -> ApiParams {
    let mut params = ApiParams::new();
    params
        .insert(PARAM_USERNAME, request.username())
        .insert(PARAM_FACTOR, request.factor().as_str())
        .insert_opt(PARAM_DEVICE, request.device())
        .insert_opt(PARAM_PASSCODE, request.passcode());
    params
}

/// Client for the Auth API
///
/// Cheap to clone; clones share the credential and the transport's connection pool.
#[derive(Clone)]
pub struct DuoClient<T: HttpTransport = ReqwestTransport> {
    credential: Arc<Credential>,
    base_url: String,
    transport: T,
}

impl DuoClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(credential: Credential, config: &HttpConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Self::with_transport(credential, config.api_base.as_deref(), transport)
    }
}

impl<T: HttpTransport> DuoClient<T> {
    /// Create a client over any transport
    ///
    /// `api_base` replaces `https://<api_host>` as the destination only; the
    /// signature always covers the credential's API host.
    pub fn with_transport(
        credential: Credential,
        api_base: Option<&str>,
        transport: T,
    ) -> Result<Self> {
        credential.validate()?;

        let base_url = match api_base {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}", credential.api_host().to_lowercase()),
        };
        url::Url::parse(&base_url).map_err(|e| {
            DuoError::configuration(format!("Invalid API base '{}': {}", base_url, e))
        })?;

        Ok(Self {
            credential: Arc::new(credential),
            base_url,
            transport,
        })
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn build_url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// Sign, send and parse one call
    pub async fn invoke<R: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        params: &ApiParams,
    ) -> Result<R> {
        let signed = sign_request(
            HTTP_METHOD,
            self.credential.api_host(),
            endpoint.path(),
            params,
            &self.credential,
            Utc::now(),
        )?;

        let request = HttpRequest {
            url: self.build_url(endpoint),
            headers: signed.headers()?,
            body: params.form_body(),
        };

        debug!(%endpoint, url = %request.url, params = params.len(), "Sending Duo request");

        let response = self.transport.execute(request).await.inspect_err(|e| {
            error!(%endpoint, error = %e, "Duo request failed before a response arrived");
        })?;

        parse_envelope(response.status, &response.reason, &response.body)
    }

    pub async fn preauth(&self, request: &AuthenticationRequestParams) -> Result<PreauthResult> {
        let params = preauth_params(request);
        self.invoke(Endpoint::Preauth, &params).await
    }

    pub async fn auth(&self, request: &AuthenticationRequestParams) -> Result<AuthResult> {
        let params = auth_params(request);
        self.invoke(Endpoint::Auth, &params).await
    }
}

impl<T: HttpTransport> fmt::Debug for DuoClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DuoClient")
            .field("credential", &self.credential)
            .field("base_url", &self.base_url)
            .finish()
    }
}
