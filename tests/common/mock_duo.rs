//! Mock Duo Auth API backed by wiremock

use chrono::{DateTime, Utc};
use duo_authapi::config::HttpConfig;
use duo_authapi::{ApiParams, AuthenticationEngine, Credential, DuoClient, sign_request};
use serde_json::Value;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

use super::fixtures;

pub const PREAUTH_PATH: &str = "/auth/v2/preauth";
pub const AUTH_PATH: &str = "/auth/v2/auth";

/// Matches only requests whose `Authorization` header verifies against the credential
pub struct ValidSignature {
    credential: Credential,
}

impl ValidSignature {
    pub fn new(credential: Credential) -> Self {
        Self { credential }
    }
}

impl Match for ValidSignature {
    fn matches(&self, request: &Request) -> bool {
        let Some(date) = request.headers.get("date").and_then(|v| v.to_str().ok()) else {
            return false;
        };
        let Some(authorization) = request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
        else {
            return false;
        };
        let Ok(timestamp) = DateTime::parse_from_rfc2822(date) else {
            return false;
        };

        let params: ApiParams = url::form_urlencoded::parse(&request.body)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        match sign_request(
            request.method.as_str(),
            self.credential.api_host(),
            request.url.path(),
            &params,
            &self.credential,
            timestamp.with_timezone(&Utc),
        ) {
            Ok(expected) => expected.authorization == authorization && expected.date == date,
            Err(_) => false,
        }
    }
}

/// A running mock provider
pub struct MockDuo {
    pub server: MockServer,
}

impl MockDuo {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// HTTP settings that route requests to the mock server
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            api_base: Some(self.server.uri()),
            ..HttpConfig::default()
        }
    }

    pub fn client(&self) -> DuoClient {
        self.client_with(self.http_config())
    }

    pub fn client_with(&self, config: HttpConfig) -> DuoClient {
        DuoClient::new(fixtures::credential(), &config).unwrap()
    }

    pub fn engine(&self) -> AuthenticationEngine {
        AuthenticationEngine::new(self.client())
    }

    /// Signed POSTs to `endpoint` get `template`, exactly `times` times
    pub async fn respond(&self, endpoint: &str, template: ResponseTemplate, times: u64) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(header_exists("date"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(ValidSignature::new(fixtures::credential()))
            .respond_with(template)
            .expect(times)
            .mount(&self.server)
            .await;
    }

    pub async fn preauth_returns(&self, body: Value, times: u64) {
        let template = ResponseTemplate::new(200).set_body_json(body);
        self.respond(PREAUTH_PATH, template, times).await;
    }

    pub async fn auth_returns(&self, body: Value, times: u64) {
        let template = ResponseTemplate::new(200).set_body_json(body);
        self.respond(AUTH_PATH, template, times).await;
    }

    /// Fail the test if `/auth` is ever called
    pub async fn auth_never_called(&self) {
        Mock::given(path(AUTH_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.server)
            .await;
    }
}
