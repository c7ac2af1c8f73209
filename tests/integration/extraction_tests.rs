//! Inbound extraction feeding a real attempt

use crate::assert_ok;
use crate::common::MockDuo;
use crate::common::fixtures;
use crate::common::mock_duo::{AUTH_PATH, PREAUTH_PATH};
use duo_authapi::config::ExtractionConfig;
use duo_authapi::{Factor, InboundParts, RequestExtractor, Verdict};
use reqwest::header::{HeaderMap, HeaderValue};
use std::collections::HashMap;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_header_selected_factor_reaches_auth_call() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    Mock::given(method("POST"))
        .and(path(AUTH_PATH))
        .and(body_string("device=DPFZRS9FB0D46QFTM891&factor=sms&username=alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::auth_deny()))
        .expect(1)
        .mount(&duo.server)
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("x-shibboleth-duo-factor", HeaderValue::from_static("sms"));
    let parameters = HashMap::from([
        ("duoFactor".to_string(), "push".to_string()),
        ("duoDevice".to_string(), "DPFZRS9FB0D46QFTM891".to_string()),
    ]);

    let inbound = InboundParts::new(headers, parameters);
    let params = assert_ok!(RequestExtractor::default().extract(&inbound, "alice"));
    assert_eq!(params.factor(), Factor::Sms);

    let outcome = duo.engine().authenticate(&params).await;
    assert!(matches!(outcome.verdict, Verdict::Denied { .. }));
}

#[tokio::test]
async fn test_custom_parameter_names() {
    let duo = MockDuo::start().await;
    Mock::given(method("POST"))
        .and(path(PREAUTH_PATH))
        .and(body_string("username=bob"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::preauth_allow()))
        .expect(1)
        .mount(&duo.server)
        .await;

    let extractor = RequestExtractor::new(ExtractionConfig {
        factor_parameter: "factor".to_string(),
        use_headers: false,
        ..ExtractionConfig::default()
    });
    let inbound = InboundParts {
        parameters: HashMap::from([("factor".to_string(), "phone".to_string())]),
        ..InboundParts::default()
    };

    let params = assert_ok!(extractor.extract(&inbound, "bob"));
    assert_eq!(params.factor(), Factor::Phone);
    assert_eq!(params.device(), Some("auto"));

    let outcome = duo.engine().authenticate(&params).await;
    assert!(outcome.is_allowed());
}
