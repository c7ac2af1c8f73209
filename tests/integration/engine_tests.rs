//! End-to-end attempts through the decision engine

use crate::assert_failed_with;
use crate::common::fixtures;
use crate::common::mock_duo::{AUTH_PATH, MockDuo, PREAUTH_PATH};
use duo_authapi::{Disposition, DuoResponse, Verdict};
use std::time::Duration;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn test_bypass_user_is_allowed_without_auth_call() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_allow(), 1).await;
    duo.auth_never_called().await;

    let outcome = duo.engine().authenticate(&fixtures::alice_auto()).await;

    assert_eq!(outcome.verdict, Verdict::Allowed { bypass: true });
    let response = outcome.response.expect("preauth response");
    assert!(response.is_bypass());
    assert_eq!(response.status_message(), "Allowing unknown user");
}

#[tokio::test]
async fn test_push_challenge_issues_exactly_one_auth_call() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.auth_returns(fixtures::auth_allow(), 1).await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;

    assert_eq!(outcome.verdict, Verdict::Allowed { bypass: false });
    match outcome.response {
        Some(DuoResponse::Auth(result)) => {
            assert_eq!(result.status_message, "Success. Logging you in...")
        }
        other => panic!("expected auth response, got {:?}", other),
    }
}

#[tokio::test]
async fn test_auth_bypass_status_is_recorded() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.auth_returns(fixtures::auth_bypass(), 1).await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_eq!(outcome.verdict, Verdict::Allowed { bypass: true });
}

#[tokio::test]
async fn test_preauth_deny_stops_attempt() {
    let duo = MockDuo::start().await;
    let preauth = fixtures::preauth_deny("no devices");
    duo.preauth_returns(preauth, 1).await;
    duo.auth_never_called().await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_eq!(
        outcome.verdict,
        Verdict::Denied {
            reason: "no devices".to_string()
        }
    );
    assert_eq!(outcome.verdict.disposition(), Disposition::Rejected);
}

#[tokio::test]
async fn test_enrollment_routes_to_remediation() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_enroll(), 1).await;
    duo.auth_never_called().await;

    let outcome = duo.engine().authenticate(&fixtures::alice_auto()).await;
    assert_eq!(
        outcome.verdict,
        Verdict::EnrollmentRequired {
            portal_url: Some(fixtures::ENROLL_PORTAL_URL.to_string()),
            message: "Enroll an authentication device to proceed".to_string(),
        }
    );
    assert_eq!(outcome.verdict.disposition(), Disposition::Remediation);
}

#[tokio::test]
async fn test_auth_deny() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.auth_returns(fixtures::auth_deny(), 1).await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_eq!(
        outcome.verdict,
        Verdict::Denied {
            reason: "Login request denied.".to_string()
        }
    );
}

#[tokio::test]
async fn test_provider_rejection_fails_attempt() {
    let duo = MockDuo::start().await;
    duo.respond(
        PREAUTH_PATH,
        ResponseTemplate::new(400).set_body_json(fixtures::failure(
            40103,
            "Invalid signature in request credentials",
            "",
        )),
        1,
    )
    .await;
    duo.auth_never_called().await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_failed_with!(outcome.verdict, "provider_rejected");
    assert_eq!(outcome.verdict.disposition(), Disposition::Error);
}

#[tokio::test]
async fn test_auth_outage_after_preauth_is_error_not_denial() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.respond(AUTH_PATH, ResponseTemplate::new(502), 1).await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_failed_with!(outcome.verdict, "transport");
    assert!(matches!(outcome.response, Some(DuoResponse::Preauth(_))));
}

#[tokio::test]
async fn test_unknown_result_fails_closed() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.auth_returns(
        fixtures::ok(serde_json::json!({ "result": "waiting", "status": "pushed" })),
        1,
    )
    .await;

    let outcome = duo.engine().authenticate(&fixtures::alice_push()).await;
    assert_failed_with!(outcome.verdict, "unexpected_status");
}

#[tokio::test]
async fn test_deadline_aborts_slow_push() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_auth(), 1).await;
    duo.respond(
        AUTH_PATH,
        ResponseTemplate::new(200)
            .set_body_json(fixtures::auth_allow())
            .set_delay(Duration::from_secs(10)),
        1,
    )
    .await;

    let outcome = duo
        .engine()
        .authenticate_with_deadline(&fixtures::alice_push(), Duration::from_millis(500))
        .await;
    assert_failed_with!(outcome.verdict, "timeout");
}

#[tokio::test]
async fn test_cancellation_aborts_attempt() {
    let duo = MockDuo::start().await;
    duo.respond(
        PREAUTH_PATH,
        ResponseTemplate::new(200)
            .set_body_json(fixtures::preauth_allow())
            .set_delay(Duration::from_secs(10)),
        1,
    )
    .await;

    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        let _ = tx.send(());
    });

    let outcome = duo
        .engine()
        .authenticate_until(&fixtures::alice_auto(), async {
            let _ = rx.await;
        })
        .await;
    assert_failed_with!(outcome.verdict, "cancelled");
}

#[tokio::test]
async fn test_concurrent_attempts_share_one_engine() {
    let duo = MockDuo::start().await;
    duo.preauth_returns(fixtures::preauth_allow(), 4).await;

    let engine = duo.engine();
    let params = fixtures::alice_auto();
    let outcomes = authenticate_concurrently(&engine, &params).await;

    assert!(outcomes.iter().all(|o| o.verdict.is_bypass()));
}

async fn authenticate_concurrently(
    engine: &duo_authapi::AuthenticationEngine,
    params: &duo_authapi::AuthenticationRequestParams,
) -> Vec<duo_authapi::AuthenticationOutcome> {
    let (a, b, c, d) = tokio::join!(
        engine.authenticate(params),
        engine.authenticate(params),
        engine.authenticate(params),
        engine.authenticate(params),
    );
    vec![a, b, c, d]
}
