//! Pre-authentication / authentication decision engine
//!
//! An attempt is a linear sequence of at most two calls: `/preauth`, then
//! `/auth` only when pre-authentication asks for a factor challenge. Every
//! error is terminal for the attempt and becomes [`Verdict::Failed`]; a
//! denial is only ever produced from an explicit provider verdict.

mod verdict;

pub use verdict::{AuthenticationOutcome, Disposition, Verdict};

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

use crate::core::client::{DuoClient, HttpTransport, ReqwestTransport};
use crate::core::error::{DuoError, Result};
use crate::core::models::{AuthDecision, AuthResult, DuoResponse, PreauthDecision, PreauthResult};
use crate::core::request::AuthenticationRequestParams;

/// Verdict implied by a pre-authentication result, or `None` to continue to `/auth`
pub fn preauth_verdict(result: &PreauthResult) -> Option<Verdict> {
    match &result.result {
        PreauthDecision::Allow => Some(Verdict::Allowed { bypass: true }),
        PreauthDecision::Deny => Some(Verdict::Denied {
            reason: result.status_message.clone(),
        }),
        PreauthDecision::Enroll => Some(Verdict::EnrollmentRequired {
            portal_url: result.enroll_portal_url.clone(),
            message: result.status_message.clone(),
        }),
        PreauthDecision::Auth => None,
        PreauthDecision::Other(value) => {
            Some(Verdict::Failed(DuoError::unexpected("result", value.clone())))
        }
    }
}

/// Verdict implied by an authentication result
pub fn auth_verdict(result: &AuthResult) -> Verdict {
    match &result.result {
        AuthDecision::Allow => Verdict::Allowed {
            bypass: result.is_bypass(),
        },
        AuthDecision::Deny => Verdict::Denied {
            reason: result.status_message.clone(),
        },
        AuthDecision::Other(value) => {
            Verdict::Failed(DuoError::unexpected("result", value.clone()))
        }
    }
}

/// Runs authentication attempts against one integration
///
/// Holds no per-attempt state, so one engine can serve concurrent attempts.
#[derive(Debug, Clone)]
pub struct AuthenticationEngine<T: HttpTransport = ReqwestTransport> {
    client: DuoClient<T>,
}

impl<T: HttpTransport> AuthenticationEngine<T> {
    pub fn new(client: DuoClient<T>) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &DuoClient<T> {
        &self.client
    }

    /// Run one attempt to completion
    pub async fn authenticate(
        &self,
        params: &AuthenticationRequestParams,
    ) -> AuthenticationOutcome {
        self.attempt(params, std::future::pending()).await
    }

    /// Run one attempt, giving up once `deadline` elapses
    ///
    /// The in-flight call is dropped on expiry. A pre-authentication that
    /// already completed stays in the outcome.
    pub async fn authenticate_with_deadline(
        &self,
        params: &AuthenticationRequestParams,
        deadline: Duration,
    ) -> AuthenticationOutcome {
        let expired = async move {
            tokio::time::sleep(deadline).await;
            warn!(?deadline, "Duo authentication deadline elapsed");
            DuoError::timeout(format!("authentication did not complete within {:?}", deadline))
        };
        self.attempt(params, expired).await
    }

    /// Run one attempt until it finishes or `cancel` resolves, whichever is first
    pub async fn authenticate_until<F>(
        &self,
        params: &AuthenticationRequestParams,
        cancel: F,
    ) -> AuthenticationOutcome
    where
        F: Future<Output = ()>,
    {
        let cancelled = async move {
            cancel.await;
            warn!("Duo authentication cancelled by caller");
            DuoError::cancelled("authentication cancelled by caller")
        };
        self.attempt(params, cancelled).await
    }

    /// Both calls race `interrupt`, which is polled first
    #[instrument(skip_all, fields(username = %params.username(), factor = %params.factor()))]
    async fn attempt<I>(
        &self,
        params: &AuthenticationRequestParams,
        interrupt: I,
    ) -> AuthenticationOutcome
    where
        I: Future<Output = DuoError>,
    {
        tokio::pin!(interrupt);

        let preauth = match interruptible(&mut interrupt, self.client.preauth(params)).await {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, kind = e.kind(), "Duo pre-authentication failed");
                return AuthenticationOutcome::failed(e, None);
            }
        };
        debug!(
            result = preauth.result.as_str(),
            devices = preauth.devices.len(),
            "Duo pre-authentication completed"
        );

        if let Some(verdict) = preauth_verdict(&preauth) {
            log_verdict("preauth", &verdict);
            return AuthenticationOutcome::new(verdict, Some(preauth.into()));
        }

        let auth = match interruptible(&mut interrupt, self.client.auth(params)).await {
            Ok(result) => result,
            Err(e) => {
                error!(
                    error = %e,
                    kind = e.kind(),
                    "Duo authentication failed after pre-authentication"
                );
                return AuthenticationOutcome::failed(e, Some(DuoResponse::Preauth(preauth)));
            }
        };

        let verdict = auth_verdict(&auth);
        log_verdict("auth", &verdict);
        AuthenticationOutcome::new(verdict, Some(auth.into()))
    }
}

async fn interruptible<I, F, R>(interrupt: &mut Pin<&mut I>, call: F) -> Result<R>
where
    I: Future<Output = DuoError>,
    F: Future<Output = Result<R>>,
{
    tokio::select! {
        biased;
        e = interrupt.as_mut() => Err(e),
        result = call => result,
    }
}

fn log_verdict(phase: &str, verdict: &Verdict) {
    match verdict {
        Verdict::Allowed { bypass: true } => {
            info!(phase, "Duo authentication succeeded via bypass")
        }
        Verdict::Allowed { bypass: false } => info!(phase, "Duo authentication succeeded"),
        Verdict::Denied { reason } => warn!(phase, reason = %reason, "Duo denied authentication"),
        Verdict::EnrollmentRequired { portal_url, .. } => {
            warn!(phase, portal_url = ?portal_url, "Duo requires enrollment")
        }
        Verdict::Failed(e) => {
            error!(phase, error = %e, kind = e.kind(), "Duo returned an unusable result")
        }
    }
}
