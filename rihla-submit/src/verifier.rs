use async_trait::async_trait;
use rihla_core::{evaluate_verdict, AbuseVerifier, TrustScore, VerifyError};
use serde::Deserialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Settings for the external verification call.
#[derive(Debug, Clone)]
pub struct VerifierSettings {
    pub endpoint: String,
    pub secret: String,
    pub min_score: f64,
    pub timeout: Duration,
}

/// Verdict body from the verification service. `score` defaults to 0.0 when
/// the service omits it on failure, which fails closed through the policy.
#[derive(Debug, Deserialize)]
struct VerdictBody {
    success: bool,
    #[serde(default)]
    score: f64,
}

/// Verifier backed by the hosted scoring service: one `POST` carrying the
/// server secret and the visitor token, urlencoded, JSON verdict back.
/// No automatic retry; the per-request timeout bounds the call.
pub struct HttpAbuseVerifier {
    http: reqwest::Client,
    settings: VerifierSettings,
}

impl HttpAbuseVerifier {
    pub fn new(settings: VerifierSettings) -> Result<Self, VerifyError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| VerifyError::Transport(e.to_string()))?;
        Ok(Self { http, settings })
    }
}

#[async_trait]
impl AbuseVerifier for HttpAbuseVerifier {
    async fn verify(&self, token: &str) -> Result<TrustScore, VerifyError> {
        let response = self
            .http
            .post(&self.settings.endpoint)
            .form(&[
                ("secret", self.settings.secret.as_str()),
                ("response", token),
            ])
            .send()
            .await
            .map_err(|e| VerifyError::Transport(e.to_string()))?;

        let verdict: VerdictBody = response
            .json()
            .await
            .map_err(|e| VerifyError::BadResponse(e.to_string()))?;

        evaluate_verdict(verdict.success, verdict.score, self.settings.min_score)
    }
}

/// Fixed-verdict verifier for tests and no-provider environments. Counts
/// calls so tests can assert the missing-token short-circuit.
pub struct StaticVerifier {
    success: bool,
    score: f64,
    min_score: f64,
    calls: AtomicUsize,
}

impl StaticVerifier {
    pub fn passing() -> Self {
        Self::scoring(0.9)
    }

    pub fn scoring(score: f64) -> Self {
        Self {
            success: true,
            score,
            min_score: rihla_core::DEFAULT_MIN_SCORE,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            success: false,
            score: 0.0,
            min_score: rihla_core::DEFAULT_MIN_SCORE,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AbuseVerifier for StaticVerifier {
    async fn verify(&self, _token: &str) -> Result<TrustScore, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        evaluate_verdict(self.success, self.score, self.min_score)
    }
}
