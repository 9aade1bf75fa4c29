use async_trait::async_trait;

/// Default acceptance threshold for the external trust score, inclusive.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

/// Continuous confidence value in [0, 1] reported by the verification
/// service for an accepted token.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrustScore(pub f64);

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("verification call failed: {0}")]
    Transport(String),
    #[error("verification response malformed: {0}")]
    BadResponse(String),
    #[error("verification rejected (success={success}, score={score})")]
    Rejected { success: bool, score: f64 },
}

/// Anti-automation check against an external scoring service.
///
/// Implementations must fail closed: anything short of a definitive pass is
/// an error, never a degraded pass.
#[async_trait]
pub trait AbuseVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<TrustScore, VerifyError>;
}

/// Threshold policy over the raw service verdict. Accepts only a reported
/// success with a score at or above `min_score`.
pub fn evaluate_verdict(
    success: bool,
    score: f64,
    min_score: f64,
) -> Result<TrustScore, VerifyError> {
    if success && score >= min_score {
        Ok(TrustScore(score))
    } else {
        Err(VerifyError::Rejected { success, score })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_at_threshold_passes() {
        assert!(evaluate_verdict(true, 0.5, DEFAULT_MIN_SCORE).is_ok());
    }

    #[test]
    fn score_just_below_threshold_is_rejected() {
        let err = evaluate_verdict(true, 0.49, DEFAULT_MIN_SCORE).unwrap_err();
        assert!(matches!(err, VerifyError::Rejected { score, .. } if score == 0.49));
    }

    #[test]
    fn service_failure_is_rejected_regardless_of_score() {
        assert!(evaluate_verdict(false, 0.9, DEFAULT_MIN_SCORE).is_err());
    }
}
