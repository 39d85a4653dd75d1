//! The abuse-scorer seam.

use async_trait::async_trait;

/// Verdict returned by an abuse scorer for one submission token.
///
/// `success = false` is a negative verdict, not an error: the scoring
/// backend was reached and rejected the token. Transport and decode
/// failures surface as [`ScorerError`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyOutcome {
    /// Whether the token passed verification.
    pub success: bool,
    /// Abuse score in `[0.0, 1.0]`; higher means more likely human.
    /// `0.0` when the backend omitted it.
    pub score: f64,
    /// Hostname the token was minted on. Diagnostic only; empty when the
    /// backend omitted it.
    pub hostname: String,
    /// Action name declared by the frontend widget. Diagnostic only; empty
    /// when the backend omitted it.
    pub action: String,
}

/// Errors from the abuse-scorer transport layer.
#[derive(Debug, thiserror::Error)]
pub enum ScorerError {
    /// The HTTP request itself failed (network, DNS, TLS, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The scoring backend returned a non-2xx status code.
    #[error("Scoring backend error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// A client that scores one submission token per call.
///
/// Implementations hold their own credentials and HTTP client; callers
/// inject them as `Arc<dyn AbuseScorer>`.
#[async_trait]
pub trait AbuseScorer: Send + Sync {
    /// Verify a token, optionally forwarding the submitter's IP address.
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<VerifyOutcome, ScorerError>;
}
