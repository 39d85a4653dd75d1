//! reCAPTCHA v3 `siteverify` client.
//!
//! One form-encoded POST per verification; no internal retry. The backend
//! omits the score and diagnostics on failed verifications, so the raw
//! response is all-optional past `success` and coerces into a fully
//! populated [`VerifyOutcome`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::scorer::{AbuseScorer, ScorerError, VerifyOutcome};

/// HTTP request timeout for a single verification call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Google's production verification endpoint.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

// ---------------------------------------------------------------------------
// RecaptchaConfig
// ---------------------------------------------------------------------------

/// Configuration for the reCAPTCHA verifier.
#[derive(Debug, Clone)]
pub struct RecaptchaConfig {
    /// Server-side secret paired with the site key.
    pub secret: String,
    /// Verification endpoint, overridable for tests and staging.
    pub verify_url: String,
}

impl RecaptchaConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default               |
    /// |------------------------|----------|-----------------------|
    /// | `RECAPTCHA_SECRET`     | **yes**  | --                    |
    /// | `RECAPTCHA_VERIFY_URL` | no       | Google siteverify URL |
    ///
    /// # Panics
    ///
    /// Panics if `RECAPTCHA_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("RECAPTCHA_SECRET")
            .expect("RECAPTCHA_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "RECAPTCHA_SECRET must not be empty");

        let verify_url = std::env::var("RECAPTCHA_VERIFY_URL")
            .unwrap_or_else(|_| DEFAULT_VERIFY_URL.to_string());

        Self { secret, verify_url }
    }
}

// ---------------------------------------------------------------------------
// RecaptchaVerifier
// ---------------------------------------------------------------------------

/// Raw response body from the `siteverify` endpoint.
#[derive(Debug, Deserialize)]
struct SiteverifyResponse {
    #[serde(default)]
    success: bool,
    score: Option<f64>,
    hostname: Option<String>,
    action: Option<String>,
    #[serde(rename = "error-codes")]
    error_codes: Option<Vec<String>>,
}

impl From<SiteverifyResponse> for VerifyOutcome {
    fn from(raw: SiteverifyResponse) -> Self {
        Self {
            success: raw.success,
            score: raw.score.unwrap_or(0.0),
            hostname: raw
                .hostname
                .map(|h| h.trim().to_string())
                .unwrap_or_default(),
            action: raw.action.map(|a| a.trim().to_string()).unwrap_or_default(),
        }
    }
}

/// HTTP client for the reCAPTCHA `siteverify` endpoint.
pub struct RecaptchaVerifier {
    client: reqwest::Client,
    config: RecaptchaConfig,
}

impl RecaptchaVerifier {
    /// Create a new verifier with a pre-configured HTTP client.
    pub fn new(config: RecaptchaConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }
}

#[async_trait]
impl AbuseScorer for RecaptchaVerifier {
    async fn verify(
        &self,
        token: &str,
        remote_ip: Option<&str>,
    ) -> Result<VerifyOutcome, ScorerError> {
        let mut params: Vec<(&str, &str)> = vec![
            ("secret", self.config.secret.as_str()),
            ("response", token),
        ];
        if let Some(ip) = remote_ip {
            params.push(("remoteip", ip));
        }

        let response = self
            .client
            .post(&self.config.verify_url)
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ScorerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let raw = response.json::<SiteverifyResponse>().await?;
        if let Some(codes) = &raw.error_codes {
            tracing::debug!(codes = ?codes, "siteverify reported error codes");
        }
        Ok(raw.into())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
