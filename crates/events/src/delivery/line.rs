//! LINE Messaging API broadcast delivery.
//!
//! [`LineDelivery`] pushes a plain-text message to every follower of the
//! configured channel via `POST /v2/bot/message/broadcast`. Exactly one
//! attempt per message; the caller decides what a failure means.
//! Configuration is loaded from environment variables; if `LINE_TOKEN` is
//! not set, [`LineConfig::from_env`] returns `None` and no delivery client
//! should be constructed.

use std::time::Duration;

/// HTTP request timeout for a single broadcast attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Production broadcast endpoint.
pub const DEFAULT_BROADCAST_URL: &str = "https://api.line.me/v2/bot/message/broadcast";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for LINE delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The LINE API returned a non-2xx status code.
    #[error("LINE API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

// ---------------------------------------------------------------------------
// LineConfig
// ---------------------------------------------------------------------------

/// Configuration for the LINE broadcast delivery service.
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// Channel access token (long-lived, from the LINE developer console).
    pub token: String,
    /// Broadcast endpoint, overridable for tests.
    pub broadcast_url: String,
}

impl LineConfig {
    /// Load configuration from environment variables.
    ///
    /// Returns `None` if `LINE_TOKEN` is not set (or empty), signalling
    /// that LINE delivery is not configured and should be skipped.
    ///
    /// | Env Var              | Required | Default                 |
    /// |----------------------|----------|-------------------------|
    /// | `LINE_TOKEN`         | yes      | --                      |
    /// | `LINE_BROADCAST_URL` | no       | LINE broadcast endpoint |
    pub fn from_env() -> Option<Self> {
        let token = std::env::var("LINE_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())?;
        Some(Self {
            token,
            broadcast_url: std::env::var("LINE_BROADCAST_URL")
                .unwrap_or_else(|_| DEFAULT_BROADCAST_URL.to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// LineDelivery
// ---------------------------------------------------------------------------

/// Delivers broadcast messages to the LINE channel.
pub struct LineDelivery {
    client: reqwest::Client,
    config: LineConfig,
}

impl LineDelivery {
    /// Create a new delivery service with a pre-configured HTTP client.
    pub fn new(config: LineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Broadcast a single text message to all channel followers.
    pub async fn broadcast_text(&self, text: &str) -> Result<(), LineError> {
        let payload = serde_json::json!({
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .client
            .post(&self.config.broadcast_url)
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(LineError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
