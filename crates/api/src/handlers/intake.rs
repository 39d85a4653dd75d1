//! Public order intake endpoint.
//!
//! `POST /api/v1/orders` runs the submission pipeline: token presence gate,
//! abuse verification, normalization, validation, persistence, event
//! publication. The endpoint speaks the public form's compact wire format
//! (`{"ok": ...}`), not the admin `{"data": ...}` envelope, so it carries its
//! own response and rejection types instead of
//! [`AppError`](crate::error::AppError).

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use eventworks_core::intake::{clean_string, first_missing_field, normalize_order};
use eventworks_core::types::OrderId;
use eventworks_db::models::order::NewOrder;
use eventworks_db::repositories::OrderRepo;
use eventworks_events::OrderCreated;
use eventworks_recaptcha::ScorerError;

use crate::state::AppState;

/// Wire name of the abuse-token field.
pub const TOKEN_FIELD: &str = "recaptchaToken";

/// Action name the public form passes to the scoring widget. A mismatch is
/// logged for audit, never used to reject.
const EXPECTED_ACTION: &str = "create_order";

/// Raw intake request body.
///
/// Both fields default to `Value::Null` so the pipeline decides what is
/// missing; serde only rejects bodies that are not JSON at all.
#[derive(Debug, Deserialize)]
pub struct IntakeRequest {
    #[serde(default, rename = "recaptchaToken")]
    pub recaptcha_token: Value,
    #[serde(default)]
    pub order: Value,
}

/// Success payload: `{"ok": true, "id": "<uuid>"}`.
#[derive(Debug, Serialize)]
pub struct IntakeAccepted {
    pub ok: bool,
    pub id: OrderId,
}

/// Why a submission was refused, in the public wire format.
#[derive(Debug)]
pub enum IntakeRejection {
    /// The body was not parseable JSON.
    InvalidBody,
    /// The token or a required order field was absent after cleaning.
    MissingField(&'static str),
    /// The abuse scorer refused the submission.
    Blocked {
        reason: BlockReason,
        score: Option<f64>,
    },
    /// Scorer transport fault or store write failure.
    Internal(String),
}

/// Block reasons exposed to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    VerificationFailed,
    LowScore,
}

impl BlockReason {
    pub fn as_str(self) -> &'static str {
        match self {
            BlockReason::VerificationFailed => "verification_failed",
            BlockReason::LowScore => "low_score",
        }
    }
}

impl IntoResponse for IntakeRejection {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            IntakeRejection::InvalidBody => (
                StatusCode::BAD_REQUEST,
                json!({"ok": false, "error": "Invalid JSON body"}),
            ),
            IntakeRejection::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                json!({"ok": false, "error": format!("Missing {field}")}),
            ),
            IntakeRejection::Blocked { reason, score } => {
                let mut body = json!({
                    "ok": false,
                    "blocked": true,
                    "reason": reason.as_str(),
                });
                // `score` is only present on low-score blocks.
                if let Some(score) = score {
                    body["score"] = json!(score);
                }
                (StatusCode::FORBIDDEN, body)
            }
            IntakeRejection::Internal(detail) => {
                tracing::error!(error = %detail, "Order intake failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"ok": false, "error": "Internal error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for IntakeRejection {
    fn from(err: sqlx::Error) -> Self {
        IntakeRejection::Internal(err.to_string())
    }
}

impl From<ScorerError> for IntakeRejection {
    fn from(err: ScorerError) -> Self {
        IntakeRejection::Internal(err.to_string())
    }
}

/// First entry of `x-forwarded-for`, trimmed. `None` when absent or empty.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    let forwarded = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = forwarded.split(',').next()?.trim();
    if first.is_empty() {
        return None;
    }
    Some(first.to_string())
}

// ---------------------------------------------------------------------------
// POST /api/v1/orders
// ---------------------------------------------------------------------------

/// Accept an order submission from the public site.
pub async fn create_order(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<IntakeRequest>, JsonRejection>,
) -> Result<Json<IntakeAccepted>, IntakeRejection> {
    let Json(request) = body.map_err(|err| {
        tracing::warn!(error = %err, "Order intake rejected: unparseable body");
        IntakeRejection::InvalidBody
    })?;

    // Token presence gate. An empty token never reaches the scorer.
    let token = clean_string(Some(&request.recaptcha_token));
    if token.is_empty() {
        tracing::warn!("Order intake rejected: missing {TOKEN_FIELD}");
        return Err(IntakeRejection::MissingField(TOKEN_FIELD));
    }

    let remote_ip = client_ip(&headers);
    let outcome = state.scorer.verify(&token, remote_ip.as_deref()).await?;
    tracing::info!(
        success = outcome.success,
        score = outcome.score,
        hostname = %outcome.hostname,
        action = %outcome.action,
        "Abuse verification completed"
    );
    if outcome.action != EXPECTED_ACTION {
        tracing::debug!(action = %outcome.action, "Unexpected scorer action");
    }

    if !outcome.success {
        tracing::warn!("Order intake blocked: verification failed");
        return Err(IntakeRejection::Blocked {
            reason: BlockReason::VerificationFailed,
            score: None,
        });
    }
    if outcome.score < state.config.score_threshold {
        tracing::warn!(score = outcome.score, "Order intake blocked: low score");
        return Err(IntakeRejection::Blocked {
            reason: BlockReason::LowScore,
            score: Some(outcome.score),
        });
    }

    let submission = normalize_order(&request.order);
    if let Some(field) = first_missing_field(&submission) {
        tracing::warn!(field, "Order intake rejected: missing required field");
        return Err(IntakeRejection::MissingField(field));
    }

    let order = OrderRepo::create(
        &state.pool,
        &NewOrder {
            submission,
            abuse_score: outcome.score,
            scorer_hostname: outcome.hostname,
            scorer_action: outcome.action,
        },
    )
    .await?;

    // The row is committed at this point; notification is the notifier
    // task's problem and cannot affect the response.
    state.event_bus.publish(OrderCreated {
        order_id: order.id,
        name: order.name.clone(),
        request_type: order.request_type.clone(),
        budget_range: order.budget_range.clone(),
        deadline: order.deadline.clone(),
        created_at: order.created_at,
    });

    tracing::info!(order_id = %order.id, "Order stored");
    Ok(Json(IntakeAccepted {
        ok: true,
        id: order.id,
    }))
}
