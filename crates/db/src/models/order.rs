//! Order entity model and DTOs.

use eventworks_core::intake::NormalizedOrder;
use eventworks_core::types::{OrderId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `orders` table.
///
/// Serializes in the camelCase shape the admin UI consumes; the submitted
/// request type keeps its wire name `type`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub request_type: String,
    pub budget_range: String,
    pub deadline: String,
    pub meeting: String,
    pub details: String,
    pub meeting_unavailable: String,
    pub status: String,
    pub admin_memo: String,
    pub abuse_score: f64,
    pub scorer_hostname: String,
    pub scorer_action: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload for a new order: the normalized submission plus the
/// abuse-scorer verdict recorded for audit. Built server-side after
/// verification; never deserialized from the wire.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub submission: NormalizedOrder,
    pub abuse_score: f64,
    pub scorer_hostname: String,
    pub scorer_action: String,
}

/// DTO for the admin review edit: status and memo are always written
/// together, unconditionally (last write wins).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderReview {
    pub status: String,
    pub admin_memo: String,
}

/// Query parameters for listing orders.
#[derive(Debug, Deserialize)]
pub struct OrderListParams {
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
