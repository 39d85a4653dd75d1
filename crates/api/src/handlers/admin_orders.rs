//! Admin order review handlers.
//!
//! All routes here sit behind [`RequireAdmin`]; the verified subject is
//! logged on every mutation.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use eventworks_core::error::CoreError;
use eventworks_core::order_status::validate_order_status;
use eventworks_core::paging::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use eventworks_core::types::OrderId;
use eventworks_db::models::order::{OrderListParams, UpdateOrderReview};
use eventworks_db::repositories::OrderRepo;

use crate::error::AppResult;
use crate::middleware::admin::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /api/v1/admin/orders
// ---------------------------------------------------------------------------

/// List orders, newest first, with optional status filter and paging.
pub async fn list_orders(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<OrderListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = params.status.as_deref() {
        validate_order_status(status)?;
    }

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let orders =
        OrderRepo::list_filtered(&state.pool, params.status.as_deref(), limit, offset).await?;

    Ok(Json(DataResponse { data: orders }))
}

// ---------------------------------------------------------------------------
// GET /api/v1/admin/orders/{id}
// ---------------------------------------------------------------------------

/// Fetch a single order by id.
pub async fn get_order(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id,
        })?;

    Ok(Json(DataResponse { data: order }))
}

// ---------------------------------------------------------------------------
// PUT /api/v1/admin/orders/{id}
// ---------------------------------------------------------------------------

/// Overwrite an order's review status and memo. Last write wins.
pub async fn update_order_review(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<OrderId>,
    Json(input): Json<UpdateOrderReview>,
) -> AppResult<impl IntoResponse> {
    validate_order_status(&input.status)?;

    let order = OrderRepo::update_review(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Order",
            id,
        })?;

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        subject = %admin.subject,
        "Order review updated"
    );

    Ok(Json(DataResponse { data: order }))
}
