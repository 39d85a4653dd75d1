//! Route definitions for admin order review.
//!
//! Mounted at `/admin` by `api_routes()`.

use axum::routing::get;
use axum::Router;

use crate::handlers::admin_orders;
use crate::state::AppState;

/// Admin order review routes.
///
/// ```text
/// GET    /orders            -> list_orders
/// GET    /orders/{id}       -> get_order
/// PUT    /orders/{id}       -> update_order_review
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(admin_orders::list_orders))
        .route(
            "/orders/{id}",
            get(admin_orders::get_order).put(admin_orders::update_order_review),
        )
}
