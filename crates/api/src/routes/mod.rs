pub mod admin_orders;
pub mod health;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /orders                    submit order (public, POST only)
///
/// /admin/orders              list orders (admin only)
/// /admin/orders/{id}         get, update review (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Public intake route.
        .merge(orders::router())
        // Admin review routes (bearer-token gated).
        .nest("/admin", admin_orders::router())
}
