//! Route definitions for public order intake.
//!
//! Mounted at the `/api/v1` root by `api_routes()`.

use axum::routing::post;
use axum::Router;

use crate::handlers::intake;
use crate::state::AppState;

/// Public intake routes.
///
/// ```text
/// POST   /orders            -> create_order
/// ```
///
/// Only POST is registered; axum answers other methods with 405.
pub fn router() -> Router<AppState> {
    Router::new().route("/orders", post(intake::create_order))
}
