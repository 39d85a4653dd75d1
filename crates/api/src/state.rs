use std::sync::Arc;

use eventworks_recaptcha::AbuseScorer;

use crate::auth::IdentityVerifier;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
///
/// The scorer and verifier are trait objects so tests can swap in scripted
/// implementations without touching real backends.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: eventworks_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Abuse scorer consulted before accepting an order submission.
    pub scorer: Arc<dyn AbuseScorer>,
    /// Verifier for admin bearer tokens.
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Event bus carrying post-commit order events.
    pub event_bus: Arc<eventworks_events::EventBus>,
}
