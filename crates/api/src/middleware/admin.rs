//! Admin allow-list extractor.
//!
//! Wraps the verified identity and rejects subjects that are not on the
//! configured admin allow-list. There are no roles; admin access is a flat
//! list of subjects from `ADMIN_SUBJECTS`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventworks_core::error::CoreError;

use crate::auth::VerifiedIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a subject on the admin allow-list. Rejects with 403 Forbidden
/// otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(admin): RequireAdmin) -> AppResult<Json<()>> {
///     // admin.subject is guaranteed to be allow-listed here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub VerifiedIdentity);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identity = VerifiedIdentity::from_request_parts(parts, state).await?;
        if !state.config.auth.is_admin(&identity.subject) {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin access required".into(),
            )));
        }
        Ok(RequireAdmin(identity))
    }
}
