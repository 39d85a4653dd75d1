//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use eventworks_core::error::CoreError;

use crate::auth::VerifiedIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Extracts a [`VerifiedIdentity`] from a Bearer token in the `Authorization`
/// header, verified through the state's [`IdentityVerifier`].
///
/// ```ignore
/// async fn my_handler(identity: VerifiedIdentity) -> AppResult<Json<()>> {
///     tracing::info!(subject = %identity.subject, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// [`IdentityVerifier`]: crate::auth::IdentityVerifier
impl FromRequestParts<AppState> for VerifiedIdentity {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let identity = state.verifier.verify(token).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(identity)
    }
}
