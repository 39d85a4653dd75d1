//! Authentication and authorization primitives.
//!
//! - [`jwt`] -- HS256 verification of admin bearer tokens.
//!
//! [`IdentityVerifier`] is the seam between the HTTP extractors and the
//! concrete token format; tests substitute their own implementation.

pub mod jwt;

use thiserror::Error;

/// Identity established from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    /// Stable subject identifier (the `sub` claim).
    pub subject: String,
}

/// Errors produced while verifying a bearer token.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The token is malformed, has a bad signature, or is expired.
    #[error("Invalid or expired token")]
    InvalidToken,
}

/// Verifies bearer tokens presented on admin routes.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError>;
}

/// Admin authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret used to verify admin tokens.
    pub jwt_secret: String,
    /// Subjects allowed on admin routes, from comma-separated `ADMIN_SUBJECTS`.
    pub admin_subjects: Vec<String>,
}

impl AuthConfig {
    /// Load admin auth configuration from environment variables.
    ///
    /// | Env Var          | Required | Default |
    /// |------------------|----------|---------|
    /// | `JWT_SECRET`     | **yes**  | --      |
    /// | `ADMIN_SUBJECTS` | no       | empty   |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let jwt_secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!jwt_secret.is_empty(), "JWT_SECRET must not be empty");

        let admin_subjects: Vec<String> = std::env::var("ADMIN_SUBJECTS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            jwt_secret,
            admin_subjects,
        }
    }

    /// Whether `subject` is on the admin allow-list.
    pub fn is_admin(&self, subject: &str) -> bool {
        self.admin_subjects.iter().any(|s| s == subject)
    }
}
