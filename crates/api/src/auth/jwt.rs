//! HS256 JWT verification for admin bearer tokens.
//!
//! Admin tokens are HS256-signed JWTs carrying a [`Claims`] payload. The
//! backend only verifies tokens; issuing them happens wherever operators are
//! onboarded. [`mint_token`] exists for integration tests and operator
//! tooling.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::{AuthError, IdentityVerifier, VerifiedIdentity};

/// JWT claims expected in every admin token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- a stable operator identifier.
    pub sub: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// [`IdentityVerifier`] backed by `jsonwebtoken` HS256 validation.
pub struct JwtVerifier {
    decoding_key: DecodingKey,
}

impl JwtVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl IdentityVerifier for JwtVerifier {
    fn verify(&self, token: &str) -> Result<VerifiedIdentity, AuthError> {
        let token_data = decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::default(), // HS256, validates exp
        )
        .map_err(|_| AuthError::InvalidToken)?;

        Ok(VerifiedIdentity {
            subject: token_data.claims.sub,
        })
    }
}

/// Mint an HS256 admin token for the given subject.
///
/// The server never issues tokens itself; this is for integration tests and
/// operator tooling.
pub fn mint_token(
    secret: &str,
    subject: &str,
    expiry_mins: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: subject.to_string(),
        exp: now + expiry_mins * 60,
        iat: now,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
