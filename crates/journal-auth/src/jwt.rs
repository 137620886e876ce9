//! Bearer token minting and verification.
//!
//! Tokens are HMAC-signed with the service secret. Verification accepts only
//! the HS256, HS384 and HS512 algorithms, so a token whose header names any
//! other algorithm (including `none` or an asymmetric scheme) is rejected
//! before its signature is considered.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use journal_core::AppError;

use crate::claims::Claims;

pub const ACCEPTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
    validation.set_required_spec_claims(&["exp"]);
    validation
}

/// Creates an HS256 token for `email` that expires after `ttl`.
pub fn create_token(
    email: &str,
    ttl: Duration,
    secret: &str,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;

    let claims = Claims {
        email: email.to_string(),
        exp: now + ttl.as_secs() as usize,
        iat: now,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::persistence(e).with_message("failed to create token"))
}

/// Verifies signature, algorithm and expiry, returning the embedded claims.
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized("invalid or expired token").with_source(e))
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
