/**
 * Identity Token Service
 *
 * This module issues and verifies the signed identity tokens that gate every
 * protected operation. It is stateless: both operations are pure functions
 * of the shared secret and the clock.
 *
 * # Claims
 *
 * A token carries the principal's email, any extra identifying claims the
 * login flow supplied, and the standard `exp`/`iat` timestamps. The issuing
 * side trusts its caller and performs no validation of claim content beyond
 * reserving the registered claim names.
 *
 * # Verification
 *
 * A token is valid iff its signature matches the shared secret and the
 * current time is before `exp`. Expiry is reported separately from signature
 * failure so the guard can distinguish a stale session from a forged one.
 */

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// How long an issued token stays valid.
pub const TOKEN_TTL: Duration = Duration::from_secs(10 * 24 * 60 * 60);

/// Claims embedded in every identity token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Stable principal identifier.
    pub email: String,
    /// Expiration time (Unix timestamp, seconds).
    pub exp: u64,
    /// Issued-at time (Unix timestamp, seconds).
    pub iat: u64,
    /// Any extra identifying claims supplied at issue time.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Issue a signed identity token.
///
/// # Arguments
/// * `secret` - Shared signing secret
/// * `email` - Principal identifier
/// * `extra` - Additional claims to embed; the registered `email`, `exp` and
///   `iat` names are reserved and removed if present
/// * `ttl` - Token lifetime
///
/// # Returns
/// Signed token string
pub fn issue_token(
    secret: &str,
    email: String,
    mut extra: Map<String, Value>,
    ttl: Duration,
) -> Result<String, ApiError> {
    for reserved in ["email", "exp", "iat"] {
        extra.remove(reserved);
    }

    let now = unix_now();
    let claims = Claims {
        email,
        exp: now + ttl.as_secs(),
        iat: now,
        extra,
    };

    let key = EncodingKey::from_secret(secret.as_ref());
    encode(&Header::default(), &claims, &key).map_err(|e| {
        tracing::error!("Failed to sign identity token: {:?}", e);
        ApiError::internal("Failed to issue token")
    })
}

/// Verify and decode an identity token.
///
/// # Errors
/// * `TokenExpired` - The signature is fine but `exp` has passed
/// * `InvalidToken` - Bad signature, malformed token, or missing claims
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(secret.as_ref());
    let validation = Validation::default();

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Ok(data.claims),
        Err(e) => match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(ApiError::TokenExpired),
            _ => Err(ApiError::InvalidToken),
        },
    }
}
