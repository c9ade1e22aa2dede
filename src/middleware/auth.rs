/**
 * Access Guard Middleware
 *
 * One verification path gates every protected operation on both transports.
 * This module implements the HTTP side: it extracts a bearer credential from
 * the Authorization header, verifies it, and attaches the verified claims to
 * the request before any task logic runs. The WebSocket transport reuses
 * `bearer_token` and `verify_token` at handshake time
 * (see `crate::realtime::socket`).
 *
 * # Failure Modes
 *
 * - Header absent: `MissingCredential`, 401, the handler never runs
 * - Header present but not `Bearer <token>`: `InvalidToken`
 * - Signature mismatch or expiry: `InvalidToken` / `TokenExpired`
 *
 * A rejected request has no observable side effect.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::tokens::{verify_token, Claims};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Verified principal attached to a request or connection after the guard
/// has accepted its credential.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    /// Principal identifier from the token
    pub email: String,
    /// Full verified claim set
    pub claims: Claims,
}

/// Extract the bearer credential from an Authorization header.
///
/// Distinguishes an absent header (`MissingCredential`) from a header that
/// does not carry a bearer token (`InvalidToken`).
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers.get(AUTHORIZATION).ok_or(ApiError::MissingCredential)?;
    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(ApiError::InvalidToken)
}

/// Authentication middleware for protected routes
///
/// On success the verified claims are attached to the request extensions as
/// [`AuthenticatedUser`]; on any failure the underlying handler is not
/// invoked and a 401 response is returned.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers()).map_err(|e| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
        e
    })?;

    let claims = verify_token(&state.jwt_secret, token).map_err(|e| {
        tracing::warn!("Rejected request to {}: {}", request.uri().path(), e);
        e
    })?;

    request.extensions_mut().insert(AuthenticatedUser {
        email: claims.email.clone(),
        claims,
    });

    Ok(next.run(request).await)
}

/// Extractor for the authenticated user set by [`auth_middleware`].
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> FromRequestParts<S> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or(ApiError::MissingCredential)
    }
}
