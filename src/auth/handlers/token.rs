/**
 * Token Handler
 *
 * Implements POST /jwt. The endpoint is deliberately unguarded: it is the
 * flow that produces a credential, so nothing can be required before it.
 *
 * # Process
 *
 * 1. Take the identifying claims from the request body; an `email` claim is
 *    mandatory
 * 2. Issue a signed token with a fixed 10-day lifetime
 * 3. Set the token as an http-only cookie and acknowledge with
 *    `{"success": true}`
 */

use axum::{
    extract::State,
    http::header::{self, HeaderName},
    response::{AppendHeaders, Json},
};
use serde_json::{Map, Value};

use crate::auth::handlers::types::TokenIssued;
use crate::auth::tokens::{issue_token, TOKEN_TTL};
use crate::error::ApiError;
use crate::server::state::AppState;

/// Issue a session token for the supplied identity claims
///
/// # Errors
///
/// * `400 Bad Request` - The body has no string `email` claim
/// * `500 Internal Server Error` - Token signing failed
pub async fn issue_session_token(
    State(state): State<AppState>,
    Json(mut claims): Json<Map<String, Value>>,
) -> Result<(AppendHeaders<[(HeaderName, String); 1]>, Json<TokenIssued>), ApiError> {
    let email = claims
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| {
            tracing::warn!("Token request without an email claim");
            ApiError::invalid_request("Request body must include an email")
        })?;
    claims.remove("email");

    let token = issue_token(&state.jwt_secret, email.clone(), claims, TOKEN_TTL)?;
    tracing::info!("Issued session token for {}", email);

    let mut cookie = format!(
        "token={token}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        TOKEN_TTL.as_secs()
    );
    if state.secure_cookies {
        cookie.push_str("; Secure");
    }

    Ok((
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Json(TokenIssued { success: true }),
    ))
}
