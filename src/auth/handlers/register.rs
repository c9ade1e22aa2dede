/**
 * Registration Handler
 *
 * Implements POST /users. Registration is an existence check followed by an
 * insert; the record itself is opaque apart from the email key.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::auth::handlers::types::RegisterResponse;
use crate::auth::users::UserStore;
use crate::error::ApiError;

/// Register a new user
///
/// # Errors
///
/// * `400 Bad Request` - Missing email, or the email is already registered
/// * `500 Internal Server Error` - The store failed the lookup or insert
pub async fn register_user(
    State(users): State<Arc<dyn UserStore>>,
    Json(mut record): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<RegisterResponse>), ApiError> {
    let email = record
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::invalid_request("User record must include an email"))?;

    let existing = users.find_by_email(&email).await.map_err(|e| {
        tracing::error!("User lookup failed: {:?}", e);
        ApiError::store_read("Failed to save user")
    })?;
    if existing.is_some() {
        tracing::warn!("Registration rejected, email already exists: {}", email);
        return Err(ApiError::duplicate_user(email));
    }

    record.remove("email");
    let user = users.insert(&email, &record).await.map_err(|e| {
        tracing::error!("User insert failed: {:?}", e);
        ApiError::store_write("Failed to save user")
    })?;

    tracing::info!("User created: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
        }),
    ))
}
