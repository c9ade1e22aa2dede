/**
 * Authentication Handler Types
 *
 * Response types shared by the token and registration handlers.
 */

use serde::Serialize;
use uuid::Uuid;

/// Returned by the token endpoint once a session cookie has been set.
#[derive(Serialize, Debug)]
pub struct TokenIssued {
    /// Always true on success
    pub success: bool,
}

/// Returned by the registration endpoint.
#[derive(Serialize, Debug)]
pub struct RegisterResponse {
    /// Human-readable confirmation
    pub message: String,
    /// Identifier assigned to the new record
    #[serde(rename = "userId")]
    pub user_id: Uuid,
}
