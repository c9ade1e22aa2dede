/**
 * Server Error Types
 *
 * This module defines the error taxonomy for the task board server. Errors
 * fall into three groups: authentication failures raised by the access
 * guard, persistence failures raised around the task store, and request
 * validation failures.
 *
 * Every variant maps to an HTTP status code via `status_code()`, and the
 * `Display` output becomes the user-visible message in the JSON error body.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Errors surfaced to API clients.
///
/// Persistence variants carry a short, client-safe message; the underlying
/// store error is logged where the mapping happens, never echoed back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No credential was supplied on a protected operation.
    #[error("No token provided")]
    MissingCredential,

    /// A credential was supplied but its signature did not verify, or the
    /// token was malformed.
    #[error("Invalid token")]
    InvalidToken,

    /// A credential was supplied but its expiry has passed.
    #[error("Token expired")]
    TokenExpired,

    /// Registration attempted with an email that already has a record.
    #[error("User already exists")]
    DuplicateUser {
        /// The email that collided, kept for logging.
        email: String,
    },

    /// The request body or path was malformed.
    #[error("{message}")]
    InvalidRequest {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// The referenced task does not exist.
    #[error("Task not found")]
    NotFound {
        /// The identifier that failed to resolve, kept for logging.
        id: String,
    },

    /// The store rejected or failed a write.
    #[error("{message}")]
    StoreWriteFailed {
        /// Client-safe description of the failed operation
        message: String,
    },

    /// The store failed a read.
    #[error("{message}")]
    StoreReadFailed {
        /// Client-safe description of the failed operation
        message: String,
    },

    /// Unexpected internal failure, e.g. token signing.
    #[error("{message}")]
    Internal {
        /// Client-safe description
        message: String,
    },
}

impl ApiError {
    /// Create a duplicate-user error.
    pub fn duplicate_user(email: impl Into<String>) -> Self {
        Self::DuplicateUser {
            email: email.into(),
        }
    }

    /// Create an invalid-request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a not-found error for a task identifier.
    pub fn not_found(id: impl ToString) -> Self {
        Self::NotFound { id: id.to_string() }
    }

    /// Create a store write failure with a client-safe message.
    pub fn store_write(message: impl Into<String>) -> Self {
        Self::StoreWriteFailed {
            message: message.into(),
        }
    }

    /// Create a store read failure with a client-safe message.
    pub fn store_read(message: impl Into<String>) -> Self {
        Self::StoreReadFailed {
            message: message.into(),
        }
    }

    /// Create an internal error with a client-safe message.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - Auth failures - 401 Unauthorized
    /// - `DuplicateUser`, `InvalidRequest` - 400 Bad Request
    /// - `NotFound` - 404 Not Found
    /// - Store failures and `Internal` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingCredential | Self::InvalidToken | Self::TokenExpired => {
                StatusCode::UNAUTHORIZED
            }
            Self::DuplicateUser { .. } | Self::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreWriteFailed { .. } | Self::StoreReadFailed { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
