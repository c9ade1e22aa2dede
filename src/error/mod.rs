//! Error Module
//!
//! This module defines the error types used across the server. Every failure
//! that can reach a client is represented as an `ApiError` variant and is
//! converted into a JSON error response at the handler boundary.
//!
//! # Module Structure
//!
//! - **`types`** - Error type definitions and constructors
//! - **`conversion`** - Conversion into HTTP responses
//!
//! # Taxonomy
//!
//! Authentication failures (`MissingCredential`, `InvalidToken`,
//! `TokenExpired`) always surface as 401 responses and never abort the
//! process. Persistence failures (`StoreWriteFailed`, `StoreReadFailed`,
//! `NotFound`) surface as request failures with no retry. Registration
//! conflicts surface as `DuplicateUser`.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
