//! Middleware Module
//!
//! Request-processing middleware. Currently this is the access guard that
//! protects the task routes.

/// Access guard middleware
pub mod auth;

pub use auth::{auth_middleware, bearer_token, AuthUser, AuthenticatedUser};
