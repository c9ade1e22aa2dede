//! Authentication Module
//!
//! Identity tokens and user records.
//!
//! # Module Structure
//!
//! - **`tokens`** - Identity token service: issue and verify signed tokens
//! - **`users`** - User records keyed by unique email
//! - **`handlers`** - HTTP handlers for the token and registration endpoints
//!
//! Verification of tokens on protected operations lives in
//! [`crate::middleware::auth`], which both transports share.

/// Identity token service
pub mod tokens;

/// User records
pub mod users;

/// HTTP handlers
pub mod handlers;
