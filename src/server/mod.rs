//! Server Module
//!
//! Process-level concerns: configuration, shared state, and application
//! assembly.
//!
//! # Module Structure
//!
//! - **`config`** - Environment configuration and database setup
//! - **`state`** - `AppState` and its `FromRef` extractions
//! - **`init`** - `create_app`, wiring everything into a router

/// Environment configuration
pub mod config;

/// Shared application state
pub mod state;

/// Application assembly
pub mod init;

pub use config::{ConfigError, ServerConfig};
pub use init::create_app;
pub use state::AppState;
