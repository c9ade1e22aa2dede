//! BoardSync - Shared Task Board Backend
//!
//! BoardSync backs a shared task board: multiple clients view and mutate a
//! common list of tasks over HTTP, and every successful mutation is pushed
//! to all connected WebSocket observers so their views stay converged.
//!
//! # Overview
//!
//! Two disciplines hold the system together:
//!
//! - **One identity check, two transports.** Signed identity tokens gate
//!   both the request/response surface (via middleware) and the persistent
//!   WebSocket channel (at handshake time), sharing a single verification
//!   path and failure taxonomy.
//! - **Persist, then broadcast, then acknowledge.** A task change event is
//!   produced exactly once per successful mutation, only after the store
//!   confirms the write. A failed write emits nothing, so stored state and
//!   announced state cannot diverge.
//!
//! # Module Structure
//!
//! - **`error`** - API error taxonomy and response conversion
//! - **`auth`** - Identity token service, user records, identity endpoints
//! - **`middleware`** - The access guard for protected routes
//! - **`tasks`** - Task model, store gateway, mutation service, handlers
//! - **`realtime`** - Change events, broadcast hub, WebSocket transport
//! - **`server`** - Configuration, shared state, application assembly
//! - **`routes`** - Route table
//!
//! # Delivery Guarantees
//!
//! Event fan-out is best effort: no acknowledgment, no retry, no
//! backpressure. A slow connection lags and skips events rather than
//! blocking the rest. Clients that need certainty re-fetch the task list.

/// Error types
pub mod error;

/// Authentication and identity
pub mod auth;

/// Request middleware
pub mod middleware;

/// Task collection
pub mod tasks;

/// Event broadcasting
pub mod realtime;

/// Process setup
pub mod server;

/// Route table
pub mod routes;
