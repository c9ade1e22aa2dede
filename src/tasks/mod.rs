//! Tasks Module
//!
//! Everything about the shared task collection.
//!
//! # Module Structure
//!
//! - **`model`** - The task record and its wire shape
//! - **`store`** - Store gateway trait and the Postgres implementation
//! - **`service`** - Mutation service: persist, then broadcast, then
//!   acknowledge
//! - **`handlers`** - Guarded HTTP handlers for the CRUD surface
//!
//! # Consistency
//!
//! Concurrent partial updates to the same task are serialized by the store
//! (each merge is a single statement); there is no optimistic concurrency
//! control and last write wins. That is a deliberate limitation of this
//! server, not something handlers should try to compensate for.

/// Task record
pub mod model;

/// Store gateway
pub mod store;

/// Mutation service
pub mod service;

/// HTTP handlers
pub mod handlers;

pub use model::Task;
pub use service::TaskService;
pub use store::{PgTaskStore, TaskStore};
