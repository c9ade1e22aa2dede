//! Realtime Module
//!
//! Event fan-out for the task board.
//!
//! # Module Structure
//!
//! - **`event`** - Task change event types and wire shapes
//! - **`broadcast`** - The broadcast hub: connection registry and publish
//! - **`socket`** - WebSocket transport with handshake-time authentication
//!
//! # Lifecycle
//!
//! The broadcast channel is created once at process start and torn down at
//! shutdown. Connections register by subscribing after a successful
//! authenticated handshake and deregister when their receiver is dropped at
//! disconnect. The mutation service publishes exactly one event per
//! successful mutation, after the store write is confirmed.

/// Task change events
pub mod event;

/// Broadcast hub
pub mod broadcast;

/// WebSocket transport
pub mod socket;

pub use broadcast::{event_channel, publish_event, TaskEventBroadcast};
pub use event::{TaskEvent, TaskEventKind};
