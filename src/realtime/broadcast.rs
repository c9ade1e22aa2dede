/**
 * Broadcast Hub
 *
 * Registry of live, authenticated connections and the fan-out path for task
 * change events. Built on `tokio::sync::broadcast`: each admitted WebSocket
 * connection holds a receiver, and publishing an event hands a copy to
 * every current receiver.
 *
 * # Delivery Semantics
 *
 * Best effort, fire and forget. Publishing to an empty registry is a no-op,
 * never an error. A slow or dead connection lags and is skipped; it cannot
 * block delivery to the others, and there is no acknowledgment or retry.
 */

use tokio::sync::broadcast;

use crate::realtime::event::TaskEvent;

/// Broadcast channel capacity. A lagging subscriber starts dropping events
/// once it falls this far behind.
pub const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Sender half of the task event broadcast. Cloneable; one per process,
/// created at startup and injected into the mutation service.
pub type TaskEventBroadcast = broadcast::Sender<TaskEvent>;

/// Create the process-wide event channel.
pub fn event_channel() -> TaskEventBroadcast {
    broadcast::channel(EVENT_CHANNEL_CAPACITY).0
}

/// Publish a task change event to every registered connection
///
/// # Returns
///
/// Number of connections the event was handed to (0 if none are registered)
pub fn publish_event(events: &TaskEventBroadcast, event: TaskEvent) -> usize {
    match events.send(event) {
        Ok(subscriber_count) => {
            tracing::debug!("Task event delivered to {} connections", subscriber_count);
            subscriber_count
        }
        Err(_) => {
            // No connections registered right now.
            tracing::debug!("Task event published with no connections registered");
            0
        }
    }
}
