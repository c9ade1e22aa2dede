/**
 * Task Change Events
 *
 * Transient notifications describing the outcome of a successful mutation.
 * Events are never persisted; they exist only on the wire between the
 * mutation that produced them and the connections that observe them.
 *
 * # Wire Format
 *
 * Each event is one JSON frame of the form `{"event": <kind>, "data": ...}`:
 *
 * - `taskAdded` - data is the full stored task, including its assigned
 *   identifier and creation timestamp
 * - `taskUpdated` - data is `{"id": ..., ...changedFields}`, reflecting what
 *   changed rather than the full resulting task
 * - `taskDeleted` - data is the bare identifier string
 */

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::tasks::model::Task;

/// Kind of task change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskEventKind {
    TaskAdded,
    TaskUpdated,
    TaskDeleted,
}

/// A task change event broadcast to every admitted connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEvent {
    /// What happened
    pub event: TaskEventKind,
    /// Kind-specific payload, see the module docs for shapes
    pub data: Value,
}

impl TaskEvent {
    /// Event for a freshly created task. Carries the full stored task.
    pub fn added(task: &Task) -> Self {
        Self {
            event: TaskEventKind::TaskAdded,
            data: task.to_json(),
        }
    }

    /// Event for a partial update. Carries the identifier plus exactly the
    /// fields that were merged.
    pub fn updated(id: Uuid, changed: &Map<String, Value>) -> Self {
        let mut data = Map::with_capacity(changed.len() + 1);
        data.insert("id".to_string(), Value::String(id.to_string()));
        for (key, value) in changed {
            data.insert(key.clone(), value.clone());
        }
        Self {
            event: TaskEventKind::TaskUpdated,
            data: Value::Object(data),
        }
    }

    /// Event for a deletion. Carries the bare identifier string.
    pub fn deleted(id: Uuid) -> Self {
        Self {
            event: TaskEventKind::TaskDeleted,
            data: Value::String(id.to_string()),
        }
    }
}
