/**
 * Task Mutation Service
 *
 * Orchestrates every change to the shared task collection. Each mutation is
 * a strict sequence: persist, then broadcast, then acknowledge. The
 * broadcast happens only after the store confirms the write, so stored
 * state and announced state cannot diverge; a failed write produces no
 * event at all.
 *
 * The broadcast hub is injected as a dependency rather than reached through
 * ambient state, so the service can be exercised against any store and any
 * set of subscribers.
 */

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::realtime::broadcast::{publish_event, TaskEventBroadcast};
use crate::realtime::event::TaskEvent;
use crate::tasks::model::Task;
use crate::tasks::store::TaskStore;

/// Keys the server owns. They are stripped from every inbound payload so a
/// client can never overwrite a task's identity or creation timestamp, on
/// create or on update.
const RESERVED_FIELDS: [&str; 4] = ["id", "_id", "timestamp", "created_at"];

fn strip_reserved(fields: &mut Map<String, Value>) {
    for key in RESERVED_FIELDS {
        fields.remove(key);
    }
}

/// Mutation and read operations over the shared task collection.
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    events: TaskEventBroadcast,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, events: TaskEventBroadcast) -> Self {
        Self { store, events }
    }

    /// Create a task from a caller-supplied payload.
    ///
    /// Stamps the creation timestamp, inserts (the store assigns the
    /// identifier), broadcasts a `taskAdded` event carrying the full stored
    /// task, and returns that task to the caller.
    pub async fn create(&self, mut payload: Map<String, Value>) -> Result<Task, ApiError> {
        strip_reserved(&mut payload);
        let created_at = Utc::now();

        let task = self
            .store
            .insert(&payload, created_at)
            .await
            .map_err(|e| {
                tracing::error!("Task insert failed: {:?}", e);
                ApiError::store_write("Failed to add task")
            })?;

        publish_event(&self.events, TaskEvent::added(&task));
        tracing::info!("Task created: {}", task.id);
        Ok(task)
    }

    /// Apply a partial field merge to an existing task.
    ///
    /// Fields absent from the payload are left untouched; the identifier
    /// and creation timestamp are stripped before the merge even if the
    /// payload tries to set them. The broadcast `taskUpdated` event carries
    /// the identifier plus exactly the merged fields.
    pub async fn update(&self, id: Uuid, mut partial: Map<String, Value>) -> Result<(), ApiError> {
        strip_reserved(&mut partial);

        let affected = self
            .store
            .merge_fields(id, &partial)
            .await
            .map_err(|e| {
                tracing::error!("Task update failed for {}: {:?}", id, e);
                ApiError::store_write("Failed to update task")
            })?;
        if affected == 0 {
            return Err(ApiError::not_found(id));
        }

        publish_event(&self.events, TaskEvent::updated(id, &partial));
        tracing::info!("Task updated: {}", id);
        Ok(())
    }

    /// Delete a task by identifier.
    ///
    /// Deleting an unknown identifier is a `NotFound` failure, not a silent
    /// success: no event may announce a deletion that did not happen.
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let affected = self.store.remove(id).await.map_err(|e| {
            tracing::error!("Task delete failed for {}: {:?}", id, e);
            ApiError::store_write("Failed to delete task")
        })?;
        if affected == 0 {
            return Err(ApiError::not_found(id));
        }

        publish_event(&self.events, TaskEvent::deleted(id));
        tracing::info!("Task deleted: {}", id);
        Ok(())
    }

    /// Fetch every stored task. Read-only; no event is emitted.
    pub async fn list(&self) -> Result<Vec<Task>, ApiError> {
        self.store.list().await.map_err(|e| {
            tracing::error!("Task list failed: {:?}", e);
            ApiError::store_read("Failed to fetch tasks")
        })
    }
}
