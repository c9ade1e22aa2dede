/**
 * Task Route Handlers
 *
 * HTTP handlers for the task CRUD surface. Every route here sits behind the
 * access guard, so by the time a handler runs the request already carries a
 * verified principal. The handlers stay thin: parse the path, hand the
 * payload to the mutation service, shape the response.
 *
 * # Routes
 *
 * - `GET /tasks` - list every task
 * - `POST /tasks` - create a task, respond with the stored task
 * - `PUT /tasks/{id}` - partial update, respond with `{"message": ...}`
 * - `DELETE /tasks/{id}` - delete, respond with `{"message": ...}`
 */

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::tasks::service::TaskService;

/// Acknowledgment body for update and delete.
#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_task_id(id: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::invalid_request("Invalid task id"))
}

/// List every task on the board (GET /tasks)
pub async fn list_tasks(
    State(tasks): State<TaskService>,
    AuthUser(_user): AuthUser,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tasks = tasks.list().await?;
    Ok(Json(tasks.iter().map(|task| task.to_json()).collect()))
}

/// Create a task (POST /tasks)
///
/// The response is the stored task, including the assigned identifier and
/// creation timestamp.
pub async fn create_task(
    State(tasks): State<TaskService>,
    AuthUser(user): AuthUser,
    Json(payload): Json<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    tracing::debug!("Create task requested by {}", user.email);
    let task = tasks.create(payload).await?;
    Ok(Json(task.to_json()))
}

/// Partially update a task (PUT /tasks/{id})
pub async fn update_task(
    State(tasks): State<TaskService>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    Json(partial): Json<Map<String, Value>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_task_id(&id)?;
    tracing::debug!("Update task {} requested by {}", id, user.email);
    tasks.update(id, partial).await?;
    Ok(Json(MessageResponse {
        message: "Task updated".to_string(),
    }))
}

/// Delete a task (DELETE /tasks/{id})
pub async fn delete_task(
    State(tasks): State<TaskService>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_task_id(&id)?;
    tracing::debug!("Delete task {} requested by {}", id, user.email);
    tasks.delete(id).await?;
    Ok(Json(MessageResponse {
        message: "Task deleted".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_task_id_rejects_garbage() {
        assert_eq!(
            parse_task_id("not-a-uuid"),
            Err(ApiError::invalid_request("Invalid task id"))
        );
    }

    #[test]
    fn test_parse_task_id_accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_task_id(&id.to_string()), Ok(id));
    }
}
