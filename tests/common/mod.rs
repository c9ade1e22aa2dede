//! Shared helpers for integration tests.
//!
//! The HTTP tests run against the real router and middleware with in-memory
//! stores behind the service layer, so no database is needed.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use uuid::Uuid;

use boardsync::auth::tokens::{issue_token, TOKEN_TTL};
use boardsync::auth::users::{User, UserStore};
use boardsync::realtime::broadcast::{event_channel, TaskEventBroadcast};
use boardsync::routes::create_router;
use boardsync::server::AppState;
use boardsync::tasks::model::Task;
use boardsync::tasks::service::TaskService;
use boardsync::tasks::store::TaskStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory user store keyed by email.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.lock().unwrap().get(email).cloned())
    }

    async fn insert(
        &self,
        email: &str,
        profile: &Map<String, Value>,
    ) -> Result<User, sqlx::Error> {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            profile: profile.clone(),
            created_at: Utc::now(),
        };
        self.users
            .lock()
            .unwrap()
            .insert(email.to_string(), user.clone());
        Ok(user)
    }
}

/// In-memory task store with the same rows-affected semantics as the
/// Postgres gateway.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn insert(
        &self,
        fields: &Map<String, Value>,
        created_at: DateTime<Utc>,
    ) -> Result<Task, sqlx::Error> {
        let task = Task {
            id: Uuid::new_v4(),
            created_at,
            fields: fields.clone(),
        };
        self.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn list(&self) -> Result<Vec<Task>, sqlx::Error> {
        let mut tasks: Vec<Task> = self.tasks.lock().unwrap().values().cloned().collect();
        tasks.sort_by_key(|task| task.created_at);
        Ok(tasks)
    }

    async fn merge_fields(
        &self,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<u64, sqlx::Error> {
        let mut tasks = self.tasks.lock().unwrap();
        match tasks.get_mut(&id) {
            Some(task) => {
                for (key, value) in fields {
                    task.fields.insert(key.clone(), value.clone());
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        Ok(self.tasks.lock().unwrap().remove(&id).map_or(0, |_| 1))
    }
}

/// Build an application state backed by in-memory stores. Returns the
/// broadcast sender too so tests can observe fan-out.
pub fn test_state() -> (AppState, TaskEventBroadcast) {
    let events = event_channel();
    let tasks = TaskService::new(Arc::new(MemoryTaskStore::default()), events.clone());

    let state = AppState {
        users: Arc::new(MemoryUserStore::default()),
        tasks,
        events: events.clone(),
        jwt_secret: Arc::from(TEST_SECRET),
        secure_cookies: false,
    };
    (state, events)
}

/// Build a test server over the real router.
pub fn test_server() -> (axum_test::TestServer, TaskEventBroadcast) {
    let (state, events) = test_state();
    let server = axum_test::TestServer::new(create_router(state)).unwrap();
    (server, events)
}

/// A valid Authorization header value for the given principal.
pub fn bearer_for(email: &str) -> String {
    let token = issue_token(TEST_SECRET, email.to_string(), Map::new(), TOKEN_TTL).unwrap();
    format!("Bearer {token}")
}
