/**
 * Application State
 *
 * The central state container handed to the router. It holds the services
 * every handler needs:
 *
 * - the user store for registration
 * - the task mutation service (which owns the task store and publishes to
 *   the broadcast hub)
 * - the broadcast sender itself, so WebSocket connections can subscribe
 * - the token-signing secret shared by both transports' guards
 *
 * `FromRef` implementations let handlers extract just the piece they need
 * instead of the whole state.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::users::UserStore;
use crate::realtime::broadcast::TaskEventBroadcast;
use crate::tasks::service::TaskService;

/// Shared application state. Cheap to clone; everything inside is a handle.
#[derive(Clone)]
pub struct AppState {
    /// User record storage
    pub users: Arc<dyn UserStore>,
    /// Task mutation service
    pub tasks: TaskService,
    /// Broadcast hub sender, subscribed to by each admitted connection
    pub events: TaskEventBroadcast,
    /// Shared token-signing secret
    pub jwt_secret: Arc<str>,
    /// Whether session cookies carry the Secure attribute
    pub secure_cookies: bool,
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for TaskService {
    fn from_ref(state: &AppState) -> Self {
        state.tasks.clone()
    }
}

impl FromRef<AppState> for TaskEventBroadcast {
    fn from_ref(state: &AppState) -> Self {
        state.events.clone()
    }
}
