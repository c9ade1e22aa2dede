/**
 * Router Configuration
 *
 * Builds the route table. The task CRUD routes are wrapped by the access
 * guard as a group; the identity endpoints and the root greeting are
 * deliberately left open because they have to work before a token exists.
 * The WebSocket route performs its own guard check at handshake time.
 */

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers::{issue_session_token, register_user};
use crate::middleware::auth::auth_middleware;
use crate::realtime::socket::ws_handler;
use crate::server::state::AppState;
use crate::tasks::handlers::{create_task, delete_task, list_tasks, update_task};

/// Create the router with all routes configured
///
/// # Route Table
///
/// | Method | Path | Guarded |
/// |---|---|---|
/// | GET | `/` | no |
/// | POST | `/jwt` | no |
/// | POST | `/users` | no |
/// | GET, POST | `/tasks` | yes |
/// | PUT, DELETE | `/tasks/{id}` | yes |
/// | GET | `/ws` | handshake |
pub fn create_router(state: AppState) -> Router {
    let task_routes = Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", put(update_task).delete(delete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/", get(greeting))
        .route("/jwt", post(issue_session_token))
        .route("/users", post(register_user))
        .route("/ws", get(ws_handler))
        .merge(task_routes)
        .with_state(state)
}

/// Root route, unguarded by design.
async fn greeting() -> &'static str {
    "BoardSync server is running"
}
