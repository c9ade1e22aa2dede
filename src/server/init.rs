/**
 * Server Initialization
 *
 * Assembles the application: database pool, broadcast channel, stores,
 * mutation service, router, and the outer middleware layers.
 *
 * # Initialization Steps
 *
 * 1. Connect to the database and run migrations (fatal on failure)
 * 2. Create the process-wide broadcast channel
 * 3. Wire the stores and the task mutation service
 * 4. Build the router and wrap it with CORS and request tracing
 */

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::users::PgUserStore;
use crate::realtime::broadcast::event_channel;
use crate::routes::router::create_router;
use crate::server::config::{connect_database, ServerConfig};
use crate::server::state::AppState;
use crate::tasks::service::TaskService;
use crate::tasks::store::PgTaskStore;

/// Create and configure the application router.
///
/// A database failure here propagates to the caller; startup without
/// storage is not survivable.
pub async fn create_app(config: &ServerConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing boardsync server");

    let pool = connect_database(&config.database_url).await?;

    let events = event_channel();
    let tasks = TaskService::new(Arc::new(PgTaskStore::new(pool.clone())), events.clone());

    let state = AppState {
        users: Arc::new(PgUserStore::new(pool)),
        tasks,
        events,
        jwt_secret: Arc::from(config.jwt_secret.as_str()),
        secure_cookies: config.secure_cookies,
    };

    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .unwrap_or_else(|_| {
            tracing::warn!(
                "ALLOWED_ORIGIN {:?} is not a valid origin, falling back to the default",
                config.allowed_origin
            );
            HeaderValue::from_static("http://localhost:5173")
        });

    // Credentialed CORS for the browser client; wildcard origins are not
    // allowed together with credentials.
    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true);

    let app = create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Router configured");
    Ok(app)
}
