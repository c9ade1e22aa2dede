/**
 * Server Configuration
 *
 * Loads server configuration from environment variables and initializes the
 * database connection pool.
 *
 * # Configuration Sources
 *
 * - `DATABASE_URL` - required; the server cannot serve anything without
 *   storage, so a missing URL or a failed connection at startup is fatal
 * - `JWT_SECRET` - shared token-signing secret; falls back to a development
 *   default with a warning
 * - `SERVER_PORT` - listen port, default 9000
 * - `ALLOWED_ORIGIN` - browser origin allowed by CORS, default the local
 *   Vite dev server
 * - `APP_ENV` - `production` turns on the Secure cookie attribute
 */

use sqlx::PgPool;
use thiserror::Error;

/// Fallback secret for local development only.
const DEV_JWT_SECRET: &str = "boardsync-dev-secret-change-in-production";

const DEFAULT_PORT: u16 = 9000;
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Configuration errors are fatal; the process should exit with the message.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL is not set; the server cannot start without storage")]
    MissingDatabaseUrl,
}

/// Runtime configuration assembled from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub allowed_origin: String,
    pub secure_cookies: bool,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development default");
            DEV_JWT_SECRET.to_string()
        });

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let allowed_origin =
            std::env::var("ALLOWED_ORIGIN").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

        let secure_cookies = std::env::var("APP_ENV")
            .map(|env| env == "production")
            .unwrap_or(false);

        Ok(Self {
            database_url,
            jwt_secret,
            port,
            allowed_origin,
            secure_cookies,
        })
    }
}

/// Connect to the database and run migrations.
///
/// Unlike every per-request failure, an error here propagates out of `main`
/// and stops the process: with no storage there is nothing to serve.
pub async fn connect_database(database_url: &str) -> Result<PgPool, sqlx::Error> {
    tracing::info!("Connecting to database...");
    let pool = PgPool::connect(database_url).await?;

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;

    tracing::info!("Database ready");
    Ok(pool)
}
