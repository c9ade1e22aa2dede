/**
 * User Records and Database Operations
 *
 * This module handles user records. A user is an arbitrary document keyed by
 * a unique email; beyond the email the server does not interpret the record.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use uuid::Uuid;

/// A stored user record.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID, assigned on insert
    pub id: Uuid,
    /// Email address, unique across the collection
    pub email: String,
    /// The rest of the record, kept opaque
    pub profile: Map<String, Value>,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Storage operations for user records.
///
/// Registration only needs an existence check followed by an insert, so the
/// surface is deliberately small.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;

    /// Insert a new user record. The store assigns the identifier.
    async fn insert(&self, email: &str, profile: &Map<String, Value>)
        -> Result<User, sqlx::Error>;
}

/// Postgres-backed user store.
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: PgRow) -> Result<User, sqlx::Error> {
    let Json(profile): Json<Map<String, Value>> = row.try_get("profile")?;
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        profile,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, email, profile, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_user).transpose()
    }

    async fn insert(
        &self,
        email: &str,
        profile: &Map<String, Value>,
    ) -> Result<User, sqlx::Error> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, email, profile, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(email)
        .bind(Json(profile))
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id,
            email: email.to_string(),
            profile: profile.clone(),
            created_at,
        })
    }
}
