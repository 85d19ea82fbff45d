//! User repository
//!
//! One statement per operation:
//! - list: newest first, no limit
//! - create: INSERT, created_at defaulted by the database
//! - update/delete: zero matched rows is NotFound

use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};

use crate::models::{NewUser, UserId};

/// User record from database
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    fn user_not_found(id: UserId) -> Self {
        Self::NotFound {
            resource: "user",
            id: id.to_string(),
        }
    }
}

/// Id MySQL reports for an insert; the column is `INT`.
fn assigned_id(raw: u64) -> Result<UserId, DbError> {
    i32::try_from(raw)
        .map(UserId::new)
        .map_err(|e| DbError::Sqlx(sqlx::Error::Decode(Box::new(e))))
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a MySqlPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a MySqlPool) -> Self {
        Self { pool }
    }

    /// List every user, highest id first.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users: Vec<User> = sqlx::query_as(
            r#"
            SELECT id, name, email, created_at
            FROM users
            ORDER BY id DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        tracing::debug!(count = users.len(), "Listed users");
        Ok(users)
    }

    /// Insert a user and return the id MySQL assigned.
    pub async fn create(&self, user: &NewUser) -> Result<UserId, DbError> {
        let result = sqlx::query("INSERT INTO users (name, email) VALUES (?, ?)")
            .bind(user.name.as_str())
            .bind(user.email.as_str())
            .execute(self.pool)
            .await?;

        let id = assigned_id(result.last_insert_id())?;
        tracing::debug!(%id, "Created user");
        Ok(id)
    }

    /// Replace name and email of an existing user.
    ///
    /// MySQL may report zero affected rows when the new values equal the
    /// old ones, so a zero count is confirmed with a lookup before it
    /// becomes NotFound.
    pub async fn update(&self, id: UserId, user: &NewUser) -> Result<(), DbError> {
        let key = Self::key(id)?;
        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = ?, email = ?
            WHERE id = ?
            "#,
        )
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(key)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 && !self.exists(key).await? {
            return Err(DbError::user_not_found(id));
        }

        tracing::debug!(%id, "Updated user");
        Ok(())
    }

    /// Delete a user by id.
    pub async fn delete(&self, id: UserId) -> Result<(), DbError> {
        let key = Self::key(id)?;
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(key)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::user_not_found(id));
        }

        tracing::debug!(%id, "Deleted user");
        Ok(())
    }

    /// Column value for `id`; ids outside `INT` cannot match any row.
    fn key(id: UserId) -> Result<i32, DbError> {
        id.column_value().ok_or_else(|| DbError::user_not_found(id))
    }

    async fn exists(&self, key: i32) -> Result<bool, DbError> {
        let row = sqlx::query("SELECT 1 FROM users WHERE id = ?")
            .bind(key)
            .fetch_optional(self.pool)
            .await?;

        Ok(row.is_some())
    }
}
