//! Schema bootstrap for the users table
//!
//! Idempotent: safe to run on every start.

use sqlx::MySqlPool;

use super::DbError;

/// `created_at` has a DEFAULT and no ON UPDATE clause, so MySQL sets it once
/// on insert and leaves it alone afterwards.
const CREATE_USERS: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id INT AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(50) NOT NULL,
        email VARCHAR(100) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

/// Ensure the users table exists.
pub async fn run(pool: &MySqlPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(CREATE_USERS).execute(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
