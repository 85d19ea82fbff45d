//! Database connection provider
//!
//! Uses sqlx MySqlPool with explicit connection limits for request
//! handling, plus dedicated connections for health checks.

use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlPool, MySqlPoolOptions};
use sqlx::Connection;

use crate::config::DbConfig;

/// Create a MySQL connection pool from configuration.
///
/// Connects eagerly, so an unreachable server or bad credentials fail here.
///
/// # Example
///
/// ```ignore
/// let config = DbConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<MySqlPool, sqlx::Error> {
    tracing::info!(
        host = %config.host,
        database = %config.database,
        max_connections = config.max_connections,
        ssl_mode = ?config.ssl_mode(),
        "Connecting to database"
    );
    create_pool_with_options(config.connect_options(), config.max_connections).await
}

/// Create a MySQL connection pool with custom options.
pub async fn create_pool_with_options(
    options: MySqlConnectOptions,
    max_connections: u32,
) -> Result<MySqlPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Open a dedicated connection outside the pool.
pub async fn open_connection(options: &MySqlConnectOptions) -> Result<MySqlConnection, sqlx::Error> {
    MySqlConnection::connect_with(options).await
}

/// Open a connection and close it straight away.
pub async fn check_connection(options: &MySqlConnectOptions) -> Result<(), sqlx::Error> {
    let conn = open_connection(options).await?;
    conn.close().await
}
