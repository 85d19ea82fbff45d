//! HTTP server command
//!
//! Bootstraps the schema, then serves the user API until shutdown.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db::{create_pool, migrations};
use usersvc_server::{run_server, AppState, DbConfig, ServerConfig};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIND_ADDR", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let db_config = DbConfig::from(args.db);

    let pool = create_pool(&db_config)
        .await
        .context("Failed to create database pool")?;

    // Startup bootstrap: fatal on failure, never retried
    migrations::run(&pool)
        .await
        .context("Failed to create users table")?;

    let state = AppState::new(pool, db_config.connect_options());
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    tracing::info!("Starting usersvc on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
