//! Database connectivity check
//!
//! Same round trip as `GET /api/health`, without starting the server.

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db::check_connection;
use usersvc_server::DbConfig;

use super::DbArgs;

/// Arguments for the check command
#[derive(Parser, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Open a connection, close it, and report
pub async fn run_check(args: CheckArgs) -> Result<()> {
    let config = DbConfig::from(args.db);

    check_connection(&config.connect_options())
        .await
        .with_context(|| format!("Cannot connect to {}/{}", config.host, config.database))?;

    println!("ok: connected to {}/{}", config.host, config.database);
    Ok(())
}
