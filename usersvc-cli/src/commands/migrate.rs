//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use usersvc_server::db::{create_pool, migrations};
use usersvc_server::DbConfig;

use super::DbArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub db: DbArgs,
}

/// Create the users table if it does not exist, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let pool = create_pool(&DbConfig::from(args.db))
        .await
        .context("Failed to create database pool")?;

    migrations::run(&pool)
        .await
        .context("Failed to create users table")?;

    pool.close().await;
    println!("users table ready");
    Ok(())
}
