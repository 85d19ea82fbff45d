//! usersvc - HTTP CRUD service over a MySQL users table
//!
//! Subcommands:
//! - `serve`: bootstrap the schema and run the HTTP API
//! - `migrate`: bootstrap the schema only
//! - `check`: verify the database is reachable
//!
//! Settings come from flags or environment variables; a `.env` file in the
//! working directory is loaded first and never overrides the environment.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "usersvc",
    author,
    version,
    about = "Minimal HTTP service for CRUD over a MySQL users table"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long, global = true)]
    debug: bool,

    /// Export traces over OTLP (requires the telemetry feature)
    #[arg(long, global = true)]
    otel: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the users table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
    /// Open and close a database connection
    Check(commands::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig {
        debug: cli.debug,
        otel: cli.otel,
    })?;

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await,
        Commands::Migrate(args) => commands::migrate::run_migrate(args).await,
        Commands::Check(args) => commands::check::run_check(args).await,
    };

    tracing_setup::shutdown_otel();
    result
}
