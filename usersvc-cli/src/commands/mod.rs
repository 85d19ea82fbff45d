//! Subcommand implementations

pub mod check;
pub mod migrate;
pub mod serve;

use std::path::PathBuf;

use clap::Args;
use usersvc_server::config::DEFAULT_MAX_CONNECTIONS;
use usersvc_server::DbConfig;

/// Database connection arguments shared by every subcommand.
///
/// The port is always 3306 and TLS is always on.
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Database host
    #[arg(long, env = "DB_HOST")]
    pub db_host: String,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: String,

    /// CA bundle to verify the server certificate against
    #[arg(long, env = "DB_SSL_CA")]
    pub db_ssl_ca: Option<PathBuf>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "DB_MAX_CONNECTIONS",
        default_value_t = DEFAULT_MAX_CONNECTIONS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub db_max_connections: u32,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            host: args.db_host,
            user: args.db_user,
            password: args.db_password,
            database: args.db_name,
            ssl_ca: args.db_ssl_ca,
            max_connections: args.db_max_connections,
        }
    }
}
