//! Database layer - connection provider, bootstrap, and repositories
//!
//! - Request handlers check connections out of a pool; a checked-out
//!   connection goes back to the pool when dropped, on every exit path
//! - Health checks open a dedicated connection and close it
//! - Each write is a single statement, committed on its own

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{check_connection, create_pool, open_connection};
pub use repos::*;
