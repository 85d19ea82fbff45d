//! usersvc-server: HTTP CRUD service over a MySQL `users` table
//!
//! Five routes under `/api`, each mapping one HTTP verb to one
//! parameterized SQL statement:
//!
//! - `GET /api/health`
//! - `GET /api/users`, `POST /api/users`
//! - `PUT /api/users/{id}`, `DELETE /api/users/{id}`

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DbConfig};
pub use http::{build_router, run_server, AppState, ServerConfig};
