//! Repository implementations for database access
//!
//! Statements are parameterized; user input never reaches SQL text.

pub mod users;

pub use users::{DbError, User, UserRepo};
