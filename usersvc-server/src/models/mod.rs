//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod user;

pub use validation::ValidationError;
pub use user::{Email, NewUser, UserId, UserName, MAX_EMAIL_LEN, MAX_NAME_LEN};
