//! User field validation
//!
//! Limits mirror the `users` table columns: `VARCHAR(50)` for name and
//! `VARCHAR(100)` for email. MySQL counts VARCHAR length in characters, so
//! these checks do too.

use std::fmt;
use std::num::IntErrorKind;

use super::ValidationError;

/// Maximum length for user names
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length for email addresses
pub const MAX_EMAIL_LEN: usize = 100;

fn check_text(field: &'static str, s: &str, max: usize) -> Result<(), ValidationError> {
    if s.trim().is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if s.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

/// Validated user name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Create a user name.
    ///
    /// # Rules
    /// - Not empty or whitespace-only
    /// - Max 50 characters
    ///
    /// # Example
    /// ```
    /// use usersvc_server::models::UserName;
    ///
    /// assert!(UserName::new("Alice").is_ok());
    /// assert!(UserName::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("name", s, MAX_NAME_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated email address.
///
/// Only presence and length are checked; the address format is not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Email(String);

impl Email {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        check_text("email", s, MAX_EMAIL_LEN)?;
        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated name/email pair used by both insert and update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: UserName,
    pub email: Email,
}

impl NewUser {
    pub fn new(name: &str, email: &str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: UserName::new(name)?,
            email: Email::new(email)?,
        })
    }
}

/// User id as addressed by a request.
///
/// Any well-formed integer is accepted. Ids outside the `INT` range of the
/// column cannot name a row, so [`UserId::column_value`] returns `None` for
/// them and lookups treat them as missing. Integers beyond `i64` saturate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    pub fn new(id: i32) -> Self {
        Self(i64::from(id))
    }

    /// Parse an id from a path segment.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "id" });
        }

        match s.parse::<i64>() {
            Ok(id) => Ok(Self(id)),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow => Ok(Self(i64::MAX)),
                IntErrorKind::NegOverflow => Ok(Self(i64::MIN)),
                _ => Err(ValidationError::InvalidFormat {
                    field: "id",
                    reason: "must be an integer",
                }),
            },
        }
    }

    /// The value to bind against the `INT` column, if it fits.
    pub fn column_value(self) -> Option<i32> {
        i32::try_from(self.0).ok()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
