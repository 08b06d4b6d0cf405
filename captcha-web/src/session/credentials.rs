//! Login gate

use std::fmt;

use crate::error::SessionError;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Both fields must reach `min_length` characters
    pub fn validate(&self, min_length: usize) -> Result<(), SessionError> {
        for (field, value) in [("username", &self.username), ("password", &self.password)] {
            let missing = credential_hint(value, min_length);
            if missing > 0 {
                return Err(SessionError::InvalidCredentials { field, missing });
            }
        }
        Ok(())
    }
}

/// Characters still needed before `value` is long enough
pub fn credential_hint(value: &str, min_length: usize) -> usize {
    min_length.saturating_sub(value.chars().count())
}
