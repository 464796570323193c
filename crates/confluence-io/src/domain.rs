//! Domain types for output naming.

use std::fmt;

use crate::IoError;

/// A validated run name used to prefix output artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunName(String);

impl RunName {
    /// Create a new run name, validating that it matches `[a-zA-Z0-9_-]+`.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::InvalidRunName`] when the name is empty or contains
    /// any other character.
    pub fn new(name: String) -> Result<Self, IoError> {
        let valid = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(IoError::InvalidRunName { name });
        }
        Ok(Self(name))
    }

    /// Return the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RunName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
