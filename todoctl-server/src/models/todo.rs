//! The todo entity and its validated fields
//!
//! `Todo` is the one schema shared by the `todo` table and the JSON API.
//! Column names and serialized field names are identical, so a row read by
//! the store is exactly what a handler returns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::ValidationError;

/// Maximum length for todo titles (characters)
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length for todo descriptions (characters)
pub const MAX_DESCRIPTION_LEN: usize = 2000;

/// A persisted todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

/// Store-assigned todo identifier (always positive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(i64);

impl TodoId {
    pub fn new(id: i64) -> Result<Self, ValidationError> {
        if id <= 0 {
            return Err(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be a positive integer",
            });
        }
        Ok(Self(id))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for TodoId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.parse::<i64>().map_err(|_| ValidationError::InvalidFormat {
            field: "id",
            reason: "must be a positive integer",
        })?;
        Self::new(id)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated todo title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Create a new todo title.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 200 characters
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TodoTitle;
    ///
    /// assert!(TodoTitle::new("Buy milk").is_ok());
    /// assert!(TodoTitle::new("").is_err());
    /// assert!(TodoTitle::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }

        if trimmed.chars().count() > MAX_TITLE_LEN {
            return Err(ValidationError::TooLong {
                field: "title",
                max: MAX_TITLE_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated todo description
///
/// Blank input is not a description: `parse` maps it to `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDescription(String);

impl TodoDescription {
    pub fn parse(s: &str) -> Result<Option<Self>, ValidationError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(ValidationError::TooLong {
                field: "description",
                max: MAX_DESCRIPTION_LEN,
            });
        }

        Ok(Some(Self(trimmed.to_owned())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Fields for a todo that hasn't been stored yet
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub title: TodoTitle,
    pub description: Option<TodoDescription>,
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: TodoTitle) -> Self {
        Self {
            title,
            description: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: Option<TodoDescription>) -> Self {
        self.description = description;
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

/// Partial update; `None` leaves the stored value untouched.
///
/// `description: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub title: Option<TodoTitle>,
    pub description: Option<Option<TodoDescription>>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}
