//! Author-related DTOs.

use libris_core::rules::not_blank;
use libris_core::Author;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body used to create or replace an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct AuthorRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "This value is too long. It should have 255 characters or less."))]
    pub first_name: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "This value should not be blank."),
        custom(function = "not_blank"),
        length(max = 255, message = "This value is too long. It should have 255 characters or less.")
    )]
    pub last_name: Option<String>,
}

impl AuthorRequest {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(first_name: Option<&str>, last_name: &str) -> Self {
        Self {
            first_name: first_name.map(str::to_string),
            last_name: Some(last_name.to_string()),
        }
    }

    /// Builds an unsaved author. Call only after validation.
    #[must_use]
    pub fn into_author(self) -> Author {
        Author::new(self.first_name, self.last_name.unwrap_or_default())
    }

    /// Copies the requested values onto an existing author.
    pub fn apply_to(self, author: &mut Author) {
        author.first_name = self.first_name;
        author.last_name = self.last_name.unwrap_or_default();
    }
}
