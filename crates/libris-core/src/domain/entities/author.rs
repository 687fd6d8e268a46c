//! Author entity.

use crate::{AuthorId, Exposed, Field};

/// Serialization group used by author listings and details.
pub const AUTHOR_GROUP: &str = "getAuthors";

/// An author of books in the catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    /// Store-assigned identifier.
    pub id: AuthorId,

    /// Optional given name.
    pub first_name: Option<String>,

    /// Family name (required, never blank once persisted).
    pub last_name: String,
}

impl Author {
    /// Creates an author that has not been persisted yet.
    #[must_use]
    pub fn new(first_name: Option<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: AuthorId::UNASSIGNED,
            first_name,
            last_name: last_name.into(),
        }
    }

    /// Returns a copy of the author carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: AuthorId) -> Self {
        self.id = id;
        self
    }

    /// Returns the author's display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.first_name {
            Some(first) if !first.is_empty() => format!("{} {}", first, self.last_name),
            _ => self.last_name.clone(),
        }
    }
}

impl Exposed for Author {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("id", &[AUTHOR_GROUP], self.id.into_inner()),
            Field::new("first_name", &[AUTHOR_GROUP], self.first_name.clone()),
            Field::new("last_name", &[AUTHOR_GROUP], self.last_name.clone()),
        ]
    }
}
