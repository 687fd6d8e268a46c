//! User entity.

use crate::{ApiVersion, Exposed, Field, Role, UserId};
use serde_json::json;

/// Serialization group used by user listings and details.
pub const USER_GROUP: &str = "getUsers";

/// An account that can log in to the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    /// Unique e-mail address, also used as the login name.
    pub email: String,

    roles: Vec<Role>,

    /// Password hash (never exposed via API).
    pub password: String,
}

impl User {
    /// Creates a standard user that has not been persisted yet.
    #[must_use]
    pub fn new(email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self::from_parts(UserId::UNASSIGNED, email, Vec::new(), password_hash)
    }

    /// Rebuilds a user from stored values.
    ///
    /// The role set is normalized so it always contains [`Role::User`].
    #[must_use]
    pub fn from_parts(
        id: UserId,
        email: impl Into<String>,
        roles: Vec<Role>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            roles: Role::normalize(roles),
            password: password_hash.into(),
        }
    }

    /// Returns a copy of the user carrying the given identifier.
    #[must_use]
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = id;
        self
    }

    /// Returns the user's roles.
    #[must_use]
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Replaces the user's roles.
    pub fn set_roles(&mut self, roles: Vec<Role>) {
        self.roles = Role::normalize(roles);
    }

    /// Checks if the user has the specified role or higher.
    #[must_use]
    pub fn has_role(&self, required: Role) -> bool {
        self.roles.iter().any(|r| r.has_permission(required))
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::Admin)
    }
}

impl Exposed for User {
    fn fields(&self) -> Vec<Field> {
        vec![
            Field::new("id", &[USER_GROUP], self.id.into_inner()),
            Field::new("email", &[USER_GROUP], self.email.clone()),
            Field::new("roles", &[USER_GROUP], json!(self.roles)).since(ApiVersion::V2_0),
        ]
    }
}
