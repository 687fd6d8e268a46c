//! Role checks on decoded claims.

use crate::Claims;
use libris_core::{LibrisError, LibrisResult, Role};

/// Extension trait for Claims to check roles.
pub trait ClaimsExt {
    /// Requires a specific role, failing with `message` when it is missing.
    fn require_role(&self, role: Role, message: &str) -> LibrisResult<()>;

    /// Requires the user to be an admin.
    fn require_admin(&self, message: &str) -> LibrisResult<()> {
        self.require_role(Role::Admin, message)
    }
}

impl ClaimsExt for Claims {
    fn require_role(&self, role: Role, message: &str) -> LibrisResult<()> {
        if self.has_role(role) {
            Ok(())
        } else {
            tracing::debug!(user = %self.username, required = %role, "Role check failed");
            Err(LibrisError::forbidden(message))
        }
    }
}

/// Denial messages shown when a role check fails.
pub mod messages {
    /// Creating an author.
    pub const CREATE_AUTHOR: &str = "You do not have sufficient rights to create an author";
    /// Updating an author.
    pub const UPDATE_AUTHOR: &str = "You do not have sufficient rights to update an author";
    /// Deleting an author.
    pub const DELETE_AUTHOR: &str = "You do not have sufficient rights to delete an author";
    /// Listing users.
    pub const LIST_USERS: &str = "You do not have sufficient rights to list users";
    /// Updating a user.
    pub const UPDATE_USER: &str = "You do not have sufficient rights to update a user";
    /// Deleting a user.
    pub const DELETE_USER: &str = "You do not have sufficient rights to delete a user";
}
