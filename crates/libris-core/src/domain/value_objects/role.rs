//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a role name is not recognised.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct UnknownRoleError(String);

/// User roles with hierarchical permissions.
///
/// Roles travel as their `ROLE_*` names in tokens, in the store and in API
/// payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum Role {
    /// Standard user. Every account holds this role.
    #[default]
    #[serde(rename = "ROLE_USER")]
    User,
    /// Administrator with full access.
    #[serde(rename = "ROLE_ADMIN")]
    Admin,
}

impl Role {
    /// Returns the role's permission level (higher = more permissions).
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::User => 1,
            Self::Admin => 2,
        }
    }

    /// Checks if this role has at least the permissions of the required role.
    #[must_use]
    pub const fn has_permission(&self, required: Self) -> bool {
        self.level() >= required.level()
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }

    /// Returns all available roles.
    #[must_use]
    pub const fn all() -> [Self; 2] {
        [Self::User, Self::Admin]
    }

    /// Sorts and deduplicates a role set and guarantees it contains
    /// [`Role::User`].
    #[must_use]
    pub fn normalize(mut roles: Vec<Self>) -> Vec<Self> {
        roles.push(Self::User);
        roles.sort_unstable();
        roles.dedup();
        roles
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ROLE_USER" | "USER" => Ok(Self::User),
            "ROLE_ADMIN" | "ADMIN" => Ok(Self::Admin),
            _ => Err(UnknownRoleError(s.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_levels() {
        assert!(Role::Admin.level() > Role::User.level());
    }

    #[test]
    fn test_admin_satisfies_user_requirement() {
        assert!(Role::Admin.has_permission(Role::User));
        assert!(Role::Admin.has_permission(Role::Admin));
        assert!(Role::User.has_permission(Role::User));
        assert!(!Role::User.has_permission(Role::Admin));
    }

    #[test]
    fn test_parse_role() {
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("role_user".parse::<Role>(), Ok(Role::User));
        assert!("ROLE_ROOT".parse::<Role>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&vec![Role::User, Role::Admin]).unwrap();
        assert_eq!(json, r#"["ROLE_USER","ROLE_ADMIN"]"#);
        let back: Vec<Role> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Role::User, Role::Admin]);
    }

    #[test]
    fn test_normalize_always_contains_user() {
        assert_eq!(Role::normalize(vec![]), vec![Role::User]);
        assert_eq!(
            Role::normalize(vec![Role::Admin, Role::User, Role::Admin]),
            vec![Role::User, Role::Admin]
        );
    }
}
