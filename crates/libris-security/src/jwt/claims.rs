//! JWT claims structure.

use chrono::{DateTime, Utc};
use libris_core::{Role, UserId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: String,

    /// Login name (the user's e-mail).
    pub username: String,

    /// Roles granted to the user.
    pub roles: Vec<Role>,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,

    /// JWT ID (unique identifier for this token).
    pub jti: String,
}

impl Claims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new(
        user_id: UserId,
        username: String,
        roles: Vec<Role>,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username,
            roles: Role::normalize(roles),
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer,
            aud: audience,
            jti: Uuid::now_v7().to_string(),
        }
    }

    /// Returns the user ID carried in the subject.
    #[must_use]
    pub fn user_id(&self) -> Option<UserId> {
        self.sub.parse().ok()
    }

    /// Checks if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Returns the expiration time.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or_else(Utc::now)
    }

    /// Checks if any granted role satisfies the required one.
    #[must_use]
    pub fn has_role(&self, required: Role) -> bool {
        self.roles.iter().any(|role| role.has_permission(required))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn claims(roles: Vec<Role>) -> Claims {
        Claims::new(
            UserId::new(12),
            "ada@example.com".to_string(),
            roles,
            "issuer".to_string(),
            "audience".to_string(),
            Utc::now() + Duration::hours(1),
        )
    }

    #[test]
    fn test_claims_basics() {
        let claims = claims(vec![]);
        assert_eq!(claims.user_id(), Some(UserId::new(12)));
        assert_eq!(claims.roles, vec![Role::User]);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_role_check() {
        let admin = claims(vec![Role::Admin]);
        assert!(admin.has_role(Role::User));
        assert!(admin.has_role(Role::Admin));

        let user = claims(vec![Role::User]);
        assert!(user.has_role(Role::User));
        assert!(!user.has_role(Role::Admin));
    }

    #[test]
    fn test_roles_serialize_with_wire_names() {
        let value = serde_json::to_value(claims(vec![Role::Admin])).unwrap();
        assert_eq!(value["roles"], serde_json::json!(["ROLE_USER", "ROLE_ADMIN"]));
        assert_eq!(value["username"], "ada@example.com");
    }
}
