//! User-related DTOs.

use libris_core::rules::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Anonymous registration request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(
        required(message = "This value should not be blank."),
        email(message = "This value is not a valid email address."),
        length(max = 180, message = "This value is too long. It should have 180 characters or less.")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "This value should not be blank."),
        custom(function = "not_blank")
    )]
    pub password: Option<String>,
}

/// Replacement of a user's e-mail and password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserUpdateRequest {
    #[serde(default)]
    #[validate(
        required(message = "This value should not be blank."),
        email(message = "This value is not a valid email address."),
        length(max = 180, message = "This value is too long. It should have 180 characters or less.")
    )]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(
        required(message = "This value should not be blank."),
        custom(function = "not_blank")
    )]
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }
}

impl UserUpdateRequest {
    /// Creates a request from its parts.
    #[must_use]
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_core::ValidateExt;

    #[test]
    fn test_register_requires_both_fields() {
        let err = RegisterRequest::default().validate_request().unwrap_err();
        let paths: Vec<_> = err
            .violations()
            .unwrap()
            .iter()
            .map(|v| v.property_path.as_str())
            .collect();
        assert_eq!(paths, vec!["email", "password"]);
    }

    #[test]
    fn test_invalid_email() {
        let err = UserUpdateRequest::new("not-an-email", "secret")
            .validate_request()
            .unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations[0].message, "This value is not a valid email address.");
    }

    #[test]
    fn test_valid_register() {
        assert!(RegisterRequest::new("ada@example.com", "secret").validate_request().is_ok());
    }
}
