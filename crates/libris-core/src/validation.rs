//! Validation utilities.

use crate::{LibrisError, Violation};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns a `LibrisError::Validation` listing
    /// every violation on failure.
    fn validate_request(&self) -> Result<(), LibrisError> {
        self.validate().map_err(validation_errors_to_libris_error)
    }
}

impl<T: Validate> ValidateExt for T {}

/// Converts `validator::ValidationErrors` to a list of violations.
///
/// Violations are ordered by property path so responses are stable.
#[must_use]
pub fn violations_from(errors: &ValidationErrors) -> Vec<Violation> {
    let mut violations: Vec<Violation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                Violation::new(
                    field.to_string(),
                    error
                        .message
                        .as_ref()
                        .map_or_else(|| error.code.to_string(), ToString::to_string),
                )
            })
        })
        .collect();
    violations.sort_by(|a, b| a.property_path.cmp(&b.property_path));
    violations
}

/// Converts `validator::ValidationErrors` to `LibrisError`.
#[must_use]
pub fn validation_errors_to_libris_error(errors: ValidationErrors) -> LibrisError {
    LibrisError::Validation(violations_from(&errors))
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank")
                .with_message("This value should not be blank.".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::rules::*;
    use super::*;

    #[derive(Validate)]
    struct Payload {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(email(message = "This value is not a valid email address."))]
        email: String,
    }

    #[test]
    fn test_not_blank() {
        assert!(not_blank("hello").is_ok());
        assert!(not_blank("   ").is_err());
        assert!(not_blank("").is_err());
    }

    #[test]
    fn test_validate_request_collects_all_violations() {
        let payload = Payload {
            name: " ".into(),
            email: "nope".into(),
        };
        let err = payload.validate_request().unwrap_err();
        let violations = err.violations().unwrap();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].property_path, "email");
        assert_eq!(violations[0].message, "This value is not a valid email address.");
        assert_eq!(violations[1].property_path, "name");
        assert_eq!(violations[1].message, "This value should not be blank.");
    }

    #[test]
    fn test_valid_payload_passes() {
        let payload = Payload {
            name: "Ada".into(),
            email: "ada@example.com".into(),
        };
        assert!(payload.validate_request().is_ok());
    }
}
