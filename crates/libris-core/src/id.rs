//! Typed ID wrappers for domain entities.
//!
//! Both resources use store-assigned auto-increment keys, so the wrappers
//! hold an `i64`. A freshly built entity carries [`Self::UNASSIGNED`] until the
//! repository persists it.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Placeholder for entities that have not been persisted yet.
            pub const UNASSIGNED: Self = Self(0);

            /// Wraps a raw key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }

            /// Returns true once the store has assigned a key.
            #[must_use]
            pub const fn is_assigned(self) -> bool {
                self.0 > 0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

typed_id!(
    /// Identifier of an [`Author`](crate::Author).
    AuthorId
);

typed_id!(
    /// Identifier of a [`User`](crate::User).
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: AuthorId = "42".parse().unwrap();
        assert_eq!(id, AuthorId::new(42));
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_unassigned() {
        assert!(!UserId::UNASSIGNED.is_assigned());
        assert!(UserId::new(1).is_assigned());
    }

    #[test]
    fn test_serde_is_transparent() {
        let json = serde_json::to_string(&AuthorId::new(5)).unwrap();
        assert_eq!(json, "5");
    }
}
