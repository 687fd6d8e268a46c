//! Group and version aware JSON projection of domain entities.
//!
//! Entities describe their public fields through [`Exposed`]; each field names
//! the serialization groups it belongs to and, optionally, the API version it
//! first appeared in. A [`SerializationContext`] selects which of those fields
//! end up in the rendered JSON.

use crate::LibrisResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when an API version string cannot be parsed.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid API version: {0}")]
pub struct InvalidVersionError(String);

/// An API serialization version such as `1.0` or `2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ApiVersion {
    major: u16,
    minor: u16,
}

impl ApiVersion {
    /// Version `1.0`.
    pub const V1_0: Self = Self::new(1, 0);
    /// Version `2.0`.
    pub const V2_0: Self = Self::new(2, 0);

    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u16, minor: u16) -> Self {
        Self { major, minor }
    }

    /// Returns the major component.
    #[must_use]
    pub const fn major(&self) -> u16 {
        self.major
    }

    /// Returns the minor component.
    #[must_use]
    pub const fn minor(&self) -> u16 {
        self.minor
    }
}

impl FromStr for ApiVersion {
    type Err = InvalidVersionError;

    /// Accepts `2` as shorthand for `2.0`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || InvalidVersionError(s.to_string());
        let (major, minor) = match trimmed.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (trimmed, "0"),
        };
        let major = major.parse::<u16>().map_err(|_| invalid())?;
        let minor = minor.parse::<u16>().map_err(|_| invalid())?;
        Ok(Self::new(major, minor))
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl Serialize for ApiVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ApiVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A single public field of an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property name in the rendered JSON.
    pub name: &'static str,
    /// Groups the field belongs to.
    pub groups: &'static [&'static str],
    /// First API version exposing the field.
    pub since: Option<ApiVersion>,
    /// Field value.
    pub value: Value,
}

impl Field {
    /// Creates a field visible in the given groups for every version.
    pub fn new(name: &'static str, groups: &'static [&'static str], value: impl Into<Value>) -> Self {
        Self {
            name,
            groups,
            since: None,
            value: value.into(),
        }
    }

    /// Restricts the field to API versions at or above `version`.
    #[must_use]
    pub fn since(mut self, version: ApiVersion) -> Self {
        self.since = Some(version);
        self
    }
}

/// Implemented by entities that can be rendered through a
/// [`SerializationContext`].
pub trait Exposed {
    /// Returns every public field of the entity.
    fn fields(&self) -> Vec<Field>;
}

/// Selects the groups and API version used when rendering entities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializationContext {
    groups: Vec<&'static str>,
    version: Option<ApiVersion>,
}

impl SerializationContext {
    /// Creates a context restricted to the given groups.
    #[must_use]
    pub fn with_groups(groups: &[&'static str]) -> Self {
        Self {
            groups: groups.to_vec(),
            version: None,
        }
    }

    /// Sets the API version used for `since` filtering.
    #[must_use]
    pub fn version(mut self, version: Option<ApiVersion>) -> Self {
        self.version = version;
        self
    }

    /// Returns the selected API version.
    #[must_use]
    pub const fn api_version(&self) -> Option<ApiVersion> {
        self.version
    }

    /// Returns true when `field` is part of the rendered output.
    ///
    /// An empty group selection admits every group. Without a version, `since`
    /// restrictions are ignored.
    #[must_use]
    pub fn admits(&self, field: &Field) -> bool {
        let in_group =
            self.groups.is_empty() || field.groups.iter().any(|g| self.groups.contains(g));
        let in_version = match (self.version, field.since) {
            (Some(current), Some(since)) => current >= since,
            _ => true,
        };
        in_group && in_version
    }

    /// Projects an entity into a JSON object.
    pub fn project<T: Exposed + ?Sized>(&self, value: &T) -> Value {
        let object: Map<String, Value> = value
            .fields()
            .into_iter()
            .filter(|field| self.admits(field))
            .map(|field| (field.name.to_string(), field.value))
            .collect();
        Value::Object(object)
    }
}

/// Renders a single entity to a JSON string.
pub fn serialize_one<T: Exposed + ?Sized>(
    value: &T,
    context: &SerializationContext,
) -> LibrisResult<String> {
    Ok(serde_json::to_string(&context.project(value))?)
}

/// Renders a slice of entities to a JSON array string.
pub fn serialize_many<T: Exposed>(
    values: &[T],
    context: &SerializationContext,
) -> LibrisResult<String> {
    let items: Vec<Value> = values.iter().map(|v| context.project(v)).collect();
    Ok(serde_json::to_string(&items)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Book {
        id: i64,
        title: &'static str,
        isbn: &'static str,
    }

    impl Exposed for Book {
        fn fields(&self) -> Vec<Field> {
            vec![
                Field::new("id", &["list", "detail"], self.id),
                Field::new("title", &["list", "detail"], self.title),
                Field::new("isbn", &["detail"], self.isbn).since(ApiVersion::V2_0),
            ]
        }
    }

    fn book() -> Book {
        Book {
            id: 1,
            title: "Dune",
            isbn: "978-0441013593",
        }
    }

    #[test]
    fn test_parse_version() {
        assert_eq!("2.0".parse::<ApiVersion>(), Ok(ApiVersion::V2_0));
        assert_eq!("2".parse::<ApiVersion>(), Ok(ApiVersion::V2_0));
        assert_eq!("1.5".parse::<ApiVersion>(), Ok(ApiVersion::new(1, 5)));
        assert!("two".parse::<ApiVersion>().is_err());
        assert!("".parse::<ApiVersion>().is_err());
    }

    #[test]
    fn test_version_display_and_order() {
        assert_eq!(ApiVersion::V1_0.to_string(), "1.0");
        assert!(ApiVersion::V2_0 > ApiVersion::new(1, 9));
    }

    #[test]
    fn test_group_filter() {
        let ctx = SerializationContext::with_groups(&["list"]);
        assert_eq!(ctx.project(&book()), json!({"id": 1, "title": "Dune"}));
    }

    #[test]
    fn test_since_filter_depends_on_version() {
        let v1 = SerializationContext::with_groups(&["detail"]).version(Some(ApiVersion::V1_0));
        let v2 = SerializationContext::with_groups(&["detail"]).version(Some(ApiVersion::V2_0));
        assert!(v1.project(&book()).get("isbn").is_none());
        assert_eq!(v2.project(&book())["isbn"], json!("978-0441013593"));
    }

    #[test]
    fn test_since_ignored_without_version() {
        let ctx = SerializationContext::with_groups(&["detail"]);
        assert!(ctx.project(&book()).get("isbn").is_some());
    }

    #[test]
    fn test_serialize_many_empty() {
        let ctx = SerializationContext::with_groups(&["list"]);
        assert_eq!(serialize_many::<Book>(&[], &ctx).unwrap(), "[]");
    }

    #[test]
    fn test_serialize_one() {
        let ctx = SerializationContext::with_groups(&["list"]);
        let text = serialize_one(&book(), &ctx).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value, json!({"id": 1, "title": "Dune"}));
    }
}
