//! Cache key generators for consistent key naming.

/// Name of a cached list, used as the first key segment.
///
/// Names are restricted to `[A-Za-z0-9_:.]`. Since `-` is excluded, the
/// segments of a key can never run into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListName(&'static str);

impl ListName {
    /// Creates a list name, panicking at compile time when used in a
    /// constant with a forbidden character.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        assert!(is_valid_name(name), "list names may only contain [A-Za-z0-9_:.]");
        Self(name)
    }

    /// Returns the name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

const fn is_valid_name(name: &str) -> bool {
    let bytes = name.as_bytes();
    if bytes.is_empty() {
        return false;
    }
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !(b.is_ascii_alphanumeric() || b == b'_' || b == b':' || b == b'.') {
            return false;
        }
        i += 1;
    }
    true
}

/// Author list.
pub const AUTHORS: ListName = ListName::new("authors");

/// User list.
pub const USERS: ListName = ListName::new("users");

/// Invalidation tags.
pub mod tags {
    /// Every cached author page.
    pub const AUTHORS: &str = "authorsCache";
    /// Every cached user page.
    pub const USERS: &str = "usersCache";
}

/// Builds the key of one cached list page.
///
/// `authors-2-5` without a version, `users-1-100-2.0` with one.
#[must_use]
pub fn build_key(list: ListName, page: u32, limit: u32, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}-{}-{}-{}", list.as_str(), page, limit, version),
        None => format!("{}-{}-{}", list.as_str(), page, limit),
    }
}
