//! API version negotiation.

use libris_config::ApiConfig;
use libris_core::{ApiVersion, LibrisError, LibrisResult};

/// Resolves the serialization version requested by a client.
///
/// The version travels as a media type parameter of the `Accept` header,
/// e.g. `application/json; version=2.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionResolver {
    default: ApiVersion,
}

impl VersionResolver {
    /// Creates a resolver falling back to `default`.
    #[must_use]
    pub const fn new(default: ApiVersion) -> Self {
        Self { default }
    }

    /// Creates a resolver from `api.default_version`.
    pub fn from_config(config: &ApiConfig) -> LibrisResult<Self> {
        let default = config.default_version.parse().map_err(|e| {
            LibrisError::Configuration(format!("api.default_version: {}", e))
        })?;
        Ok(Self::new(default))
    }

    /// Returns the fallback version.
    #[must_use]
    pub const fn default_version(&self) -> ApiVersion {
        self.default
    }

    /// Returns the first valid `version` parameter of `accept`, or the
    /// default version.
    #[must_use]
    pub fn resolve(&self, accept: Option<&str>) -> ApiVersion {
        accept
            .and_then(requested_version)
            .unwrap_or(self.default)
    }
}

impl Default for VersionResolver {
    fn default() -> Self {
        Self::new(ApiVersion::V1_0)
    }
}

fn requested_version(accept: &str) -> Option<ApiVersion> {
    accept
        .split(',')
        .flat_map(|media_range| media_range.split(';').skip(1))
        .filter_map(|param| {
            let (name, value) = param.split_once('=')?;
            name.trim()
                .eq_ignore_ascii_case("version")
                .then(|| value.trim().trim_matches('"'))
        })
        .find_map(|value| value.parse().ok())
}
