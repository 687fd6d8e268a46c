//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use libris_core::LibrisError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Prefix of environment variables overriding configuration values.
pub const ENV_PREFIX: &str = "LIBRIS";

/// Configuration loader with runtime reload support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables such as `LIBRIS__SERVER__PORT`
    pub fn new(config_dir: impl Into<String>) -> Result<Self, LibrisError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config_dir = config_dir.into();
        let environment =
            std::env::var("LIBRIS_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let config = load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, LibrisError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), LibrisError> {
        let environment = self.config.read().await.app.environment.clone();
        let new_config = load_config(&self.config_dir, &environment)?;
        *self.config.write().await = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }
}

/// Loads and validates configuration from `config_dir` for `environment`.
pub fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, LibrisError> {
    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder()
        .set_default("app.environment", environment)
        .map_err(config_error_to_libris_error)?;

    for name in ["default", environment, "local"] {
        let path = format!("{}/{}.toml", config_dir, name);
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let app_config: AppConfig = builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(config_error_to_libris_error)?;

    validate_config(&app_config)?;
    Ok(app_config)
}

/// Validates the configuration.
fn validate_config(config: &AppConfig) -> Result<(), LibrisError> {
    if config.app.is_production() && config.security.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.is_empty() {
        return Err(LibrisError::Configuration("Database URL is required".to_string()));
    }

    if config.security.jwt_secret.is_empty() {
        return Err(LibrisError::Configuration("JWT secret must not be empty".to_string()));
    }

    if config.api.default_version.parse::<libris_core::ApiVersion>().is_err() {
        return Err(LibrisError::Configuration(format!(
            "Invalid default API version: {}",
            config.api.default_version
        )));
    }

    if config.api.max_page_size == 0 {
        return Err(LibrisError::Configuration(
            "api.max_page_size must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_libris_error(err: ConfigError) -> LibrisError {
    LibrisError::Configuration(err.to_string())
}
