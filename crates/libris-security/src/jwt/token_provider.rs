//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use libris_config::SecurityConfig;
use libris_core::{LibrisError, LibrisResult, User};
use std::sync::Arc;
use tracing::{debug, warn};

/// A signed access token.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Encoded JWT.
    pub token: String,
    /// Expiration instant.
    pub expires_at: DateTime<Utc>,
}

/// JWT token provider service.
#[derive(Clone)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: Arc<SecurityConfig>,
    validation: Validation,
}

impl TokenProvider {
    /// Creates a new token provider.
    #[must_use]
    pub fn new(config: Arc<SecurityConfig>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            config,
            validation,
        }
    }

    /// Generates an access token for a user.
    pub fn generate_token(&self, user: &User) -> LibrisResult<IssuedToken> {
        let expires_at = i64::try_from(self.config.jwt_access_expiration_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                LibrisError::Configuration("security.jwt_access_expiration_secs is too large".into())
            })?;

        let claims = Claims::new(
            user.id,
            user.email.clone(),
            user.roles().to_vec(),
            self.config.jwt_issuer.clone(),
            self.config.jwt_audience.clone(),
            expires_at,
        );

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| LibrisError::Internal(format!("Failed to generate access token: {}", e)))?;

        debug!("Generated access token for user {}", user.id);
        Ok(IssuedToken { token, expires_at })
    }

    /// Validates a token and returns the claims.
    pub fn validate_token(&self, token: &str) -> LibrisResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                warn!("Token validation failed: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => LibrisError::TokenExpired,
                    ErrorKind::InvalidToken | ErrorKind::InvalidSignature => {
                        LibrisError::InvalidToken("Invalid token signature".to_string())
                    }
                    ErrorKind::InvalidIssuer => {
                        LibrisError::InvalidToken("Invalid token issuer".to_string())
                    }
                    ErrorKind::InvalidAudience => {
                        LibrisError::InvalidToken("Invalid token audience".to_string())
                    }
                    _ => LibrisError::InvalidToken(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("issuer", &self.config.jwt_issuer)
            .field("audience", &self.config.jwt_audience)
            .finish_non_exhaustive()
    }
}
