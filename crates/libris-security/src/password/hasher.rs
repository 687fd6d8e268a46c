//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, Params,
};
use libris_core::{LibrisError, LibrisResult};
use std::sync::Arc;
use tracing::debug;

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Send + Sync {
    /// Hashes a password.
    fn hash(&self, password: &str) -> LibrisResult<String>;

    /// Verifies a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> LibrisResult<bool>;
}

/// Password hasher service using Argon2id.
#[derive(Clone)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    /// Creates a new password hasher with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::with_params(Params::DEFAULT)
    }

    /// Creates a new password hasher with custom parameters.
    #[must_use]
    pub fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher with the given memory cost in KiB.
    ///
    /// Falls back to the default parameters when the cost is out of range.
    #[must_use]
    pub fn with_memory_cost(kib: u32) -> Self {
        let params = Params::new(kib, Params::DEFAULT_T_COST, Params::DEFAULT_P_COST, None)
            .unwrap_or(Params::DEFAULT);
        Self::with_params(params)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> LibrisResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| LibrisError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }

    fn verify(&self, password: &str, hash: &str) -> LibrisResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| LibrisError::Internal(format!("Invalid password hash format: {}", e)))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => {
                debug!("Password verification failed: incorrect password");
                Ok(false)
            }
            Err(e) => Err(LibrisError::Internal(format!(
                "Password verification error: {}",
                e
            ))),
        }
    }
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}
