//! Authentication-related DTOs.

use serde::{Deserialize, Serialize};

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The user's e-mail.
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed access token.
    pub token: String,
}
