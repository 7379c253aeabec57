//! Authentication error types.

use tenantry_core::error::TenantryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for TenantryError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::TokenExpired
            | AuthError::TokenInvalid(_) => TenantryError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::Crypto(msg) => TenantryError::Crypto(msg),
        }
    }
}
