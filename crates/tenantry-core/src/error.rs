//! Error types for the organization service.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenantryError {
    #[error("Organization '{name}' already exists")]
    DuplicateTenant { name: String },

    #[error("Invalid collection name generated: {collection}")]
    InvalidDerivedName { collection: String },

    #[error("Collection '{collection}' already exists")]
    CollectionCollision { collection: String },

    #[error("Organization '{name}' not found")]
    NotFound { name: String },

    #[error("Failed to migrate organization collection from '{from}' to '{to}': {reason}")]
    MigrationFailed {
        from: String,
        to: String,
        reason: String,
    },

    #[error("Failed to create organization collection '{collection}': {reason}")]
    ProvisioningFailed { collection: String, reason: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Authentication failed: {reason}")]
    AuthenticationFailed { reason: String },

    #[error("Forbidden: {reason}")]
    Forbidden { reason: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptography error: {0}")]
    Crypto(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl TenantryError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Caller mistakes (bad input, name clashes) as opposed to failures of
    /// the service or its backing store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::DuplicateTenant { .. }
                | Self::InvalidDerivedName { .. }
                | Self::CollectionCollision { .. }
                | Self::Validation { .. }
        )
    }
}

pub type TenantryResult<T> = Result<T, TenantryError>;
