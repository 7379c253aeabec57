//! Database-specific error types and conversions.

use tenantry_core::error::TenantryError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Invalid collection identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("Corrupt record in {entity}: {message}")]
    Corrupt { entity: String, message: String },
}

impl From<DbError> for TenantryError {
    fn from(err: DbError) -> Self {
        TenantryError::Database(err.to_string())
    }
}
