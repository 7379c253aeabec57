//! Tenantry Auth — admin password hashing and bearer token
//! issuance/validation.

pub mod config;
pub mod error;
pub mod password;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use password::CredentialStore;
pub use token::{AccessTokenClaims, AuthenticatedAdmin, TokenIssuer};
