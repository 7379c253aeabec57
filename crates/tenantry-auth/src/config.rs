//! Authentication configuration.

/// Issuer used when none is configured.
pub const DEFAULT_ISSUER: &str = "tenantry";

/// Configuration for credential hashing and token issuance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Shared HMAC secret for HS256 token signing and verification.
    pub jwt_secret: String,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Access token lifetime in seconds (default: 86_400 = 24 hours).
    pub token_lifetime_secs: u64,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length accepted at registration and update.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_issuer: DEFAULT_ISSUER.into(),
            token_lifetime_secs: 86_400,
            pepper: None,
            min_password_length: 8,
        }
    }
}
