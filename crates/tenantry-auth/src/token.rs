//! Bearer access token issuance and verification (HS256 JWT).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::AuthError;

/// JWT claims embedded in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    /// Subject — admin ID (UUID string).
    pub sub: String,
    pub email: String,
    /// Name of the organization the admin manages, as stored.
    pub organization_name: String,
    /// Issuer.
    pub iss: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token ID (UUID string).
    pub jti: String,
}

/// Identity of an admin whose credentials were verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedAdmin {
    pub admin_id: Uuid,
    pub email: String,
    pub organization_name: String,
}

/// Signs and verifies access tokens with a shared HMAC secret.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    lifetime_secs: u64,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: config.jwt_issuer.clone(),
            lifetime_secs: config.token_lifetime_secs,
        }
    }

    /// Token lifetime in seconds, reported to clients as `expires_in`.
    pub fn lifetime_secs(&self) -> u64 {
        self.lifetime_secs
    }

    /// Issue a signed access token for `admin`.
    pub fn issue(&self, admin: &AuthenticatedAdmin) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = AccessTokenClaims {
            sub: admin.admin_id.to_string(),
            email: admin.email.clone(),
            organization_name: admin.organization_name.clone(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + self.lifetime_secs as i64,
            jti: Uuid::new_v4().to_string(),
        };
        self.encode(&claims)
    }

    fn encode(&self, claims: &AccessTokenClaims) -> Result<String, AuthError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::Crypto(format!("JWT encode: {e}")))
    }

    /// Decode and verify an access token (signature, expiry, issuer).
    ///
    /// Purely stateless: no database lookup is performed.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss"]);

        jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid(e.to_string()),
            })
    }
}
