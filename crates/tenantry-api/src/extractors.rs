//! Axum extractors: bearer-token admin identity and JSON/query bodies
//! whose rejections use the API error format.

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequest, FromRequestParts, Query},
    http::{header::AUTHORIZATION, request::Parts},
};
use tenantry_auth::{AccessTokenClaims, TokenIssuer};
use tracing::debug;

use crate::error::ApiError;

/// JSON body; malformed or mistyped bodies are a 400.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string; missing or mistyped parameters are a 400.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Admin identity taken from a verified `Authorization: Bearer` token.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub AccessTokenClaims);

impl CurrentAdmin {
    /// Admins may only act on their own organization, compared ignoring
    /// case.
    pub fn authorize(&self, organization_name: &str) -> Result<(), ApiError> {
        if self.0.organization_name.to_lowercase() != organization_name.to_lowercase() {
            return Err(ApiError::Forbidden(
                "You do not have permission to access this organization".to_string(),
            ));
        }
        Ok(())
    }
}

/// Split a header value of the form `<scheme> <token>`.
fn bearer_token(header: &str) -> Result<&str, ApiError> {
    let mut parts = header.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) => {
            if scheme.eq_ignore_ascii_case("bearer") {
                Ok(token)
            } else {
                Err(ApiError::Unauthorized(
                    "Invalid authentication scheme".to_string(),
                ))
            }
        }
        _ => Err(ApiError::Unauthorized(
            "Invalid authorization header format".to_string(),
        )),
    }
}

impl<S> FromRequestParts<S> for CurrentAdmin
where
    S: Send + Sync,
    Arc<TokenIssuer>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("Authorization header missing".to_string()))?
            .to_str()
            .map_err(|_| {
                ApiError::Unauthorized("Invalid authorization header format".to_string())
            })?;

        let token = bearer_token(header)?;
        let issuer = Arc::<TokenIssuer>::from_ref(state);
        let claims = issuer.verify(token).map_err(|err| {
            debug!(error = %err, "Rejected bearer token");
            ApiError::Unauthorized("Invalid or expired token".to_string())
        })?;

        Ok(CurrentAdmin(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims_for(organization_name: &str) -> CurrentAdmin {
        CurrentAdmin(AccessTokenClaims {
            sub: uuid::Uuid::new_v4().to_string(),
            email: "admin@acme.com".into(),
            organization_name: organization_name.into(),
            iss: "tenantry".into(),
            iat: 0,
            exp: 0,
            jti: uuid::Uuid::new_v4().to_string(),
        })
    }

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        assert_eq!(bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(bearer_token("bearer abc").unwrap(), "abc");
    }

    #[test]
    fn other_schemes_are_rejected() {
        let err = bearer_token("Basic dXNlcjpwdw==").unwrap_err();
        assert_eq!(err.to_string(), "Invalid authentication scheme");
    }

    #[test]
    fn malformed_headers_are_rejected() {
        for header in ["Bearer", "Bearer a b", ""] {
            let err = bearer_token(header).unwrap_err();
            assert_eq!(err.to_string(), "Invalid authorization header format");
        }
    }

    #[test]
    fn own_organization_is_authorized_ignoring_case() {
        assert!(claims_for("Acme").authorize("ACME").is_ok());
    }

    #[test]
    fn other_organization_is_forbidden() {
        let err = claims_for("Acme").authorize("Beta").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
