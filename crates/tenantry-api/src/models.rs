//! Request and response bodies for the organization API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenantry_core::models::organization::Organization;
use uuid::Uuid;

use crate::error::ApiError;
use crate::validation::{validate_email, validate_organization_name, validate_password};

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationRequest {
    pub organization_name: String,
    pub email: String,
    pub password: String,
}

impl CreateOrganizationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_organization_name("organization_name", &self.organization_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

#[derive(Debug, Deserialize)]
pub struct GetOrganizationQuery {
    pub organization_name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrganizationRequest {
    pub organization_name: String,
    #[serde(default)]
    pub new_organization_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl UpdateOrganizationRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(name) = &self.new_organization_name {
            validate_organization_name("new_organization_name", name)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if let Some(password) = &self.password {
            validate_password(password)?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct DeleteOrganizationRequest {
    pub organization_name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_email(&self.email)
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub admin_id: Uuid,
    pub email: String,
}

/// Public view of an organization.
#[derive(Debug, Serialize)]
pub struct OrganizationMetadata {
    pub organization_name: String,
    pub collection_name: String,
    pub admin: AdminInfo,
    pub created_at: DateTime<Utc>,
}

impl From<Organization> for OrganizationMetadata {
    fn from(org: Organization) -> Self {
        Self {
            organization_name: org.name,
            collection_name: org.collection_name,
            admin: AdminInfo {
                admin_id: org.admin.admin_id,
                email: org.admin.email,
            },
            created_at: org.created_at,
        }
    }
}

/// Body of create and update responses.
#[derive(Debug, Serialize)]
pub struct OrganizationChangedResponse {
    pub message: String,
    pub organization: OrganizationMetadata,
}

#[derive(Debug, Serialize)]
pub struct OrganizationResponse {
    pub organization: OrganizationMetadata,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Seconds until the token expires.
    pub expires_in: u64,
}

#[derive(Debug, Serialize)]
pub struct ServiceInfoResponse {
    pub message: String,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_fields_are_optional() {
        let request: UpdateOrganizationRequest =
            serde_json::from_str(r#"{"organization_name": "Acme"}"#).unwrap();
        assert!(request.new_organization_name.is_none());
        assert!(request.email.is_none());
        assert!(request.password.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn update_request_validates_present_fields_only() {
        let request: UpdateOrganizationRequest = serde_json::from_str(
            r#"{"organization_name": "Acme", "new_organization_name": "", "password": "longenough"}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn create_request_checks_every_field() {
        let request = CreateOrganizationRequest {
            organization_name: "Acme".into(),
            email: "admin@acme.com".into(),
            password: "short".into(),
        };
        assert!(request.validate().is_err());
    }
}
