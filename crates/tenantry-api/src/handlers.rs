//! HTTP handlers for organization management and admin login.

use axum::{Json, extract::State, http::StatusCode};
use tenantry_core::repository::{
    AdminRepository, OrganizationRepository, TenantCollectionRepository,
};
use tenantry_lifecycle::{CreateTenant, UpdateTenant};

use crate::error::ApiError;
use crate::extractors::{ApiJson, ApiQuery, CurrentAdmin};
use crate::models::{
    CreateOrganizationRequest, DeleteOrganizationRequest, GetOrganizationQuery, HealthResponse,
    LoginRequest, MessageResponse, OrganizationChangedResponse, OrganizationResponse,
    ServiceInfoResponse, TokenResponse, UpdateOrganizationRequest,
};
use crate::router::AppState;

/// GET /
pub async fn root<O, A, T>(State(state): State<AppState<O, A, T>>) -> Json<ServiceInfoResponse>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    Json(ServiceInfoResponse {
        message: "Organization Management Service API".to_string(),
        name: state.app_name.clone(),
        version: state.app_version.clone(),
    })
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

/// POST /org/create
pub async fn create_organization<O, A, T>(
    State(state): State<AppState<O, A, T>>,
    ApiJson(request): ApiJson<CreateOrganizationRequest>,
) -> Result<(StatusCode, Json<OrganizationChangedResponse>), ApiError>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    request.validate()?;

    let organization = state
        .lifecycle
        .create(CreateTenant {
            organization_name: request.organization_name,
            email: request.email,
            password: request.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrganizationChangedResponse {
            message: "Organization created successfully".to_string(),
            organization: organization.into(),
        }),
    ))
}

/// GET /org/get?organization_name=
pub async fn get_organization<O, A, T>(
    State(state): State<AppState<O, A, T>>,
    ApiQuery(query): ApiQuery<GetOrganizationQuery>,
) -> Result<Json<OrganizationResponse>, ApiError>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    let organization = state.lifecycle.get(&query.organization_name).await?;

    Ok(Json(OrganizationResponse {
        organization: organization.into(),
    }))
}

/// PUT /org/update
pub async fn update_organization<O, A, T>(
    State(state): State<AppState<O, A, T>>,
    admin: CurrentAdmin,
    ApiJson(request): ApiJson<UpdateOrganizationRequest>,
) -> Result<Json<OrganizationChangedResponse>, ApiError>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    admin.authorize(&request.organization_name)?;
    request.validate()?;

    let organization = state
        .lifecycle
        .update(
            &request.organization_name,
            UpdateTenant {
                new_organization_name: request.new_organization_name,
                email: request.email,
                password: request.password,
            },
        )
        .await?;

    Ok(Json(OrganizationChangedResponse {
        message: "Organization updated successfully".to_string(),
        organization: organization.into(),
    }))
}

/// DELETE /org/delete
pub async fn delete_organization<O, A, T>(
    State(state): State<AppState<O, A, T>>,
    admin: CurrentAdmin,
    ApiJson(request): ApiJson<DeleteOrganizationRequest>,
) -> Result<Json<MessageResponse>, ApiError>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    admin.authorize(&request.organization_name)?;

    if !state.lifecycle.delete(&request.organization_name).await? {
        return Err(ApiError::NotFound("Organization not found".to_string()));
    }

    Ok(Json(MessageResponse {
        message: format!(
            "Organization '{}' deleted successfully",
            request.organization_name
        ),
    }))
}

/// POST /admin/login
pub async fn login<O, A, T>(
    State(state): State<AppState<O, A, T>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    request.validate()?;

    let admin = state
        .lifecycle
        .authenticate(&request.email, &request.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid email or password".to_string()))?;

    let access_token = state
        .tokens
        .issue(&admin)
        .map_err(|err| ApiError::Internal(err.to_string()))?;

    Ok(Json(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.tokens.lifetime_secs(),
    }))
}
