//! Router configuration for the organization API.

use std::sync::Arc;

use axum::{
    Router,
    extract::FromRef,
    routing::{delete, get, post, put},
};
use tenantry_auth::TokenIssuer;
use tenantry_core::repository::{
    AdminRepository, OrganizationRepository, TenantCollectionRepository,
};
use tenantry_lifecycle::TenantLifecycleService;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;

/// Application state shared by all handlers.
pub struct AppState<O, A, T>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    pub lifecycle: Arc<TenantLifecycleService<O, A, T>>,
    pub tokens: Arc<TokenIssuer>,
    pub app_name: String,
    pub app_version: String,
}

impl<O, A, T> AppState<O, A, T>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    pub fn new(
        lifecycle: TenantLifecycleService<O, A, T>,
        tokens: TokenIssuer,
        app_name: impl Into<String>,
        app_version: impl Into<String>,
    ) -> Self {
        Self {
            lifecycle: Arc::new(lifecycle),
            tokens: Arc::new(tokens),
            app_name: app_name.into(),
            app_version: app_version.into(),
        }
    }
}

// Manual impl: the repositories themselves need not be `Clone`.
impl<O, A, T> Clone for AppState<O, A, T>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    fn clone(&self) -> Self {
        Self {
            lifecycle: Arc::clone(&self.lifecycle),
            tokens: Arc::clone(&self.tokens),
            app_name: self.app_name.clone(),
            app_version: self.app_version.clone(),
        }
    }
}

impl<O, A, T> FromRef<AppState<O, A, T>> for Arc<TokenIssuer>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    fn from_ref(state: &AppState<O, A, T>) -> Self {
        Arc::clone(&state.tokens)
    }
}

/// Create the organization management router.
///
/// Provides:
/// - GET / - Service name and version
/// - GET /health - Liveness probe
/// - POST /org/create - Create an organization and its admin
/// - GET /org/get?organization_name= - Fetch organization metadata
/// - PUT /org/update - Rename / change admin credentials (bearer)
/// - DELETE /org/delete - Delete an organization (bearer)
/// - POST /admin/login - Exchange admin credentials for a bearer token
pub fn router<O, A, T>(state: AppState<O, A, T>) -> Router
where
    O: OrganizationRepository + 'static,
    A: AdminRepository + 'static,
    T: TenantCollectionRepository + 'static,
{
    Router::new()
        .route("/", get(handlers::root::<O, A, T>))
        .route("/health", get(handlers::health))
        .route("/org/create", post(handlers::create_organization::<O, A, T>))
        .route("/org/get", get(handlers::get_organization::<O, A, T>))
        .route("/org/update", put(handlers::update_organization::<O, A, T>))
        .route("/org/delete", delete(handlers::delete_organization::<O, A, T>))
        .route("/admin/login", post(handlers::login::<O, A, T>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
