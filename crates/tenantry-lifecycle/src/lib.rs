//! Tenantry Lifecycle — keeps an organization's metadata, admin account
//! and tenant data collection consistent across create, rename and
//! delete.

pub mod service;

pub use service::{CreateTenant, TenantLifecycleService, UpdateTenant};
pub use tenantry_auth::AuthenticatedAdmin;
