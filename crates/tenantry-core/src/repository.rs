//! Store trait definitions for data access abstraction.
//!
//! All store operations are async. Name-keyed lookups compare the whole
//! name case-insensitively; they never do pattern or substring matching.

use uuid::Uuid;

use crate::error::TenantryResult;
use crate::models::{
    admin::{Admin, CreateAdmin, UpdateAdmin},
    document::TenantDocument,
    organization::{CreateOrganization, Organization, UpdateOrganization},
};

// ---------------------------------------------------------------------------
// Metadata (organizations and their admins)
// ---------------------------------------------------------------------------

pub trait OrganizationRepository: Send + Sync {
    fn find_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = TenantryResult<Option<Organization>>> + Send;
    fn create(
        &self,
        input: CreateOrganization,
    ) -> impl Future<Output = TenantryResult<Organization>> + Send;
    /// Returns `None` when no organization carries `name`.
    fn update_by_name(
        &self,
        name: &str,
        input: UpdateOrganization,
    ) -> impl Future<Output = TenantryResult<Option<Organization>>> + Send;
    /// Returns whether a record was actually removed.
    fn delete_by_name(&self, name: &str) -> impl Future<Output = TenantryResult<bool>> + Send;
    /// Remove exactly the record with `id`.
    fn delete(&self, id: Uuid) -> impl Future<Output = TenantryResult<bool>> + Send;
    fn list(&self) -> impl Future<Output = TenantryResult<Vec<Organization>>> + Send;
}

pub trait AdminRepository: Send + Sync {
    fn create(&self, input: CreateAdmin) -> impl Future<Output = TenantryResult<Admin>> + Send;
    /// Exact match on the lowercased email.
    fn find_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = TenantryResult<Option<Admin>>> + Send;
    /// Lookup through the organization-name back-reference.
    fn find_by_organization(
        &self,
        organization_name: &str,
    ) -> impl Future<Output = TenantryResult<Option<Admin>>> + Send;
    fn update(
        &self,
        id: Uuid,
        input: UpdateAdmin,
    ) -> impl Future<Output = TenantryResult<Option<Admin>>> + Send;
    fn delete_by_organization(
        &self,
        organization_name: &str,
    ) -> impl Future<Output = TenantryResult<bool>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = TenantryResult<bool>> + Send;
    fn list(&self) -> impl Future<Output = TenantryResult<Vec<Admin>>> + Send;
}

// ---------------------------------------------------------------------------
// Tenant data collections
// ---------------------------------------------------------------------------

pub trait TenantCollectionRepository: Send + Sync {
    /// Create an empty collection. Creating one that already exists is
    /// not an error.
    fn create(&self, collection: &str) -> impl Future<Output = TenantryResult<bool>> + Send;
    fn exists(&self, collection: &str) -> impl Future<Output = TenantryResult<bool>> + Send;
    /// Copy every document of `from` into `to`, creating `to` if needed.
    ///
    /// The source is left untouched. A missing or empty source is a
    /// successful migration of zero documents.
    fn migrate(
        &self,
        from: &str,
        to: &str,
    ) -> impl Future<Output = TenantryResult<bool>> + Send;
    /// Dropping an absent collection is a no-op.
    fn drop_collection(&self, collection: &str)
    -> impl Future<Output = TenantryResult<bool>> + Send;
    fn count(&self, collection: &str) -> impl Future<Output = TenantryResult<u64>> + Send;
    /// Identifiers of all tenant collections.
    fn list(&self) -> impl Future<Output = TenantryResult<Vec<String>>> + Send;
    fn insert_document(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> impl Future<Output = TenantryResult<TenantDocument>> + Send;
    fn list_documents(
        &self,
        collection: &str,
    ) -> impl Future<Output = TenantryResult<Vec<TenantDocument>>> + Send;
}
