//! Tenant lifecycle service — create, get, rename/update, delete and
//! admin authentication.
//!
//! Each operation is a sequence of individually atomic store calls, not a
//! transaction. Failures after the first write trigger best-effort
//! compensation; compensation errors are logged and never replace the
//! original error.

use tenantry_auth::{AuthenticatedAdmin, CredentialStore};
use tenantry_core::error::{TenantryError, TenantryResult};
use tenantry_core::models::admin::{CreateAdmin, UpdateAdmin};
use tenantry_core::models::organization::{
    AdminSummary, CreateOrganization, Organization, UpdateOrganization,
};
use tenantry_core::repository::{
    AdminRepository, OrganizationRepository, TenantCollectionRepository,
};
use tenantry_core::sanitize::{is_valid_collection_name, sanitize_collection_name};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Input for provisioning a new tenant.
#[derive(Debug, Clone)]
pub struct CreateTenant {
    pub organization_name: String,
    pub email: String,
    pub password: String,
}

/// Changes to apply to an existing tenant. `None` leaves a field alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateTenant {
    pub new_organization_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

fn require_name(name: &str) -> TenantryResult<()> {
    if name.trim().is_empty() {
        return Err(TenantryError::validation("Organization name must not be empty"));
    }
    Ok(())
}

/// Derive and validate the collection identifier for a tenant name.
fn derive_collection(name: &str) -> TenantryResult<String> {
    let collection = sanitize_collection_name(name);
    if !is_valid_collection_name(&collection) {
        return Err(TenantryError::InvalidDerivedName { collection });
    }
    Ok(collection)
}

/// Orchestrates the organization, admin and tenant collection stores.
///
/// Generic over repository implementations so that the lifecycle layer
/// has no dependency on the database crate.
pub struct TenantLifecycleService<O, A, T>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    organizations: O,
    admins: A,
    collections: T,
    credentials: CredentialStore,
}

impl<O, A, T> TenantLifecycleService<O, A, T>
where
    O: OrganizationRepository,
    A: AdminRepository,
    T: TenantCollectionRepository,
{
    pub fn new(organizations: O, admins: A, collections: T, credentials: CredentialStore) -> Self {
        Self {
            organizations,
            admins,
            collections,
            credentials,
        }
    }

    /// Provision a tenant: admin record, organization record, then an
    /// empty data collection.
    pub async fn create(&self, input: CreateTenant) -> TenantryResult<Organization> {
        let name = input.organization_name;
        require_name(&name)?;

        if self.organizations.find_by_name(&name).await?.is_some() {
            return Err(TenantryError::DuplicateTenant { name });
        }

        let collection = derive_collection(&name)?;
        if self.collections.exists(&collection).await? {
            return Err(TenantryError::CollectionCollision { collection });
        }

        let admin_id = Uuid::new_v4();
        let password_hash = self.credentials.hash(&input.password)?;

        // Nothing has been written yet if the admin insert fails.
        let admin = self
            .admins
            .create(CreateAdmin {
                id: admin_id,
                email: input.email,
                password_hash,
                organization_name: name.clone(),
            })
            .await?;

        let organization = match self
            .organizations
            .create(CreateOrganization {
                name: name.clone(),
                collection_name: collection.clone(),
                admin: AdminSummary {
                    admin_id,
                    email: admin.email,
                },
            })
            .await
        {
            Ok(organization) => organization,
            Err(err) => {
                self.rollback_create(&name, None, admin_id).await;
                return Err(err);
            }
        };

        let provisioned = match self.collections.create(&collection).await {
            Ok(true) => Ok(()),
            Ok(false) => Err("collection store did not create the collection".to_string()),
            Err(err) => Err(err.to_string()),
        };
        if let Err(reason) = provisioned {
            self.rollback_create(&name, Some(organization.id), admin_id)
                .await;
            return Err(TenantryError::ProvisioningFailed { collection, reason });
        }

        info!(
            organization = %organization.name,
            collection = %organization.collection_name,
            admin_id = %admin_id,
            "Organization created"
        );
        Ok(organization)
    }

    /// Best-effort removal of the records written by a failed create.
    ///
    /// Deletes by id so a concurrent create of a same-named tenant keeps
    /// its own records.
    async fn rollback_create(
        &self,
        name: &str,
        organization_id: Option<Uuid>,
        admin_id: Uuid,
    ) {
        if let Some(organization_id) = organization_id {
            if let Err(err) = self.organizations.delete(organization_id).await {
                warn!(
                    organization = %name,
                    error = %err,
                    "Rollback: failed to delete organization record"
                );
            }
        }
        if let Err(err) = self.admins.delete(admin_id).await {
            warn!(
                organization = %name,
                admin_id = %admin_id,
                error = %err,
                "Rollback: failed to delete admin record"
            );
        }
        info!(organization = %name, "Rolled back partially created organization");
    }

    /// Case-insensitive lookup by tenant name.
    pub async fn get(&self, name: &str) -> TenantryResult<Organization> {
        self.organizations
            .find_by_name(name)
            .await?
            .ok_or_else(|| TenantryError::not_found(name))
    }

    /// Rename the tenant and/or change its admin's email or password.
    ///
    /// A rename copies the tenant data into the newly derived collection
    /// before any metadata is written; the old collection is dropped only
    /// once both the organization and the admin record carry the new name.
    /// A failed admin write restores the organization record.
    pub async fn update(&self, name: &str, input: UpdateTenant) -> TenantryResult<Organization> {
        let current = self.get(name).await?;

        let password_hash = match input.password {
            Some(password) => Some(self.credentials.hash(&password)?),
            None => None,
        };

        let mut org_patch = UpdateOrganization::default();
        let mut admin_patch = UpdateAdmin {
            password_hash,
            ..Default::default()
        };
        let mut migrated_into: Option<String> = None;

        if let Some(new_name) = input
            .new_organization_name
            .filter(|new_name| !same_name(new_name, &current.name))
        {
            require_name(&new_name)?;
            if self.organizations.find_by_name(&new_name).await?.is_some() {
                return Err(TenantryError::DuplicateTenant { name: new_name });
            }

            // Re-derived from the raw name, never from the old identifier.
            let new_collection = derive_collection(&new_name)?;
            if new_collection != current.collection_name {
                if self.collections.exists(&new_collection).await? {
                    return Err(TenantryError::CollectionCollision {
                        collection: new_collection,
                    });
                }
                self.migrate_collection(&current.collection_name, &new_collection)
                    .await?;
                migrated_into = Some(new_collection.clone());
            }

            org_patch.name = Some(new_name.clone());
            org_patch.collection_name = Some(new_collection);
            admin_patch.organization_name = Some(new_name);
        }

        if let Some(email) = input.email {
            let email = email.to_lowercase();
            org_patch.admin_email = Some(email.clone());
            admin_patch.email = Some(email);
        }

        let final_name = org_patch.name.clone().unwrap_or_else(|| current.name.clone());
        let org_written = !org_patch.is_empty();

        if org_written {
            let written = self
                .organizations
                .update_by_name(&current.name, org_patch)
                .await;
            let failure = match written {
                Ok(Some(_)) => None,
                Ok(None) => Some(TenantryError::not_found(&current.name)),
                Err(err) => Some(err),
            };
            if let Some(err) = failure {
                if let Some(new_collection) = &migrated_into {
                    self.discard_collection(new_collection).await;
                }
                return Err(err);
            }
        }

        if !admin_patch.is_empty() {
            match self.admins.update(current.admin.admin_id, admin_patch).await {
                Ok(Some(_)) => {}
                Ok(None) => warn!(
                    organization = %final_name,
                    admin_id = %current.admin.admin_id,
                    "Organization has no matching admin record; admin update skipped"
                ),
                Err(err) => {
                    // The old collection is still intact at this point.
                    let restored =
                        !org_written || self.restore_organization(&final_name, &current).await;
                    if let (true, Some(new_collection)) = (restored, &migrated_into) {
                        self.discard_collection(new_collection).await;
                    }
                    return Err(err);
                }
            }
        }

        if migrated_into.is_some() {
            self.discard_collection(&current.collection_name).await;
        }

        let updated = self.get(&final_name).await?;
        info!(
            organization = %updated.name,
            previous = %current.name,
            collection = %updated.collection_name,
            "Organization updated"
        );
        Ok(updated)
    }

    async fn migrate_collection(&self, from: &str, to: &str) -> TenantryResult<()> {
        let failure = |reason: String| TenantryError::MigrationFailed {
            from: from.to_string(),
            to: to.to_string(),
            reason,
        };

        let reason = match self.collections.migrate(from, to).await {
            Ok(true) => return Ok(()),
            Ok(false) => "collection store reported failure".to_string(),
            Err(err) => err.to_string(),
        };

        // The target did not exist before the copy started.
        self.discard_collection(to).await;
        Err(failure(reason))
    }

    /// Point the organization record back at its pre-update state.
    ///
    /// Returns whether the record was restored.
    async fn restore_organization(&self, name: &str, previous: &Organization) -> bool {
        let patch = UpdateOrganization {
            name: Some(previous.name.clone()),
            collection_name: Some(previous.collection_name.clone()),
            admin_email: Some(previous.admin.email.clone()),
        };
        match self.organizations.update_by_name(name, patch).await {
            Ok(Some(_)) => {
                info!(
                    organization = %previous.name,
                    "Restored organization record after failed update"
                );
                true
            }
            Ok(None) => {
                warn!(organization = %name, "Rollback: organization record vanished during update");
                false
            }
            Err(err) => {
                warn!(
                    organization = %name,
                    error = %err,
                    "Rollback: failed to restore organization record"
                );
                false
            }
        }
    }

    async fn discard_collection(&self, collection: &str) {
        if let Err(err) = self.collections.drop_collection(collection).await {
            warn!(collection = %collection, error = %err, "Failed to drop tenant collection");
        }
    }

    /// Remove the tenant's data collection, admin and organization.
    ///
    /// Returns whether the organization record was actually removed.
    /// Each step is individually idempotent, so a retry after a crash
    /// finishes the job.
    pub async fn delete(&self, name: &str) -> TenantryResult<bool> {
        let organization = self.get(name).await?;

        self.discard_collection(&organization.collection_name).await;
        self.admins.delete_by_organization(&organization.name).await?;
        let removed = self.organizations.delete_by_name(&organization.name).await?;

        info!(
            organization = %organization.name,
            collection = %organization.collection_name,
            removed,
            "Organization deleted"
        );
        Ok(removed)
    }

    /// Verify admin credentials.
    ///
    /// An unknown email, a wrong password and a dangling admin record all
    /// yield `Ok(None)`. Store failures are still errors.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> TenantryResult<Option<AuthenticatedAdmin>> {
        let Some(admin) = self.admins.find_by_email(email).await? else {
            debug!("Login attempt for unknown email");
            return Ok(None);
        };

        match self.credentials.verify(password, &admin.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                debug!(admin_id = %admin.id, "Login attempt with wrong password");
                return Ok(None);
            }
            Err(err) => {
                warn!(
                    admin_id = %admin.id,
                    error = %err,
                    "Stored password hash could not be verified"
                );
                return Ok(None);
            }
        }

        let Some(organization) = self
            .organizations
            .find_by_name(&admin.organization_name)
            .await?
        else {
            warn!(
                admin_id = %admin.id,
                organization = %admin.organization_name,
                "Admin references a missing organization"
            );
            return Ok(None);
        };

        Ok(Some(AuthenticatedAdmin {
            admin_id: admin.id,
            email: admin.email,
            organization_name: organization.name,
        }))
    }

    /// All organizations, oldest first.
    pub async fn list(&self) -> TenantryResult<Vec<Organization>> {
        self.organizations.list().await
    }
}
