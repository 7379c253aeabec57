//! SurrealDB implementation of [`OrganizationRepository`].

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tenantry_core::error::TenantryResult;
use tenantry_core::models::organization::{
    AdminSummary, CreateOrganization, Organization, UpdateOrganization,
};
use tenantry_core::repository::OrganizationRepository;
use tracing::debug;
use uuid::Uuid;

use super::name_key;
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct OrganizationRow {
    name: String,
    collection_name: String,
    admin_id: String,
    admin_email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrganizationRow {
    fn into_organization(self, id: Uuid) -> Result<Organization, DbError> {
        let admin_id = parse_uuid(&self.admin_id, "admin_id")?;
        Ok(Organization {
            id,
            name: self.name,
            collection_name: self.collection_name,
            admin: AdminSummary {
                admin_id,
                email: self.admin_email,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct OrganizationRowWithId {
    record_id: String,
    name: String,
    collection_name: String,
    admin_id: String,
    admin_email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrganizationRowWithId {
    fn try_into_organization(self) -> Result<Organization, DbError> {
        let id = parse_uuid(&self.record_id, "id")?;
        OrganizationRow {
            name: self.name,
            collection_name: self.collection_name,
            admin_id: self.admin_id,
            admin_email: self.admin_email,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
        .into_organization(id)
    }
}

fn parse_uuid(raw: &str, field: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Corrupt {
        entity: "organization".into(),
        message: format!("invalid {field} UUID: {e}"),
    })
}

/// SurrealDB implementation of the Organization store.
#[derive(Clone)]
pub struct SurrealOrganizationRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOrganizationRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OrganizationRepository for SurrealOrganizationRepository<C> {
    async fn find_by_name(&self, name: &str) -> TenantryResult<Option<Organization>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization WHERE name_key = $name_key \
                 ORDER BY created_at ASC LIMIT 1",
            )
            .bind(("name_key", name_key(name)))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_organization()?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: CreateOrganization) -> TenantryResult<Organization> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        debug!(organization = %input.name, collection = %input.collection_name, "Creating organization record");

        let result = self
            .db
            .query(
                "CREATE type::record('organization', $id) SET \
                 name = $name, name_key = $name_key, \
                 collection_name = $collection_name, \
                 admin_id = $admin_id, admin_email = $admin_email",
            )
            .bind(("id", id_str.clone()))
            .bind(("name_key", name_key(&input.name)))
            .bind(("name", input.name))
            .bind(("collection_name", input.collection_name))
            .bind(("admin_id", input.admin.admin_id.to_string()))
            .bind(("admin_email", input.admin.email.to_lowercase()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| DbError::Query(format!("CREATE organization:{id_str} returned no row")))?;

        Ok(row.into_organization(id)?)
    }

    async fn update_by_name(
        &self,
        name: &str,
        input: UpdateOrganization,
    ) -> TenantryResult<Option<Organization>> {
        let Some(existing) = self.find_by_name(name).await? else {
            return Ok(None);
        };
        if input.is_empty() {
            return Ok(Some(existing));
        }

        let id_str = existing.id.to_string();

        let mut sets = Vec::new();
        if input.name.is_some() {
            sets.push("name = $name");
            sets.push("name_key = $name_key");
        }
        if input.collection_name.is_some() {
            sets.push("collection_name = $collection_name");
        }
        if input.admin_email.is_some() {
            sets.push("admin_email = $admin_email");
        }
        sets.push("updated_at = time::now()");

        let query = format!(
            "UPDATE type::record('organization', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str.clone()));

        if let Some(new_name) = input.name {
            builder = builder
                .bind(("name_key", name_key(&new_name)))
                .bind(("name", new_name));
        }
        if let Some(collection_name) = input.collection_name {
            builder = builder.bind(("collection_name", collection_name));
        }
        if let Some(admin_email) = input.admin_email {
            builder = builder.bind(("admin_email", admin_email.to_lowercase()));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.into_organization(existing.id)?)),
            // Removed between the lookup and the write.
            None => Ok(None),
        }
    }

    async fn delete_by_name(&self, name: &str) -> TenantryResult<bool> {
        match self.find_by_name(name).await? {
            Some(existing) => self.delete(existing.id).await,
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> TenantryResult<bool> {
        let result = self
            .db
            .query("DELETE type::record('organization', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<OrganizationRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }

    async fn list(&self) -> TenantryResult<Vec<Organization>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM organization \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OrganizationRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_organization())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
