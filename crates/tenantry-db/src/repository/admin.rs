//! SurrealDB implementation of [`AdminRepository`].
//!
//! Emails are stored and matched lowercased. The organization
//! back-reference is matched through its case-folded key, the same way
//! organization names are.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tenantry_core::error::TenantryResult;
use tenantry_core::models::admin::{Admin, CreateAdmin, UpdateAdmin};
use tenantry_core::repository::AdminRepository;
use tracing::debug;
use uuid::Uuid;

use super::name_key;
use crate::error::DbError;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct AdminRow {
    email: String,
    password_hash: String,
    organization_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn into_admin(self, id: Uuid) -> Admin {
        Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_name: self.organization_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct AdminRowWithId {
    record_id: String,
    email: String,
    password_hash: String,
    organization_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRowWithId {
    fn try_into_admin(self) -> Result<Admin, DbError> {
        let id = Uuid::parse_str(&self.record_id).map_err(|e| DbError::Corrupt {
            entity: "admin_account".into(),
            message: format!("invalid UUID: {e}"),
        })?;
        Ok(Admin {
            id,
            email: self.email,
            password_hash: self.password_hash,
            organization_name: self.organization_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the Admin store.
#[derive(Clone)]
pub struct SurrealAdminRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealAdminRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn find_one(&self, query: &str, key: String) -> TenantryResult<Option<Admin>> {
        let mut result = self
            .db
            .query(query)
            .bind(("key", key))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_admin()?)),
            None => Ok(None),
        }
    }
}

impl<C: Connection> AdminRepository for SurrealAdminRepository<C> {
    async fn create(&self, input: CreateAdmin) -> TenantryResult<Admin> {
        let id_str = input.id.to_string();

        debug!(admin_id = %id_str, organization = %input.organization_name, "Creating admin record");

        let result = self
            .db
            .query(
                "CREATE type::record('admin_account', $id) SET \
                 email = $email, password_hash = $password_hash, \
                 organization_name = $organization_name, \
                 organization_key = $organization_key",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email.to_lowercase()))
            .bind(("password_hash", input.password_hash))
            .bind(("organization_key", name_key(&input.organization_name)))
            .bind(("organization_name", input.organization_name))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| {
            DbError::Query(format!("CREATE admin_account:{id_str} returned no row"))
        })?;

        Ok(row.into_admin(input.id))
    }

    async fn find_by_email(&self, email: &str) -> TenantryResult<Option<Admin>> {
        self.find_one(
            "SELECT meta::id(id) AS record_id, * \
             FROM admin_account WHERE email = $key \
             ORDER BY created_at ASC LIMIT 1",
            email.to_lowercase(),
        )
        .await
    }

    async fn find_by_organization(&self, organization_name: &str) -> TenantryResult<Option<Admin>> {
        self.find_one(
            "SELECT meta::id(id) AS record_id, * \
             FROM admin_account WHERE organization_key = $key \
             ORDER BY created_at ASC LIMIT 1",
            name_key(organization_name),
        )
        .await
    }

    async fn update(&self, id: Uuid, input: UpdateAdmin) -> TenantryResult<Option<Admin>> {
        let id_str = id.to_string();

        let mut sets = Vec::new();
        if input.email.is_some() {
            sets.push("email = $email");
        }
        if input.password_hash.is_some() {
            sets.push("password_hash = $password_hash");
        }
        if input.organization_name.is_some() {
            sets.push("organization_name = $organization_name");
            sets.push("organization_key = $organization_key");
        }
        sets.push("updated_at = time::now()");

        // UPDATE never creates a record, so a missing admin yields no row.
        let query = format!(
            "UPDATE type::record('admin_account', $id) SET {}",
            sets.join(", ")
        );

        let mut builder = self.db.query(&query).bind(("id", id_str));

        if let Some(email) = input.email {
            builder = builder.bind(("email", email.to_lowercase()));
        }
        if let Some(password_hash) = input.password_hash {
            builder = builder.bind(("password_hash", password_hash));
        }
        if let Some(organization_name) = input.organization_name {
            builder = builder
                .bind(("organization_key", name_key(&organization_name)))
                .bind(("organization_name", organization_name));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.into_admin(id)))
    }

    async fn delete_by_organization(&self, organization_name: &str) -> TenantryResult<bool> {
        match self.find_by_organization(organization_name).await? {
            Some(existing) => self.delete(existing.id).await,
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> TenantryResult<bool> {
        let result = self
            .db
            .query("DELETE type::record('admin_account', $id) RETURN BEFORE")
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;
        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<AdminRow> = result.take(0).map_err(DbError::from)?;
        Ok(!rows.is_empty())
    }

    async fn list(&self) -> TenantryResult<Vec<Admin>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * \
                 FROM admin_account \
                 ORDER BY created_at ASC",
            )
            .await
            .map_err(DbError::from)?;

        let rows: Vec<AdminRowWithId> = result.take(0).map_err(DbError::from)?;

        let items = rows
            .into_iter()
            .map(|row| row.try_into_admin())
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(items)
    }
}
