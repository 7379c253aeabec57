//! SurrealDB implementation of [`TenantCollectionRepository`].
//!
//! Each tenant data collection is a SCHEMALESS table in the shared
//! database. Documents are stored as `{ body }` records so the body can
//! be any JSON value; record keys are preserved across migrations.
//!
//! DDL statements cannot take the table name as a bound parameter, so
//! identifiers are checked against `[a-z0-9_]` before being spliced into
//! query text.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tenantry_core::error::TenantryResult;
use tenantry_core::models::document::TenantDocument;
use tenantry_core::repository::TenantCollectionRepository;
use tenantry_core::sanitize::{COLLECTION_PREFIX, is_valid_collection_name};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct DocumentRow {
    record_id: String,
    body: serde_json::Value,
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

fn checked_identifier(collection: &str) -> Result<&str, DbError> {
    let well_formed = collection
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if well_formed && is_valid_collection_name(collection) {
        Ok(collection)
    } else {
        Err(DbError::InvalidIdentifier(collection.to_string()))
    }
}

/// SurrealDB implementation of the tenant collection store.
#[derive(Clone)]
pub struct SurrealTenantCollectionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantCollectionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Names of every table in the current database.
    async fn table_names(&self) -> Result<Vec<String>, DbError> {
        let mut result = self.db.query("INFO FOR DB").await?;
        let info: Option<serde_json::Value> = result.take(0)?;

        let names = info
            .as_ref()
            .and_then(|info| info.get("tables"))
            .and_then(|tables| tables.as_object())
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default();

        Ok(names)
    }

    async fn insert_with_key(
        &self,
        collection: &str,
        key: String,
        body: serde_json::Value,
    ) -> Result<(), DbError> {
        self.db
            .query("CREATE type::record($table, $id) SET body = $body")
            .bind(("table", collection.to_string()))
            .bind(("id", key))
            .bind(("body", body))
            .await?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;
        Ok(())
    }
}

impl<C: Connection> TenantCollectionRepository for SurrealTenantCollectionRepository<C> {
    async fn create(&self, collection: &str) -> TenantryResult<bool> {
        let table = checked_identifier(collection)?;

        self.db
            .query(format!("DEFINE TABLE IF NOT EXISTS `{table}` SCHEMALESS"))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(collection = %table, "Defined tenant collection");
        Ok(true)
    }

    async fn exists(&self, collection: &str) -> TenantryResult<bool> {
        let table = checked_identifier(collection)?;
        Ok(self.table_names().await?.iter().any(|name| name == table))
    }

    async fn migrate(&self, from: &str, to: &str) -> TenantryResult<bool> {
        let source = checked_identifier(from)?;
        let target = checked_identifier(to)?;

        let documents = if self.exists(source).await? {
            self.list_documents(source).await?
        } else {
            Vec::new()
        };

        self.create(target).await?;
        for document in &documents {
            self.insert_with_key(target, document.id.clone(), document.body.clone())
                .await?;
        }

        info!(
            from = %source,
            to = %target,
            documents = documents.len(),
            "Migrated tenant collection"
        );
        Ok(true)
    }

    async fn drop_collection(&self, collection: &str) -> TenantryResult<bool> {
        let table = checked_identifier(collection)?;

        self.db
            .query(format!("REMOVE TABLE IF EXISTS `{table}`"))
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(|e| DbError::Query(e.to_string()))?;

        debug!(collection = %table, "Removed tenant collection");
        Ok(true)
    }

    async fn count(&self, collection: &str) -> TenantryResult<u64> {
        let table = checked_identifier(collection)?;

        let mut result = self
            .db
            .query("SELECT count() AS total FROM type::table($table) GROUP ALL")
            .bind(("table", table.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }

    async fn list(&self) -> TenantryResult<Vec<String>> {
        let mut names: Vec<String> = self
            .table_names()
            .await?
            .into_iter()
            .filter(|name| name.starts_with(COLLECTION_PREFIX))
            .collect();
        names.sort();
        Ok(names)
    }

    async fn insert_document(
        &self,
        collection: &str,
        body: serde_json::Value,
    ) -> TenantryResult<TenantDocument> {
        let table = checked_identifier(collection)?;
        let key = Uuid::new_v4().to_string();

        self.insert_with_key(table, key.clone(), body.clone()).await?;

        Ok(TenantDocument { id: key, body })
    }

    async fn list_documents(&self, collection: &str) -> TenantryResult<Vec<TenantDocument>> {
        let table = checked_identifier(collection)?;

        let mut result = self
            .db
            .query("SELECT meta::id(id) AS record_id, body FROM type::table($table)")
            .bind(("table", table.to_string()))
            .await
            .map_err(DbError::from)?;
        let rows: Vec<DocumentRow> = result.take(0).map_err(DbError::from)?;

        Ok(rows
            .into_iter()
            .map(|row| TenantDocument {
                id: row.record_id,
                body: row.body,
            })
            .collect())
    }
}
