//! Schema definitions and migration runner for SurrealDB.
//!
//! Metadata tables use SCHEMAFULL mode. Tenant data collections are not
//! part of the schema; they are defined at runtime as SCHEMALESS tables
//! by the collection store.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "organization_metadata",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — organization and admin metadata
// -----------------------------------------------------------------------

// `name_key` / `organization_key` hold the case-folded names used for
// lookups. Their indexes are deliberately not UNIQUE: name uniqueness is
// checked by the lifecycle service, not enforced by the store.
const SCHEMA_V1: &str = "\
-- =======================================================================
-- Organizations
-- =======================================================================
DEFINE TABLE organization SCHEMAFULL;
DEFINE FIELD name ON TABLE organization TYPE string;
DEFINE FIELD name_key ON TABLE organization TYPE string;
DEFINE FIELD collection_name ON TABLE organization TYPE string;
DEFINE FIELD admin_id ON TABLE organization TYPE string;
DEFINE FIELD admin_email ON TABLE organization TYPE string;
DEFINE FIELD created_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE organization TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_organization_name_key ON TABLE organization \
    COLUMNS name_key;
DEFINE INDEX idx_organization_collection ON TABLE organization \
    COLUMNS collection_name;

-- =======================================================================
-- Admin accounts (one per organization, linked by organization_key)
-- =======================================================================
DEFINE TABLE admin_account SCHEMAFULL;
DEFINE FIELD email ON TABLE admin_account TYPE string;
DEFINE FIELD password_hash ON TABLE admin_account TYPE string;
DEFINE FIELD organization_name ON TABLE admin_account TYPE string;
DEFINE FIELD organization_key ON TABLE admin_account TYPE string;
DEFINE FIELD created_at ON TABLE admin_account TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE admin_account TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_account_email ON TABLE admin_account \
    COLUMNS email;
DEFINE INDEX idx_admin_account_organization ON TABLE admin_account \
    COLUMNS organization_key;
";

/// Apply all pending schema migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT version FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_v1_defines_metadata_tables() {
        assert!(SCHEMA_V1.contains("DEFINE TABLE organization"));
        assert!(SCHEMA_V1.contains("DEFINE TABLE admin_account"));
    }

    #[test]
    fn metadata_tables_do_not_use_tenant_prefix() {
        assert!(!SCHEMA_V1.contains("DEFINE TABLE org_"));
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
