//! Integration tests for tenant data collections using in-memory
//! SurrealDB.

use serde_json::json;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tenantry_core::error::TenantryError;
use tenantry_core::repository::TenantCollectionRepository;
use tenantry_db::repository::SurrealTenantCollectionRepository;

async fn setup() -> SurrealTenantCollectionRepository<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tenantry_db::run_migrations(&db).await.unwrap();
    SurrealTenantCollectionRepository::new(db)
}

#[tokio::test]
async fn create_then_exists() {
    let repo = setup().await;

    assert!(!repo.exists("org_acme").await.unwrap());
    assert!(repo.create("org_acme").await.unwrap());
    assert!(repo.exists("org_acme").await.unwrap());
    assert_eq!(repo.count("org_acme").await.unwrap(), 0);

    // Creating again is not an error.
    assert!(repo.create("org_acme").await.unwrap());
}

#[tokio::test]
async fn list_only_returns_tenant_collections() {
    let repo = setup().await;

    repo.create("org_beta").await.unwrap();
    repo.create("org_alpha").await.unwrap();

    let names = repo.list().await.unwrap();
    assert_eq!(names, vec!["org_alpha".to_string(), "org_beta".to_string()]);
}

#[tokio::test]
async fn documents_are_counted_and_listed() {
    let repo = setup().await;
    repo.create("org_acme").await.unwrap();

    let doc = repo
        .insert_document("org_acme", json!({"sku": "A-1", "qty": 3}))
        .await
        .unwrap();
    repo.insert_document("org_acme", json!({"sku": "B-2"}))
        .await
        .unwrap();

    assert_eq!(repo.count("org_acme").await.unwrap(), 2);
    let docs = repo.list_documents("org_acme").await.unwrap();
    assert_eq!(docs.len(), 2);
    assert!(docs.contains(&doc));
}

#[tokio::test]
async fn migrate_copies_documents_and_keeps_source() {
    let repo = setup().await;
    repo.create("org_old").await.unwrap();
    let a = repo
        .insert_document("org_old", json!({"n": 1}))
        .await
        .unwrap();
    let b = repo
        .insert_document("org_old", json!({"n": 2}))
        .await
        .unwrap();

    assert!(repo.migrate("org_old", "org_new").await.unwrap());

    let mut moved = repo.list_documents("org_new").await.unwrap();
    moved.sort_by(|x, y| x.id.cmp(&y.id));
    let mut expected = vec![a, b];
    expected.sort_by(|x, y| x.id.cmp(&y.id));
    assert_eq!(moved, expected);

    assert_eq!(repo.count("org_old").await.unwrap(), 2);
}

#[tokio::test]
async fn migrate_from_absent_collection_creates_empty_target() {
    let repo = setup().await;

    assert!(repo.migrate("org_missing", "org_target").await.unwrap());
    assert!(repo.exists("org_target").await.unwrap());
    assert_eq!(repo.count("org_target").await.unwrap(), 0);
}

#[tokio::test]
async fn drop_is_idempotent() {
    let repo = setup().await;
    repo.create("org_gone").await.unwrap();
    repo.insert_document("org_gone", json!({})).await.unwrap();

    assert!(repo.drop_collection("org_gone").await.unwrap());
    assert!(!repo.exists("org_gone").await.unwrap());
    assert!(repo.drop_collection("org_gone").await.unwrap());
}

#[tokio::test]
async fn unsafe_identifiers_are_rejected_before_querying() {
    let repo = setup().await;

    let err = repo
        .create("org_x` ; REMOVE TABLE organization ; --")
        .await
        .unwrap_err();
    assert!(matches!(err, TenantryError::Database(_)));

    let err = repo.drop_collection("system.users").await.unwrap_err();
    assert!(matches!(err, TenantryError::Database(_)));
}
