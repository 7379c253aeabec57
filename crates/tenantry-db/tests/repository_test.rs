//! Integration tests for the organization and admin stores using
//! in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tenantry_core::models::admin::{CreateAdmin, UpdateAdmin};
use tenantry_core::models::organization::{AdminSummary, CreateOrganization, UpdateOrganization};
use tenantry_core::repository::{AdminRepository, OrganizationRepository};
use tenantry_db::repository::{SurrealAdminRepository, SurrealOrganizationRepository};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    tenantry_db::run_migrations(&db).await.unwrap();
    db
}

fn org_input(name: &str, collection: &str, admin_id: Uuid) -> CreateOrganization {
    CreateOrganization {
        name: name.into(),
        collection_name: collection.into(),
        admin: AdminSummary {
            admin_id,
            email: "Admin@Example.com".into(),
        },
    }
}

// -----------------------------------------------------------------------
// Organization tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_find_organization_ignoring_case() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);
    let admin_id = Uuid::new_v4();

    let org = repo
        .create(org_input("TestOrg", "org_testorg", admin_id))
        .await
        .unwrap();

    assert_eq!(org.name, "TestOrg");
    assert_eq!(org.collection_name, "org_testorg");
    assert_eq!(org.admin.admin_id, admin_id);
    assert_eq!(org.admin.email, "admin@example.com");

    let fetched = repo.find_by_name("testORG").await.unwrap().unwrap();
    assert_eq!(fetched.id, org.id);
    assert_eq!(fetched.name, "TestOrg");
}

#[tokio::test]
async fn name_lookup_is_whole_string_equality() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    repo.create(org_input("Acme.Corp", "org_acme_corp", Uuid::new_v4()))
        .await
        .unwrap();

    // Regex metacharacters and prefixes must not match.
    assert!(repo.find_by_name("Acme").await.unwrap().is_none());
    assert!(repo.find_by_name("AcmeXCorp").await.unwrap().is_none());
    assert!(repo.find_by_name(".*").await.unwrap().is_none());
    assert!(repo.find_by_name("acme.corp").await.unwrap().is_some());
}

#[tokio::test]
async fn update_organization_by_name() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo
        .create(org_input("Before", "org_before", Uuid::new_v4()))
        .await
        .unwrap();

    let updated = repo
        .update_by_name(
            "before",
            UpdateOrganization {
                name: Some("After".into()),
                collection_name: Some("org_after".into()),
                admin_email: Some("NEW@Example.com".into()),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.id, org.id);
    assert_eq!(updated.name, "After");
    assert_eq!(updated.collection_name, "org_after");
    assert_eq!(updated.admin.email, "new@example.com");
    assert!(updated.updated_at >= org.updated_at);

    assert!(repo.find_by_name("Before").await.unwrap().is_none());
    assert!(repo.find_by_name("AFTER").await.unwrap().is_some());
}

#[tokio::test]
async fn update_missing_organization_returns_none() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let result = repo
        .update_by_name(
            "ghost",
            UpdateOrganization {
                name: Some("Other".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn empty_patch_returns_current_record() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let org = repo
        .create(org_input("Same", "org_same", Uuid::new_v4()))
        .await
        .unwrap();
    let unchanged = repo
        .update_by_name("same", UpdateOrganization::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.id, org.id);
    assert_eq!(unchanged.collection_name, "org_same");
}

#[tokio::test]
async fn delete_organization_reports_whether_removed() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    repo.create(org_input("ToDelete", "org_todelete", Uuid::new_v4()))
        .await
        .unwrap();

    assert!(repo.delete_by_name("TODELETE").await.unwrap());
    assert!(repo.find_by_name("ToDelete").await.unwrap().is_none());
    assert!(!repo.delete_by_name("ToDelete").await.unwrap());
}

#[tokio::test]
async fn delete_organization_by_id_spares_same_named_record() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    let first = repo
        .create(org_input("Acme", "org_acme", Uuid::new_v4()))
        .await
        .unwrap();
    let second = repo
        .create(org_input("ACME", "org_acme", Uuid::new_v4()))
        .await
        .unwrap();

    assert!(repo.delete(second.id).await.unwrap());
    assert!(!repo.delete(second.id).await.unwrap());

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, first.id);
}

#[tokio::test]
async fn list_organizations_in_creation_order() {
    let db = setup().await;
    let repo = SurrealOrganizationRepository::new(db);

    for i in 0..3 {
        repo.create(org_input(
            &format!("Org {i}"),
            &format!("org_org_{i}"),
            Uuid::new_v4(),
        ))
        .await
        .unwrap();
    }

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 3);
    let names: Vec<_> = all.iter().map(|o| o.name.as_str()).collect();
    assert!(names.contains(&"Org 0"));
    assert!(names.contains(&"Org 2"));
}

// -----------------------------------------------------------------------
// Admin tests
// -----------------------------------------------------------------------

fn admin_input(org: &str, email: &str) -> CreateAdmin {
    CreateAdmin {
        id: Uuid::new_v4(),
        email: email.into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        organization_name: org.into(),
    }
}

#[tokio::test]
async fn create_admin_keeps_supplied_id_and_lowercases_email() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    let input = admin_input("TestOrg", "Admin@TestOrg.com");
    let id = input.id;
    let admin = repo.create(input).await.unwrap();

    assert_eq!(admin.id, id);
    assert_eq!(admin.email, "admin@testorg.com");
    assert_eq!(admin.organization_name, "TestOrg");
}

#[tokio::test]
async fn find_admin_by_email_and_organization() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    let admin = repo
        .create(admin_input("TestOrg", "admin@testorg.com"))
        .await
        .unwrap();

    let by_email = repo
        .find_by_email("ADMIN@testorg.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, admin.id);

    let by_org = repo.find_by_organization("testorg").await.unwrap().unwrap();
    assert_eq!(by_org.id, admin.id);

    assert!(repo.find_by_email("other@testorg.com").await.unwrap().is_none());
    assert!(repo.find_by_organization("Other").await.unwrap().is_none());
}

#[tokio::test]
async fn update_admin_moves_back_reference() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    let admin = repo
        .create(admin_input("OldOrg", "admin@old.com"))
        .await
        .unwrap();

    let updated = repo
        .update(
            admin.id,
            UpdateAdmin {
                email: Some("Admin@New.com".into()),
                organization_name: Some("NewOrg".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.email, "admin@new.com");
    assert_eq!(updated.organization_name, "NewOrg");
    assert_eq!(updated.password_hash, admin.password_hash);

    assert!(repo.find_by_organization("OldOrg").await.unwrap().is_none());
    assert!(repo.find_by_organization("neworg").await.unwrap().is_some());
}

#[tokio::test]
async fn update_missing_admin_does_not_create_one() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    let result = repo
        .update(
            Uuid::new_v4(),
            UpdateAdmin {
                email: Some("ghost@example.com".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(result.is_none());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_admin_by_organization_is_idempotent() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    repo.create(admin_input("TestOrg", "admin@testorg.com"))
        .await
        .unwrap();

    assert!(repo.delete_by_organization("TESTORG").await.unwrap());
    assert!(!repo.delete_by_organization("TestOrg").await.unwrap());
    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_admin_by_id_spares_same_named_record() {
    let db = setup().await;
    let repo = SurrealAdminRepository::new(db);

    let first = repo
        .create(admin_input("Acme", "first@acme.com"))
        .await
        .unwrap();
    let second = repo
        .create(admin_input("ACME", "second@acme.com"))
        .await
        .unwrap();

    assert!(repo.delete(second.id).await.unwrap());
    assert!(!repo.delete(second.id).await.unwrap());

    let by_org = repo.find_by_organization("acme").await.unwrap().unwrap();
    assert_eq!(by_org.id, first.id);
}
