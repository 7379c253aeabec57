//! Tenantry Server — application entry point and admin CLI.

mod config;

use clap::{Parser, Subcommand};
use tenantry_api::AppState;
use tenantry_auth::{CredentialStore, TokenIssuer};
use tenantry_core::repository::{
    AdminRepository, OrganizationRepository, TenantCollectionRepository,
};
use tenantry_db::DbManager;
use tenantry_db::repository::{
    SurrealAdminRepository, SurrealOrganizationRepository, SurrealTenantCollectionRepository,
};
use tenantry_lifecycle::TenantLifecycleService;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "tenantry-server", version, about = "Multi-tenant organization management service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Run the HTTP API (default)
    Serve,
    /// List every organization
    ListOrgs,
    /// List every admin account
    ListAdmins,
    /// List tenant data collections with their document counts
    ListCollections,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tenantry=info".parse()?))
        .json()
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env()?;
    if config.insecure_secret {
        warn!("JWT_SECRET_KEY not set; using the development signing secret");
    }

    let db = DbManager::connect(&config.db).await?;
    tenantry_db::run_migrations(db.client()).await?;

    let result = match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config, &db).await,
        Command::ListOrgs => list_orgs(&db).await,
        Command::ListAdmins => list_admins(&db).await,
        Command::ListCollections => list_collections(&db).await,
    };

    db.close();
    result
}

async fn serve(config: &ServerConfig, db: &DbManager) -> Result<(), Box<dyn std::error::Error>> {
    let client = db.client().clone();
    let lifecycle = TenantLifecycleService::new(
        SurrealOrganizationRepository::new(client.clone()),
        SurrealAdminRepository::new(client.clone()),
        SurrealTenantCollectionRepository::new(client),
        CredentialStore::new(config.auth.pepper.clone()),
    );
    let state = AppState::new(
        lifecycle,
        TokenIssuer::new(&config.auth),
        config.app_name.clone(),
        config.app_version.clone(),
    );
    let app = tenantry_api::router(state);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(
        address = %address,
        name = %config.app_name,
        version = %config.app_version,
        "Tenantry server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Tenantry server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for Ctrl-C; shutting down");
        return;
    }
    info!("Shutdown signal received");
}

async fn list_orgs(db: &DbManager) -> Result<(), Box<dyn std::error::Error>> {
    let organizations = SurrealOrganizationRepository::new(db.client().clone())
        .list()
        .await?;

    println!("Organizations ({}):", organizations.len());
    for org in organizations {
        println!(
            "  {}  collection={}  admin={}  created={}",
            org.name,
            org.collection_name,
            org.admin.email,
            org.created_at.to_rfc3339()
        );
    }
    Ok(())
}

async fn list_admins(db: &DbManager) -> Result<(), Box<dyn std::error::Error>> {
    let admins = SurrealAdminRepository::new(db.client().clone()).list().await?;

    println!("Admins ({}):", admins.len());
    for admin in admins {
        println!(
            "  {}  {}  organization={}",
            admin.id, admin.email, admin.organization_name
        );
    }
    Ok(())
}

async fn list_collections(db: &DbManager) -> Result<(), Box<dyn std::error::Error>> {
    let collections = SurrealTenantCollectionRepository::new(db.client().clone());
    let names = collections.list().await?;

    println!("Tenant collections ({}):", names.len());
    for name in names {
        let documents = collections.count(&name).await?;
        println!("  {name}  documents={documents}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_the_default_command() {
        let cli = Cli::parse_from(["tenantry-server"]);
        assert_eq!(cli.command.unwrap_or(Command::Serve), Command::Serve);
    }

    #[test]
    fn management_subcommands_parse() {
        let cli = Cli::parse_from(["tenantry-server", "list-collections"]);
        assert_eq!(cli.command, Some(Command::ListCollections));

        let cli = Cli::parse_from(["tenantry-server", "list-orgs"]);
        assert_eq!(cli.command, Some(Command::ListOrgs));
    }
}
