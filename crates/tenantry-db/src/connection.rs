//! The single database connection shared by every tenantry store.
//!
//! `tenantry-server` opens it before running migrations, clones the client
//! into the organization, admin and tenant-collection stores, and closes it
//! after the HTTP server or CLI command returns. Nothing reaches the
//! database through global state.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

/// Where the metadata tables and tenant collections live.
///
/// Filled from `SURREAL_*` environment variables by the server config.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// `host:port` of the SurrealDB WebSocket endpoint.
    pub url: String,
    pub namespace: String,
    /// Holds `organization`, `admin_account` and every `org_*` collection.
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: "127.0.0.1:8000".into(),
            namespace: "tenantry".into(),
            database: "org_master".into(),
            username: "root".into(),
            password: "root".into(),
        }
    }
}

/// Handle to the open connection.
///
/// Stores receive clones of [`DbManager::client`]; the manager itself is
/// consumed by [`DbManager::close`] at shutdown.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open the connection and select the tenantry namespace and database.
    pub async fn connect(config: &DbConfig) -> Result<Self, surrealdb::Error> {
        info!(
            url = %config.url,
            namespace = %config.namespace,
            database = %config.database,
            "Opening tenantry database"
        );

        let db = Surreal::new::<Ws>(&config.url).await?;
        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await?;
        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        info!(database = %config.database, "Tenantry database ready");
        Ok(Self { db })
    }

    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }

    /// Release the connection. Stores still holding a cloned client keep
    /// it alive until they are dropped too.
    pub fn close(self) {
        info!("Closing tenantry database connection");
        drop(self.db);
    }
}
