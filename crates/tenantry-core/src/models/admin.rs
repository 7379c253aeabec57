//! Admin domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single administrator of an organization.
///
/// Linked to its organization only through `organization_name`; there
/// is no foreign key, so the lifecycle service keeps the two in sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admin {
    pub id: Uuid,
    /// Always stored lowercased.
    pub email: String,
    pub password_hash: String,
    pub organization_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdmin {
    /// Generated by the caller so the organization record can embed it
    /// before either record is written.
    pub id: Uuid,
    pub email: String,
    /// Argon2id PHC string; hashing happens before the store is called.
    pub password_hash: String,
    pub organization_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateAdmin {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub organization_name: Option<String>,
}

impl UpdateAdmin {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password_hash.is_none() && self.organization_name.is_none()
    }
}
