//! Organization domain model.
//!
//! An organization is a tenant: the unit of isolation. Each one owns
//! exactly one admin account and exactly one tenant data collection,
//! addressed by [`Organization::collection_name`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Admin identity embedded in the organization record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminSummary {
    pub admin_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: Uuid,
    /// Display name. Unique under case-insensitive comparison.
    pub name: String,
    /// Storage identifier of the tenant data collection (`org_*`).
    pub collection_name: String,
    pub admin: AdminSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a new organization record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub name: String,
    pub collection_name: String,
    pub admin: AdminSummary,
}

/// Fields that can be updated on an existing organization.
///
/// `name` and `collection_name` are only ever set together.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateOrganization {
    pub name: Option<String>,
    pub collection_name: Option<String>,
    pub admin_email: Option<String>,
}

impl UpdateOrganization {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.collection_name.is_none() && self.admin_email.is_none()
    }
}
