//! Documents stored in a tenant data collection.

use serde::{Deserialize, Serialize};

/// One schemaless document. The body is opaque to the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantDocument {
    /// Record key, preserved when a collection is migrated.
    pub id: String,
    pub body: serde_json::Value,
}
