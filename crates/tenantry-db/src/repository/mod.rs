//! SurrealDB store implementations.

mod admin;
mod collection;
mod organization;

pub use admin::SurrealAdminRepository;
pub use collection::SurrealTenantCollectionRepository;
pub use organization::SurrealOrganizationRepository;

/// Case-folded lookup key for organization names.
///
/// Stored next to the display name so lookups are plain equality
/// comparisons rather than pattern matches.
pub(crate) fn name_key(name: &str) -> String {
    name.to_lowercase()
}
