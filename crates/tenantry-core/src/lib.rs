//! Tenantry Core — shared domain types for the organization service.
//!
//! This crate provides:
//! - Domain models ([`models`]) for organizations, admins and tenant documents
//! - The error taxonomy ([`error::TenantryError`])
//! - Store traits ([`repository`]) implemented by `tenantry-db`
//! - Collection-name derivation ([`sanitize`])

pub mod error;
pub mod models;
pub mod repository;
pub mod sanitize;

pub use error::{TenantryError, TenantryResult};
pub use sanitize::{is_valid_collection_name, sanitize_collection_name};
