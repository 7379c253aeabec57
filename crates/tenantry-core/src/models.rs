//! Domain models for the organization service.
//!
//! These are the core types shared across all crates.

pub mod admin;
pub mod document;
pub mod organization;
