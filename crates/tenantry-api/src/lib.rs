//! Tenantry API — HTTP surface for organization management.
//!
//! Provides:
//! - `POST /org/create`, `GET /org/get` (public)
//! - `PUT /org/update`, `DELETE /org/delete` (bearer token, own organization only)
//! - `POST /admin/login`

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod router;
pub mod validation;

pub use error::ApiError;
pub use router::{AppState, router};
