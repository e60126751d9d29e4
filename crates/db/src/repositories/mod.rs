//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod dashboard_template_repo;

pub use dashboard_template_repo::{DashboardTemplateRepo, PgTemplateStore};
