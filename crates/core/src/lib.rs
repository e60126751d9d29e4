//! Domain logic for per-user dashboard templates.
//!
//! The crate has no database dependency: persistence is reached through the
//! [`dashboard_template::store::TemplateStore`] trait, implemented by the
//! `dashboard-db` crate for Postgres.

pub mod dashboard_template;
pub mod error;
pub mod types;
