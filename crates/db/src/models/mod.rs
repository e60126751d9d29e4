//! Database row structs.
//!
//! Rows are decoded with `FromRow` and converted into the domain entities
//! defined in `dashboard_core`.

pub mod dashboard_template;
