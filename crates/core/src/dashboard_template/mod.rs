//! Dashboard templates: base seeds, grid validation, persistence seam and
//! the service orchestrating them.

pub mod base_templates;
pub mod grid;
pub mod model;
pub mod service;
pub mod store;

pub use base_templates::BaseTemplateRegistry;
pub use grid::{GridItem, GridItemError, LayoutSize, TemplateConfig};
pub use model::{
    BaseDashboardTemplate, DashboardTemplate, DashboardType, NewDashboardTemplate, TemplateBase,
    UpdateDashboardTemplate,
};
pub use service::TemplateService;
pub use store::TemplateStore;
