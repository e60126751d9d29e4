//! Dashboard template row model.

use dashboard_core::dashboard_template::{DashboardTemplate, TemplateBase, TemplateConfig};
use dashboard_core::error::CoreError;
use dashboard_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `dashboard_templates` table.
#[derive(Debug, Clone, FromRow)]
pub struct DashboardTemplateRow {
    pub id: DbId,
    pub user_id: DbId,
    pub dashboard_type: String,
    pub display_name: String,
    pub template_config: Json<TemplateConfig>,
    pub is_default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<DashboardTemplateRow> for DashboardTemplate {
    type Error = CoreError;

    /// Fails if the stored `dashboard_type` is not a known type.
    fn try_from(row: DashboardTemplateRow) -> Result<Self, Self::Error> {
        Ok(DashboardTemplate {
            id: row.id,
            user_id: row.user_id,
            template_base: TemplateBase {
                name: row.dashboard_type.parse()?,
                display_name: row.display_name,
            },
            template_config: row.template_config.0,
            default: row.is_default,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
