//! Persistence seam for dashboard templates.

use async_trait::async_trait;

use crate::dashboard_template::grid::TemplateConfig;
use crate::dashboard_template::model::{DashboardTemplate, DashboardType, NewDashboardTemplate};
use crate::error::StoreError;
use crate::types::DbId;

/// Storage operations the template service needs.
///
/// Each method is expected to be a single atomic statement against the
/// backing store. Errors are returned to the caller unchanged.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Find a template by id. Returns `None` if no row exists.
    async fn find_by_id(&self, id: DbId) -> Result<Option<DashboardTemplate>, StoreError>;

    /// All templates of one dashboard type owned by a user.
    async fn find_by_user_and_type(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
    ) -> Result<Vec<DashboardTemplate>, StoreError>;

    async fn find_all_by_user(&self, user_id: DbId) -> Result<Vec<DashboardTemplate>, StoreError>;

    /// Insert a template and return it with its assigned id.
    async fn create(&self, template: &NewDashboardTemplate)
        -> Result<DashboardTemplate, StoreError>;

    /// Overwrite the layout configuration of one template and return the
    /// stored row. No other column changes apart from `updated_at`.
    async fn update_config(
        &self,
        id: DbId,
        config: &TemplateConfig,
    ) -> Result<DashboardTemplate, StoreError>;

    /// Set the default flag on every template of `(user_id, dashboard_type)`.
    async fn update_default_flag(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
        value: bool,
    ) -> Result<(), StoreError>;

    /// Set the default flag on a single template and return the stored row.
    async fn mark_default(&self, id: DbId) -> Result<DashboardTemplate, StoreError>;

    /// Make `id` the only default template of `(user_id, dashboard_type)` and
    /// return the stored row.
    ///
    /// The provided implementation clears the group and then marks the target
    /// in two statements, so concurrent callers can briefly observe zero or
    /// two defaults. Backends with transactions or conditional updates should
    /// override it with a single atomic operation.
    async fn switch_default(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
        id: DbId,
    ) -> Result<DashboardTemplate, StoreError> {
        self.update_default_flag(user_id, dashboard_type, false).await?;
        self.mark_default(id).await
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;
}
