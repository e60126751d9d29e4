//! Template service: fetch-or-seed, partial layout updates, copy, delete and
//! default switching, with ownership checks before any mutation.

use crate::dashboard_template::base_templates::BaseTemplateRegistry;
use crate::dashboard_template::model::{
    BaseDashboardTemplate, DashboardTemplate, DashboardType, NewDashboardTemplate,
    UpdateDashboardTemplate,
};
use crate::dashboard_template::store::TemplateStore;
use crate::error::CoreError;
use crate::types::DbId;

const ENTITY: &str = "DashboardTemplate";

/// Orchestrates dashboard template operations over a [`TemplateStore`].
pub struct TemplateService<'r, S> {
    store: S,
    registry: &'r BaseTemplateRegistry,
}

impl<'r, S: TemplateStore> TemplateService<'r, S> {
    pub fn new(store: S, registry: &'r BaseTemplateRegistry) -> Self {
        Self { store, registry }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// List a user's templates.
    ///
    /// With no type (or an empty one) every template the user owns is
    /// returned. With a type, the user's templates of that type are
    /// returned; if there are none, one is seeded from the base template,
    /// marked default, persisted and returned.
    pub async fn get_templates(
        &self,
        user_id: DbId,
        dashboard_type: Option<&str>,
    ) -> Result<Vec<DashboardTemplate>, CoreError> {
        let dashboard_type = match dashboard_type {
            None | Some("") => {
                tracing::debug!(user_id, "Listing all dashboard templates");
                return self
                    .store
                    .find_all_by_user(user_id)
                    .await
                    .map_err(CoreError::Store);
            }
            Some(name) => name.parse::<DashboardType>()?,
        };

        let existing = self
            .store
            .find_by_user_and_type(user_id, dashboard_type)
            .await
            .map_err(CoreError::Store)?;
        if !existing.is_empty() {
            return Ok(existing);
        }

        let base = self.base_template(dashboard_type)?;
        let seeded = self
            .store
            .create(&NewDashboardTemplate {
                user_id,
                template_base: base.template_base(),
                template_config: base.template_config.clone(),
                default: true,
            })
            .await
            .map_err(CoreError::Store)?;

        tracing::info!(
            template_id = seeded.id,
            user_id,
            dashboard_type = %dashboard_type,
            "Dashboard template seeded from base template",
        );

        Ok(vec![seeded])
    }

    /// Replace the layouts provided in `update` on a template the user owns.
    ///
    /// Size classes with an empty item list keep their stored items. All
    /// items are validated before anything is written.
    pub async fn update_template(
        &self,
        template_id: DbId,
        user_id: DbId,
        update: &UpdateDashboardTemplate,
    ) -> Result<DashboardTemplate, CoreError> {
        let mut config = self.find_owned(template_id, user_id).await?.template_config;

        if let Err(err) = config.apply_update(&update.template_config) {
            tracing::warn!(template_id, user_id, error = %err, "Rejected dashboard template layout");
            return Err(err.into());
        }

        let updated = self
            .store
            .update_config(template_id, &config)
            .await
            .map_err(CoreError::Store)?;

        tracing::info!(template_id, user_id, "Dashboard template updated");

        Ok(updated)
    }

    pub fn list_base_templates(&self) -> Vec<BaseDashboardTemplate> {
        self.registry.list_all().into_iter().cloned().collect()
    }

    pub fn get_base_template(&self, dashboard_type: &str) -> Result<BaseDashboardTemplate, CoreError> {
        let dashboard_type = dashboard_type.parse::<DashboardType>()?;
        self.base_template(dashboard_type).cloned()
    }

    /// Copy any existing template into a new, non-default template owned by
    /// `account_id`.
    pub async fn copy_template(
        &self,
        account_id: DbId,
        template_id: DbId,
    ) -> Result<DashboardTemplate, CoreError> {
        let source = self.find(template_id).await?;

        let copy = self
            .store
            .create(&NewDashboardTemplate {
                user_id: account_id,
                template_base: source.template_base,
                template_config: source.template_config,
                default: false,
            })
            .await
            .map_err(CoreError::Store)?;

        tracing::info!(
            template_id = copy.id,
            source_id = template_id,
            user_id = account_id,
            "Dashboard template copied",
        );

        Ok(copy)
    }

    pub async fn delete_template(&self, account_id: DbId, template_id: DbId) -> Result<(), CoreError> {
        self.find_owned(template_id, account_id).await?;

        self.store
            .delete(template_id)
            .await
            .map_err(CoreError::Store)?;

        tracing::info!(template_id, user_id = account_id, "Dashboard template deleted");

        Ok(())
    }

    /// Make a template the only default of its dashboard type for its owner.
    pub async fn switch_default(
        &self,
        account_id: DbId,
        template_id: DbId,
    ) -> Result<DashboardTemplate, CoreError> {
        let dashboard_type = self.find_owned(template_id, account_id).await?.dashboard_type();

        let template = self
            .store
            .switch_default(account_id, dashboard_type, template_id)
            .await
            .map_err(CoreError::Store)?;

        tracing::info!(
            template_id,
            user_id = account_id,
            dashboard_type = %dashboard_type,
            "Default dashboard template changed",
        );

        Ok(template)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn base_template(&self, dashboard_type: DashboardType) -> Result<&BaseDashboardTemplate, CoreError> {
        self.registry
            .lookup(dashboard_type)
            .ok_or_else(|| CoreError::InvalidTemplateType(dashboard_type.to_string()))
    }

    async fn find(&self, template_id: DbId) -> Result<DashboardTemplate, CoreError> {
        self.store
            .find_by_id(template_id)
            .await
            .map_err(CoreError::Store)?
            .ok_or(CoreError::NotFound {
                entity: ENTITY,
                id: template_id,
            })
    }

    async fn find_owned(&self, template_id: DbId, user_id: DbId) -> Result<DashboardTemplate, CoreError> {
        let template = self.find(template_id).await?;
        if template.user_id != user_id {
            tracing::warn!(
                template_id,
                user_id,
                owner_id = template.user_id,
                "Refused access to dashboard template owned by another user",
            );
            return Err(CoreError::NotAuthorized {
                entity: ENTITY,
                id: template_id,
                user_id,
            });
        }
        Ok(template)
    }
}
