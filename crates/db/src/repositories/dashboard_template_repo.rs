//! Repository for the `dashboard_templates` table.

use async_trait::async_trait;
use dashboard_core::dashboard_template::{
    DashboardTemplate, DashboardType, NewDashboardTemplate, TemplateConfig, TemplateStore,
};
use dashboard_core::error::StoreError;
use dashboard_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::dashboard_template::DashboardTemplateRow;

/// Column list for `dashboard_templates` queries.
const COLUMNS: &str = "\
    id, user_id, dashboard_type, display_name, template_config, \
    is_default, created_at, updated_at";

/// Provides CRUD operations for per-user dashboard templates.
pub struct DashboardTemplateRepo;

impl DashboardTemplateRepo {
    /// Find a template by its ID. Returns `None` if no row exists.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DashboardTemplateRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboard_templates WHERE id = $1");
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's templates of one dashboard type, oldest first.
    pub async fn find_by_user_and_type(
        pool: &PgPool,
        user_id: DbId,
        dashboard_type: &str,
    ) -> Result<Vec<DashboardTemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dashboard_templates \
             WHERE user_id = $1 AND dashboard_type = $2 ORDER BY id"
        );
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(user_id)
            .bind(dashboard_type)
            .fetch_all(pool)
            .await
    }

    /// List every template a user owns.
    pub async fn find_all_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DashboardTemplateRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM dashboard_templates WHERE user_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &NewDashboardTemplate,
    ) -> Result<DashboardTemplateRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO dashboard_templates \
                 (user_id, dashboard_type, display_name, template_config, is_default) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(input.user_id)
            .bind(input.template_base.name.as_str())
            .bind(&input.template_base.display_name)
            .bind(Json(&input.template_config))
            .bind(input.default)
            .fetch_one(pool)
            .await
    }

    /// Overwrite only the `template_config` column.
    ///
    /// Returns `None` if no row with the given ID exists.
    pub async fn update_config(
        pool: &PgPool,
        id: DbId,
        config: &TemplateConfig,
    ) -> Result<Option<DashboardTemplateRow>, sqlx::Error> {
        let query = format!(
            "UPDATE dashboard_templates \
             SET template_config = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(id)
            .bind(Json(config))
            .fetch_optional(pool)
            .await
    }

    /// Set `is_default` on every template of `(user_id, dashboard_type)`.
    ///
    /// Returns the number of rows updated.
    pub async fn update_default_flag(
        pool: &PgPool,
        user_id: DbId,
        dashboard_type: &str,
        value: bool,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE dashboard_templates \
             SET is_default = $3, updated_at = NOW() \
             WHERE user_id = $1 AND dashboard_type = $2",
        )
        .bind(user_id)
        .bind(dashboard_type)
        .bind(value)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Set `is_default` on a single template.
    ///
    /// Returns `None` if no row with the given ID exists.
    pub async fn mark_default(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<DashboardTemplateRow>, sqlx::Error> {
        let query = format!(
            "UPDATE dashboard_templates \
             SET is_default = TRUE, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Make `id` the only default in its `(user_id, dashboard_type)` group.
    ///
    /// Every row of the group is locked (in ID order) before the flag moves,
    /// so concurrent switches on the same group run one after the other and
    /// the last one wins. Returns `None` (and changes nothing) if `id` is not
    /// in the group.
    pub async fn switch_default(
        pool: &PgPool,
        user_id: DbId,
        dashboard_type: &str,
        id: DbId,
    ) -> Result<Option<DashboardTemplateRow>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let group: Vec<(DbId,)> = sqlx::query_as(
            "SELECT id FROM dashboard_templates \
             WHERE user_id = $1 AND dashboard_type = $2 \
             ORDER BY id \
             FOR UPDATE",
        )
        .bind(user_id)
        .bind(dashboard_type)
        .fetch_all(&mut *tx)
        .await?;
        if !group.iter().any(|&(member,)| member == id) {
            return Ok(None);
        }

        sqlx::query(
            "UPDATE dashboard_templates \
             SET is_default = (id = $3), updated_at = NOW() \
             WHERE user_id = $1 AND dashboard_type = $2 \
               AND is_default IS DISTINCT FROM (id = $3)",
        )
        .bind(user_id)
        .bind(dashboard_type)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM dashboard_templates WHERE id = $1");
        let row = sqlx::query_as::<_, DashboardTemplateRow>(&query)
            .bind(id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(row))
    }

    /// Delete a template by ID.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM dashboard_templates WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// TemplateStore implementation
// ---------------------------------------------------------------------------

/// [`TemplateStore`] backed by Postgres through [`DashboardTemplateRepo`].
#[derive(Debug, Clone)]
pub struct PgTemplateStore {
    pool: PgPool,
}

impl PgTemplateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn into_template(row: DashboardTemplateRow) -> Result<DashboardTemplate, StoreError> {
    Ok(DashboardTemplate::try_from(row)?)
}

fn into_templates(rows: Vec<DashboardTemplateRow>) -> Result<Vec<DashboardTemplate>, StoreError> {
    rows.into_iter().map(into_template).collect()
}

/// Convert the row a write returned, or fail if the row no longer exists.
fn written_row(row: Option<DashboardTemplateRow>, id: DbId) -> Result<DashboardTemplate, StoreError> {
    match row {
        Some(row) => into_template(row),
        None => {
            tracing::warn!(template_id = id, "Dashboard template vanished before write");
            Err(sqlx::Error::RowNotFound.into())
        }
    }
}

#[async_trait]
impl TemplateStore for PgTemplateStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<DashboardTemplate>, StoreError> {
        DashboardTemplateRepo::find_by_id(&self.pool, id)
            .await?
            .map(into_template)
            .transpose()
    }

    async fn find_by_user_and_type(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
    ) -> Result<Vec<DashboardTemplate>, StoreError> {
        let rows =
            DashboardTemplateRepo::find_by_user_and_type(&self.pool, user_id, dashboard_type.as_str())
                .await?;
        into_templates(rows)
    }

    async fn find_all_by_user(&self, user_id: DbId) -> Result<Vec<DashboardTemplate>, StoreError> {
        let rows = DashboardTemplateRepo::find_all_by_user(&self.pool, user_id).await?;
        into_templates(rows)
    }

    async fn create(
        &self,
        template: &NewDashboardTemplate,
    ) -> Result<DashboardTemplate, StoreError> {
        let row = DashboardTemplateRepo::create(&self.pool, template).await?;
        into_template(row)
    }

    async fn update_config(
        &self,
        id: DbId,
        config: &TemplateConfig,
    ) -> Result<DashboardTemplate, StoreError> {
        let row = DashboardTemplateRepo::update_config(&self.pool, id, config).await?;
        written_row(row, id)
    }

    async fn update_default_flag(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
        value: bool,
    ) -> Result<(), StoreError> {
        DashboardTemplateRepo::update_default_flag(&self.pool, user_id, dashboard_type.as_str(), value)
            .await?;
        Ok(())
    }

    async fn mark_default(&self, id: DbId) -> Result<DashboardTemplate, StoreError> {
        let row = DashboardTemplateRepo::mark_default(&self.pool, id).await?;
        written_row(row, id)
    }

    async fn switch_default(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
        id: DbId,
    ) -> Result<DashboardTemplate, StoreError> {
        let row =
            DashboardTemplateRepo::switch_default(&self.pool, user_id, dashboard_type.as_str(), id)
                .await?;
        written_row(row, id)
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        if !DashboardTemplateRepo::delete(&self.pool, id).await? {
            tracing::warn!(template_id = id, "Dashboard template vanished before delete");
            return Err(sqlx::Error::RowNotFound.into());
        }
        Ok(())
    }
}
