//! In-memory `TemplateStore` used by the service integration tests.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use dashboard_core::dashboard_template::{
    DashboardTemplate, DashboardType, NewDashboardTemplate, TemplateConfig, TemplateStore,
};
use dashboard_core::error::StoreError;
use dashboard_core::types::DbId;

/// Vec-backed store with switchable failure injection.
///
/// Uses the trait's two-step `switch_default`, so default switching goes
/// through `update_default_flag` and `mark_default` here.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<DashboardTemplate>>,
    next_id: AtomicI64,
    pub fail_reads: AtomicBool,
    pub fail_default_flag: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<DashboardTemplate> {
        self.rows.lock().unwrap().clone()
    }

    pub fn row(&self, id: DbId) -> Option<DashboardTemplate> {
        self.rows().into_iter().find(|t| t.id == id)
    }

    /// Overwrite a row's config directly, bypassing the service.
    pub fn set_config(&self, id: DbId, config: TemplateConfig) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|t| t.id == id) {
            row.template_config = config;
        }
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err("read failed".into());
        }
        Ok(())
    }
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn find_by_id(&self, id: DbId) -> Result<Option<DashboardTemplate>, StoreError> {
        self.check_reads()?;
        Ok(self.row(id))
    }

    async fn find_by_user_and_type(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
    ) -> Result<Vec<DashboardTemplate>, StoreError> {
        self.check_reads()?;
        Ok(self
            .rows()
            .into_iter()
            .filter(|t| t.user_id == user_id && t.dashboard_type() == dashboard_type)
            .collect())
    }

    async fn find_all_by_user(&self, user_id: DbId) -> Result<Vec<DashboardTemplate>, StoreError> {
        self.check_reads()?;
        Ok(self
            .rows()
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect())
    }

    async fn create(
        &self,
        template: &NewDashboardTemplate,
    ) -> Result<DashboardTemplate, StoreError> {
        let now = Utc::now();
        let row = DashboardTemplate {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            user_id: template.user_id,
            template_base: template.template_base.clone(),
            template_config: template.template_config.clone(),
            default: template.default,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(row.clone());
        Ok(row)
    }

    async fn update_config(
        &self,
        id: DbId,
        config: &TemplateConfig,
    ) -> Result<DashboardTemplate, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or("no row to update")?;
        row.template_config = config.clone();
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn update_default_flag(
        &self,
        user_id: DbId,
        dashboard_type: DashboardType,
        value: bool,
    ) -> Result<(), StoreError> {
        if self.fail_default_flag.load(Ordering::SeqCst) {
            return Err("bulk default update failed".into());
        }
        let mut rows = self.rows.lock().unwrap();
        for row in rows
            .iter_mut()
            .filter(|t| t.user_id == user_id && t.dashboard_type() == dashboard_type)
        {
            row.default = value;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn mark_default(&self, id: DbId) -> Result<DashboardTemplate, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or("no row to mark default")?;
        row.default = true;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        self.rows.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }
}
