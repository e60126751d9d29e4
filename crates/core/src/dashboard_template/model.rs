//! Dashboard template entities and DTOs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::dashboard_template::grid::TemplateConfig;
use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Dashboard types
// ---------------------------------------------------------------------------

/// The closed set of dashboards a user can own templates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardType {
    #[serde(rename = "landingPage")]
    LandingPage,
}

impl DashboardType {
    pub const ALL: [DashboardType; 1] = [DashboardType::LandingPage];

    pub fn as_str(self) -> &'static str {
        match self {
            DashboardType::LandingPage => "landingPage",
        }
    }

    /// Returns `true` if `name` identifies a known dashboard type.
    pub fn is_valid(name: &str) -> bool {
        name.parse::<DashboardType>().is_ok()
    }
}

impl FromStr for DashboardType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DashboardType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::InvalidTemplateType(s.to_string()))
    }
}

impl fmt::Display for DashboardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// Which dashboard a template belongs to, plus its human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateBase {
    pub name: DashboardType,
    pub display_name: String,
}

/// System-defined seed for a dashboard type. Never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseDashboardTemplate {
    pub name: DashboardType,
    pub display_name: String,
    pub template_config: TemplateConfig,
}

impl BaseDashboardTemplate {
    pub fn template_base(&self) -> TemplateBase {
        TemplateBase {
            name: self.name,
            display_name: self.display_name.clone(),
        }
    }
}

/// A user-owned, persisted dashboard template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTemplate {
    pub id: DbId,
    pub user_id: DbId,
    pub template_base: TemplateBase,
    pub template_config: TemplateConfig,
    pub default: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DashboardTemplate {
    pub fn dashboard_type(&self) -> DashboardType {
        self.template_base.name
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Insert payload for a new template row.
#[derive(Debug, Clone)]
pub struct NewDashboardTemplate {
    pub user_id: DbId,
    pub template_base: TemplateBase,
    pub template_config: TemplateConfig,
    pub default: bool,
}

/// Update payload. Only the layout configuration may be changed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDashboardTemplate {
    #[serde(default)]
    pub template_config: TemplateConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_type() {
        let parsed: DashboardType = "landingPage".parse().unwrap();
        assert_eq!(parsed, DashboardType::LandingPage);
        assert_eq!(parsed.to_string(), "landingPage");
    }

    #[test]
    fn rejects_unknown_types() {
        assert!(!DashboardType::is_valid("landing-page"));
        assert!(!DashboardType::is_valid("LANDINGPAGE"));
        assert!(!DashboardType::is_valid(""));

        let err = "settings".parse::<DashboardType>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidTemplateType(ref name) if name == "settings"));
    }

    #[test]
    fn serde_uses_wire_name() {
        let json = serde_json::to_string(&DashboardType::LandingPage).unwrap();
        assert_eq!(json, "\"landingPage\"");
    }
}
