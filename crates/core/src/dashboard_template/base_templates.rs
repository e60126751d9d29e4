//! System-defined base templates, used to seed a user's first template of
//! each dashboard type.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::dashboard_template::grid::{GridItem, TemplateConfig};
use crate::dashboard_template::model::{BaseDashboardTemplate, DashboardType};

static BUILTIN: LazyLock<BaseTemplateRegistry> = LazyLock::new(|| {
    BaseTemplateRegistry::new(DashboardType::ALL.into_iter().map(builtin_template))
});

/// Immutable lookup table from dashboard type to its seed template.
#[derive(Debug, Clone, Default)]
pub struct BaseTemplateRegistry {
    templates: HashMap<DashboardType, BaseDashboardTemplate>,
}

impl BaseTemplateRegistry {
    /// Build a registry from a set of seeds. Later entries win on duplicate types.
    pub fn new(templates: impl IntoIterator<Item = BaseDashboardTemplate>) -> Self {
        Self {
            templates: templates.into_iter().map(|t| (t.name, t)).collect(),
        }
    }

    /// The process-wide registry holding the shipped seed for every type.
    pub fn builtin() -> &'static BaseTemplateRegistry {
        &BUILTIN
    }

    pub fn lookup(&self, dashboard_type: DashboardType) -> Option<&BaseDashboardTemplate> {
        self.templates.get(&dashboard_type)
    }

    /// All seeds, in no particular order.
    pub fn list_all(&self) -> Vec<&BaseDashboardTemplate> {
        self.templates.values().collect()
    }
}

fn builtin_template(dashboard_type: DashboardType) -> BaseDashboardTemplate {
    match dashboard_type {
        DashboardType::LandingPage => BaseDashboardTemplate {
            name: DashboardType::LandingPage,
            display_name: "Landing Page".to_string(),
            template_config: landing_page_config(),
        },
    }
}

/// `(widget, x, y, w, h)` rows for one layout size.
type Placement = (&'static str, i32, i32, i32, i32);

fn layout(placements: &[Placement]) -> Vec<GridItem> {
    placements
        .iter()
        .map(|&(id, x, y, w, h)| GridItem::new(id, x, y, w, h))
        .collect()
}

fn landing_page_config() -> TemplateConfig {
    TemplateConfig {
        sm: layout(&[
            ("favoriteServices", 0, 0, 1, 4),
            ("recentlyVisited", 0, 4, 1, 4),
            ("exploreCapabilities", 0, 8, 1, 5),
            ("openshift", 0, 13, 1, 3),
            ("rhel", 0, 16, 1, 3),
            ("ansible", 0, 19, 1, 3),
            ("learningResources", 0, 22, 1, 3),
        ]),
        md: layout(&[
            ("favoriteServices", 0, 0, 2, 4),
            ("recentlyVisited", 0, 4, 2, 4),
            ("exploreCapabilities", 0, 8, 2, 5),
            ("openshift", 0, 13, 1, 3),
            ("rhel", 1, 13, 1, 3),
            ("ansible", 0, 16, 1, 3),
            ("learningResources", 1, 16, 1, 3),
        ]),
        lg: layout(&[
            ("favoriteServices", 0, 0, 2, 4),
            ("recentlyVisited", 2, 0, 1, 4),
            ("exploreCapabilities", 0, 4, 3, 5),
            ("openshift", 0, 9, 1, 3),
            ("rhel", 1, 9, 1, 3),
            ("ansible", 2, 9, 1, 3),
            ("learningResources", 0, 12, 3, 3),
        ]),
        xl: layout(&[
            ("favoriteServices", 0, 0, 2, 4),
            ("recentlyVisited", 2, 0, 2, 4),
            ("exploreCapabilities", 0, 4, 4, 5),
            ("openshift", 0, 9, 1, 3),
            ("rhel", 1, 9, 1, 3),
            ("ansible", 2, 9, 1, 3),
            ("learningResources", 3, 9, 1, 3),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::dashboard_template::grid::LayoutSize;

    #[test]
    fn builtin_has_a_seed_for_every_type() {
        let registry = BaseTemplateRegistry::builtin();
        for dashboard_type in DashboardType::ALL {
            let seed = registry.lookup(dashboard_type).unwrap();
            assert_eq!(seed.name, dashboard_type);
            assert!(!seed.display_name.is_empty());
        }
    }

    #[test]
    fn builtin_seeds_pass_grid_validation() {
        for seed in BaseTemplateRegistry::builtin().list_all() {
            assert!(seed.template_config.validate().is_ok(), "{} seed is invalid", seed.name);
            for size in LayoutSize::ALL {
                assert!(!seed.template_config.items(size).is_empty());
            }
        }
    }

    #[test]
    fn list_all_covers_every_type() {
        let listed: HashSet<DashboardType> = BaseTemplateRegistry::builtin()
            .list_all()
            .into_iter()
            .map(|t| t.name)
            .collect();
        let expected: HashSet<DashboardType> = DashboardType::ALL.into_iter().collect();
        assert_eq!(listed, expected);
    }

    #[test]
    fn empty_registry_has_no_seeds() {
        let registry = BaseTemplateRegistry::default();
        assert!(registry.lookup(DashboardType::LandingPage).is_none());
        assert!(registry.list_all().is_empty());
    }

    #[test]
    fn custom_registry_overrides_seed() {
        let registry = BaseTemplateRegistry::new([BaseDashboardTemplate {
            name: DashboardType::LandingPage,
            display_name: "Custom".to_string(),
            template_config: TemplateConfig::default(),
        }]);
        let seed = registry.lookup(DashboardType::LandingPage).unwrap();
        assert_eq!(seed.display_name, "Custom");
        assert!(seed.template_config.sm.is_empty());
    }
}
