//! Grid layout items and their per-size-class validation.
//!
//! A [`TemplateConfig`] holds one ordered list of [`GridItem`]s for each
//! [`LayoutSize`]. Validation is pure: it only inspects the item and the
//! bounds of the size class it is placed in.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum number of rows a single item may span, for every size class.
pub const MAX_ITEM_ROWS: i32 = 24;

// ---------------------------------------------------------------------------
// Layout size classes
// ---------------------------------------------------------------------------

/// Responsive breakpoint a layout is defined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutSize {
    Sm,
    Md,
    Lg,
    Xl,
}

impl LayoutSize {
    /// Every size class, in the order fields appear in a [`TemplateConfig`].
    pub const ALL: [LayoutSize; 4] = [LayoutSize::Sm, LayoutSize::Md, LayoutSize::Lg, LayoutSize::Xl];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutSize::Sm => "sm",
            LayoutSize::Md => "md",
            LayoutSize::Lg => "lg",
            LayoutSize::Xl => "xl",
        }
    }

    /// Number of grid columns available at this breakpoint.
    pub fn columns(self) -> i32 {
        match self {
            LayoutSize::Sm => 1,
            LayoutSize::Md => 2,
            LayoutSize::Lg => 3,
            LayoutSize::Xl => 4,
        }
    }

    pub fn max_rows(self) -> i32 {
        MAX_ITEM_ROWS
    }
}

impl fmt::Display for LayoutSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Grid items
// ---------------------------------------------------------------------------

/// A widget placed on the dashboard grid.
///
/// Missing `x`/`y` decode as 0, so an omitted coordinate and an explicit
/// origin placement are the same thing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    /// Widget identifier.
    #[serde(rename = "i")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(rename = "w")]
    pub width: i32,
    #[serde(rename = "h")]
    pub height: i32,
    #[serde(rename = "minH", default, skip_serializing_if = "Option::is_none")]
    pub min_height: Option<i32>,
    #[serde(rename = "maxH", default, skip_serializing_if = "Option::is_none")]
    pub max_height: Option<i32>,
    #[serde(rename = "static", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
}

impl GridItem {
    /// Build an item with no title, no height limits and not pinned.
    pub fn new(id: impl Into<String>, x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            id: id.into(),
            title: None,
            x,
            y,
            width,
            height,
            min_height: None,
            max_height: None,
            is_static: false,
        }
    }

    /// Check this item against the bounds of `size`.
    ///
    /// Reports the first violated constraint.
    pub fn validate(&self, size: LayoutSize) -> Result<(), GridItemError> {
        if self.id.trim().is_empty() {
            return Err(GridItemError::MissingId { size });
        }

        for (field, value) in [("x", self.x), ("y", self.y)] {
            if value < 0 {
                return Err(GridItemError::NegativeCoordinate {
                    widget: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        let columns = size.columns();
        if !(1..=columns).contains(&self.width) {
            return Err(GridItemError::Width {
                widget: self.id.clone(),
                size,
                value: self.width,
                max: columns,
            });
        }
        // Width is already within 1..=columns, so this cannot overflow.
        if self.x > columns - self.width {
            return Err(GridItemError::ColumnOverflow {
                widget: self.id.clone(),
                size,
                x: self.x,
                width: self.width,
                columns,
            });
        }

        let max_rows = size.max_rows();
        if !(1..=max_rows).contains(&self.height) {
            return Err(GridItemError::Height {
                widget: self.id.clone(),
                size,
                value: self.height,
                max: max_rows,
            });
        }
        if let Some(min) = self.min_height {
            if !(1..=self.height).contains(&min) {
                return Err(GridItemError::HeightLimit {
                    widget: self.id.clone(),
                    field: "minH",
                    value: min,
                    lower: 1,
                    upper: self.height,
                });
            }
        }
        if let Some(max) = self.max_height {
            if !(self.height..=max_rows).contains(&max) {
                return Err(GridItemError::HeightLimit {
                    widget: self.id.clone(),
                    field: "maxH",
                    value: max,
                    lower: self.height,
                    upper: max_rows,
                });
            }
        }

        Ok(())
    }
}

/// The constraint a [`GridItem`] violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridItemError {
    #[error("widget in layout {size} has an empty id")]
    MissingId { size: LayoutSize },

    #[error("{field} of widget {widget:?} must be non-negative, got {value}")]
    NegativeCoordinate {
        widget: String,
        field: &'static str,
        value: i32,
    },

    #[error("width of widget {widget:?} must be between 1 and {max} in layout {size}, got {value}")]
    Width {
        widget: String,
        size: LayoutSize,
        value: i32,
        max: i32,
    },

    #[error(
        "widget {widget:?} at x={x} with width {width} overflows the {columns} columns of layout {size}"
    )]
    ColumnOverflow {
        widget: String,
        size: LayoutSize,
        x: i32,
        width: i32,
        columns: i32,
    },

    #[error("height of widget {widget:?} must be between 1 and {max} in layout {size}, got {value}")]
    Height {
        widget: String,
        size: LayoutSize,
        value: i32,
        max: i32,
    },

    #[error("{field} of widget {widget:?} must be between {lower} and {upper}, got {value}")]
    HeightLimit {
        widget: String,
        field: &'static str,
        value: i32,
        lower: i32,
        upper: i32,
    },
}

// ---------------------------------------------------------------------------
// Template configuration
// ---------------------------------------------------------------------------

/// Per-breakpoint widget layouts of a dashboard template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default)]
    pub sm: Vec<GridItem>,
    #[serde(default)]
    pub md: Vec<GridItem>,
    #[serde(default)]
    pub lg: Vec<GridItem>,
    #[serde(default)]
    pub xl: Vec<GridItem>,
}

impl TemplateConfig {
    pub fn items(&self, size: LayoutSize) -> &[GridItem] {
        match size {
            LayoutSize::Sm => &self.sm,
            LayoutSize::Md => &self.md,
            LayoutSize::Lg => &self.lg,
            LayoutSize::Xl => &self.xl,
        }
    }

    pub fn set_items(&mut self, size: LayoutSize, items: Vec<GridItem>) {
        let slot = match size {
            LayoutSize::Sm => &mut self.sm,
            LayoutSize::Md => &mut self.md,
            LayoutSize::Lg => &mut self.lg,
            LayoutSize::Xl => &mut self.xl,
        };
        *slot = items;
    }

    /// Validate every item of every size class against that class's bounds.
    pub fn validate(&self) -> Result<(), GridItemError> {
        for size in LayoutSize::ALL {
            for item in self.items(size) {
                item.validate(size)?;
            }
        }
        Ok(())
    }

    /// Replace the size classes that `update` provides items for.
    ///
    /// Empty lists in `update` leave the current items untouched. The whole
    /// update is validated first; on error `self` is not modified.
    pub fn apply_update(&mut self, update: &TemplateConfig) -> Result<(), GridItemError> {
        update.validate()?;
        for size in LayoutSize::ALL {
            let items = update.items(size);
            if !items.is_empty() {
                self.set_items(size, items.to_vec());
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
