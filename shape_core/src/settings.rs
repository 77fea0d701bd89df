//! Catalog Settings
//!
//! Options applied while building a catalog and used as query defaults.
//! Settings are plain serde data so they can live in a JSON config file.
//!
//! ```rust
//! use shape_core::settings::CatalogSettings;
//!
//! let settings: CatalogSettings = serde_json::from_str(r#"{"default_sort_by": "Ix"}"#).unwrap();
//! assert_eq!(settings.default_sort_by.as_deref(), Some("Ix"));
//! assert!(settings.trim_cells);
//! ```

use serde::{Deserialize, Serialize};

/// Default sort key for range queries
pub const DEFAULT_SORT_BY: &str = "weight";

/// Build and query options for a catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Property used to order query results when the caller names none.
    /// `None` keeps source row order.
    pub default_sort_by: Option<String>,

    /// Trim whitespace around section names and text cells before typing them
    pub trim_cells: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_sort_by: Some(DEFAULT_SORT_BY.to_string()),
            trim_cells: true,
        }
    }
}

impl CatalogSettings {
    /// Set the default sort key
    pub fn with_default_sort_by(mut self, property: Option<&str>) -> Self {
        self.default_sort_by = property.map(str::to_string);
        self
    }

    /// Enable or disable cell trimming
    pub fn with_trim_cells(mut self, trim: bool) -> Self {
        self.trim_cells = trim;
        self
    }
}
