//! # Catalog Root
//!
//! The top-level namespace of shape families. A [`Catalog`] is produced in
//! one piece by [`CatalogBuilder`](crate::builder::CatalogBuilder) and is
//! read-only afterwards, so a shared reference can be handed to any number
//! of threads without locking.
//!
//! ```text
//! Catalog
//! ├── "W_shapes"  → ShapeFamily { schema: [weight, A, d, ...], sections: [W14X22, ...] }
//! ├── "C_shapes"  → ShapeFamily { ... }
//! └── "L_shapes"  → ShapeFamily { ... }
//! ```

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

use crate::errors::FieldResult;
use crate::family::ShapeFamily;
use crate::query::Criteria;
use crate::section::Section;
use crate::settings::CatalogSettings;

/// Shape families keyed by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    /// Families in registration order
    families: Vec<ShapeFamily>,
    /// Family name -> position in `families`
    index: HashMap<String, usize>,
    settings: CatalogSettings,
}

impl Catalog {
    pub(crate) fn new(settings: CatalogSettings) -> Self {
        Catalog {
            families: Vec::new(),
            index: HashMap::new(),
            settings,
        }
    }

    /// Register a family. Returns it back if the name is taken.
    pub(crate) fn register(&mut self, family: ShapeFamily) -> Result<(), ShapeFamily> {
        if self.index.contains_key(family.name()) {
            return Err(family);
        }
        self.index.insert(family.name().to_string(), self.families.len());
        self.families.push(family);
        Ok(())
    }

    pub(crate) fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Look up a family by exact name
    pub fn family(&self, name: &str) -> Option<&ShapeFamily> {
        self.index.get(name).map(|&i| &self.families[i])
    }

    /// Families in the order their sources were supplied
    pub fn families(&self) -> std::slice::Iter<'_, ShapeFamily> {
        self.families.iter()
    }

    /// Family names in registration order
    pub fn family_names(&self) -> Vec<&str> {
        self.families.iter().map(ShapeFamily::name).collect()
    }

    /// Number of families
    pub fn len(&self) -> usize {
        self.families.len()
    }

    /// Check if the catalog has no families
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Settings the catalog was built with
    pub fn settings(&self) -> &CatalogSettings {
        &self.settings
    }

    /// Find a section by designation in any family.
    ///
    /// Families are searched in registration order; the first match wins.
    pub fn find_section(&self, name: &str) -> Option<(&ShapeFamily, &Section)> {
        self.families
            .iter()
            .find_map(|family| family.section(name).map(|section| (family, section)))
    }

    /// Range query on one family, sorted by the catalog's default sort key.
    ///
    /// Returns `Ok(None)` when the family does not exist.
    pub fn filter(&self, family: &str, criteria: &Criteria) -> FieldResult<Option<Vec<&Section>>> {
        self.family(family)
            .map(|f| f.filter(criteria, self.settings.default_sort_by.as_deref()))
            .transpose()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a ShapeFamily;
    type IntoIter = std::slice::Iter<'a, ShapeFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.families()
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Catalog", 2)?;
        state.serialize_field("settings", &self.settings)?;
        state.serialize_field("families", &self.families)?;
        state.end()
    }
}
