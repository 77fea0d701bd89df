//! Shape Families
//!
//! A [`ShapeFamily`] is everything loaded from one shape table, e.g. all
//! W-shapes or all single angles. Sections keep the table's row order and
//! are indexed by designation for exact lookups. Range queries live in
//! [`crate::query`].

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::FieldResult;
use crate::section::{Schema, Section};
use crate::value::Value;

/// A named, ordered collection of sections sharing one schema
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFamily {
    name: String,
    schema: Arc<Schema>,
    /// Sections in source row order
    sections: Vec<Section>,
    /// Section name -> position in `sections`
    index: HashMap<String, usize>,
    /// Sort key used when a query does not name one
    default_sort_by: Option<String>,
}

impl ShapeFamily {
    pub(crate) fn new(schema: Arc<Schema>, default_sort_by: Option<String>) -> Self {
        ShapeFamily {
            name: schema.family().to_string(),
            schema,
            sections: Vec::new(),
            index: HashMap::new(),
            default_sort_by,
        }
    }

    /// Append a section built against this family's schema.
    ///
    /// Returns the section back if its name is already taken.
    pub(crate) fn insert(&mut self, section: Section) -> Result<(), Section> {
        if self.index.contains_key(section.name()) {
            return Err(section);
        }
        self.index.insert(section.name().to_string(), self.sections.len());
        self.sections.push(section);
        Ok(())
    }

    /// Family name (e.g. "W_shapes")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property schema shared by every section of the family
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Check if the schema defines a property (exact, case-sensitive)
    pub fn has_property(&self, property: &str) -> bool {
        self.schema.contains(property)
    }

    /// Sort key applied by [`ShapeFamily::filter_default`]
    pub fn default_sort_by(&self) -> Option<&str> {
        self.default_sort_by.as_deref()
    }

    /// Look up a section by exact designation
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.index.get(name).map(|&i| &self.sections[i])
    }

    /// Alias for [`ShapeFamily::section`]
    pub fn get(&self, name: &str) -> Option<&Section> {
        self.section(name)
    }

    /// Check if a section exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Read one property of a section.
    ///
    /// The name is resolved against this family's schema first, so a name
    /// the family does not define is always `UnknownField`.
    pub fn property<'a>(&self, section: &'a Section, property: &str) -> FieldResult<&'a Value> {
        let position = self.schema.position(property)?;
        if std::ptr::eq(section.schema(), Arc::as_ptr(&self.schema)) {
            Ok(section.value_at(position))
        } else {
            section.property(property)
        }
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Check if the family has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Sections in source row order
    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    /// Section designations in source row order
    pub fn section_names(&self) -> Vec<&str> {
        self.sections.iter().map(Section::name).collect()
    }

    /// Sections whose designation starts with `prefix`, ignoring case.
    ///
    /// ```rust
    /// let catalog = shape_core::builtin::aisc().unwrap();
    /// let w14 = catalog.family("W_shapes").unwrap().search("w14");
    /// assert!(w14.iter().all(|s| s.name().starts_with("W14")));
    /// ```
    pub fn search(&self, prefix: &str) -> Vec<&Section> {
        let prefix = prefix.to_uppercase();
        self.sections
            .iter()
            .filter(|s| s.name().to_uppercase().starts_with(&prefix))
            .collect()
    }

    pub(crate) fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl<'a> IntoIterator for &'a ShapeFamily {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Serialize for ShapeFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ShapeFamily", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("schema", self.schema.columns())?;
        state.serialize_field("sections", &self.sections)?;
        state.end()
    }
}
