//! Sections and Property Schemas
//!
//! A [`Section`] is one row of a shape table: its designation (e.g. "W14X90")
//! plus one [`Value`] per schema column. Property names are only known once
//! the source is read, so each family carries its column list as run-time
//! data in a [`Schema`], shared by all of the family's sections.
//!
//! ## Example
//!
//! ```rust
//! use shape_core::builder::CatalogBuilder;
//! use shape_core::source::{Cell, MemoryTable};
//!
//! let table = MemoryTable::new("W_shapes.xlsx", ["Label", "d", "weight", "Type"])
//!     .with_row(vec![Cell::from("W12X26"), Cell::from(12.2), Cell::from(26.0), Cell::from("W")]);
//! let catalog = CatalogBuilder::new().source(table).build().unwrap();
//!
//! let w12 = catalog.family("W_shapes").unwrap().section("W12X26").unwrap();
//! assert_eq!(w12.number("d").unwrap(), Some(12.2));
//! assert_eq!(w12.property("Type").unwrap().as_text(), Some("W"));
//! assert!(w12.property("Zx").is_err());
//! ```

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{FieldError, FieldResult};
use crate::value::Value;

/// Ordered property names of one shape family
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    family: String,
    columns: Vec<String>,
    index: HashMap<String, usize>,
}

impl Schema {
    /// Create a schema from ordered column names.
    ///
    /// Column names are expected to be unique (the builder rejects repeated
    /// header names); otherwise lookups resolve to the first occurrence.
    pub fn new(family: impl Into<String>, columns: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(columns.len());
        for (i, column) in columns.iter().enumerate() {
            index.entry(column.clone()).or_insert(i);
        }
        Schema {
            family: family.into(),
            columns,
            index,
        }
    }

    /// Name of the family this schema belongs to
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Property names in column order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of properties
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Check if the schema has no properties
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Check if a property exists (exact, case-sensitive)
    pub fn contains(&self, property: &str) -> bool {
        self.index.contains_key(property)
    }

    /// Resolve a property name to its column position
    pub fn position(&self, property: &str) -> FieldResult<usize> {
        self.index
            .get(property)
            .copied()
            .ok_or_else(|| FieldError::unknown_field(&self.family, property))
    }
}

/// One catalogued section (a row of a shape table)
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    name: String,
    schema: Arc<Schema>,
    values: Vec<Value>,
}

impl Section {
    /// Values must line up with `schema` column for column; the builder
    /// guarantees this.
    pub(crate) fn new(name: String, schema: Arc<Schema>, values: Vec<Value>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Section { name, schema, values }
    }

    /// Section designation (e.g. "W14X90")
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema shared with the rest of the family
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a property by exact name
    pub fn property(&self, property: &str) -> FieldResult<&Value> {
        let i = self.schema.position(property)?;
        Ok(&self.values[i])
    }

    /// Look up a numeric property; `Ok(None)` when the stored value is text
    pub fn number(&self, property: &str) -> FieldResult<Option<f64>> {
        Ok(self.property(property)?.as_f64())
    }

    /// Properties in schema order
    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.schema
            .columns()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub(crate) fn value_at(&self, position: usize) -> &Value {
        &self.values[position]
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (", self.name)?;
        for (i, (property, value)) in self.properties().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", property, value)?;
        }
        write!(f, ")")
    }
}

/// Serializes as `{ "name": ..., "properties": { column: value, ... } }`
/// with properties in schema order.
impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Section", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("properties", &PropertyMap(self))?;
        state.end()
    }
}

struct PropertyMap<'a>(&'a Section);

impl Serialize for PropertyMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.values.len()))?;
        for (property, value) in self.0.properties() {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}
