//! # Catalog Builder
//!
//! Turns a sequence of [`TabularSource`]s into a [`Catalog`], one
//! [`ShapeFamily`] per source.
//!
//! ## Ingestion Rules
//!
//! - The family name is the source identifier without directory or
//!   extension (`"W_shapes.xlsx"` → `"W_shapes"`).
//! - The first header column is the section-name column; the rest, in
//!   order, become the family schema.
//! - Each data row must have a non-empty section name that is unique within
//!   its source, followed by exactly one cell per schema column.
//! - Cells are typed individually: numeric if they parse, text otherwise.
//!
//! Any violation aborts the whole build. Row numbers in errors count the
//! header as row 1, so the first data row is row 2, as a spreadsheet shows it.
//!
//! ## Example
//!
//! ```rust
//! use shape_core::builder::CatalogBuilder;
//! use shape_core::source::MemoryTable;
//!
//! let channels = MemoryTable::new("C_shapes.xlsx", ["AISC_Manual_Label", "d", "weight"])
//!     .with_row(vec!["C10X20".into(), 10.0.into(), 20.0.into()])
//!     .with_row(vec!["C12X30".into(), 12.0.into(), 30.0.into()]);
//!
//! let catalog = CatalogBuilder::new().source(channels).build().unwrap();
//! assert_eq!(catalog.family("C_shapes").unwrap().len(), 2);
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::errors::{BuildError, BuildResult};
use crate::family::ShapeFamily;
use crate::section::{Schema, Section};
use crate::settings::CatalogSettings;
use crate::source::{family_name_from_identifier, Cell, TabularSource};
use crate::value::Value;

/// Collects sources and settings, then builds a catalog in one step
#[derive(Default)]
pub struct CatalogBuilder<'a> {
    settings: CatalogSettings,
    sources: Vec<Box<dyn TabularSource + 'a>>,
}

impl<'a> CatalogBuilder<'a> {
    /// Create a builder with default settings and no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the build settings
    pub fn with_settings(mut self, settings: CatalogSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Add a source; families are registered in the order sources are added
    pub fn source(mut self, source: impl TabularSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Add several sources
    pub fn sources<T, I>(mut self, sources: I) -> Self
    where
        T: TabularSource + 'a,
        I: IntoIterator<Item = T>,
    {
        for source in sources {
            self.sources.push(Box::new(source));
        }
        self
    }

    /// Build the catalog.
    ///
    /// Either every source is ingested or an error is returned and nothing
    /// is kept.
    pub fn build(self) -> BuildResult<Catalog> {
        let mut catalog = Catalog::new(self.settings.clone());

        for source in &self.sources {
            let family_name = family_name_from_identifier(source.identifier());
            if catalog.contains(&family_name) {
                return Err(BuildError::duplicate_family(family_name));
            }

            let family = build_family(source.as_ref(), family_name, &self.settings)?;
            debug!(
                family = family.name(),
                properties = family.schema().len(),
                sections = family.len(),
                "registered shape family"
            );

            catalog
                .register(family)
                .map_err(|family| BuildError::duplicate_family(family.name()))?;
        }

        info!(families = catalog.len(), "shape catalog built");
        Ok(catalog)
    }
}

/// Build a catalog from sources with default settings
pub fn build<T, I>(sources: I) -> BuildResult<Catalog>
where
    T: TabularSource,
    I: IntoIterator<Item = T>,
{
    CatalogBuilder::new().sources(sources).build()
}

/// Ingest one source into a family
fn build_family(
    source: &dyn TabularSource,
    family_name: String,
    settings: &CatalogSettings,
) -> BuildResult<ShapeFamily> {
    let header = source.header();
    if header.is_empty() {
        return Err(BuildError::MissingHeader {
            identifier: source.identifier().to_string(),
        });
    }

    let columns = header[1..]
        .iter()
        .map(|column| {
            if settings.trim_cells {
                column.trim().to_string()
            } else {
                column.clone()
            }
        })
        .collect::<Vec<String>>();
    if let Some(column) = first_repeated(&columns) {
        return Err(BuildError::duplicate_column(family_name, column));
    }
    let schema = Arc::new(Schema::new(family_name, columns));
    let mut family = ShapeFamily::new(Arc::clone(&schema), settings.default_sort_by.clone());

    for (i, cells) in source.rows().enumerate() {
        let row = i + 2;
        let name = section_name(cells.first(), settings.trim_cells)
            .ok_or_else(|| BuildError::missing_section(schema.family(), row))?;

        let found = cells.len() - 1;
        if found != schema.len() {
            return Err(BuildError::row_mismatch(schema.family(), row, schema.len(), found));
        }

        let values = cells[1..]
            .iter()
            .map(|cell| Value::from_cell(cell, settings.trim_cells))
            .collect();

        family
            .insert(Section::new(name, Arc::clone(&schema), values))
            .map_err(|section| BuildError::duplicate_section(schema.family(), section.name(), row))?;
    }

    Ok(family)
}

/// Section name from the first cell of a row; `None` when missing or blank
fn section_name(cell: Option<&Cell>, trim: bool) -> Option<String> {
    let cell = cell?;
    if cell.is_blank() {
        return None;
    }
    Some(match cell {
        Cell::Number(n) if !n.is_finite() => return None,
        Cell::Number(n) => n.to_string(),
        Cell::Text(s) if trim => s.trim().to_string(),
        Cell::Text(s) => s.clone(),
    })
}

/// First column name that appears more than once
fn first_repeated(columns: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.as_str()) {
            return Some(column);
        }
    }
    None
}
