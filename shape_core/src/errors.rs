//! # Error Types
//!
//! Structured error types for shape_core. Catalog construction and catalog
//! queries fail in different ways, so each phase has its own enum:
//!
//! - [`BuildError`] - raised only while building a [`Catalog`](crate::catalog::Catalog).
//!   Any of these aborts the whole build; no partial catalog is returned.
//! - [`FieldError`] - raised by lookups, filters and sorts that reference a
//!   property the family schema does not define, or that pass an empty bound.
//!
//! ## Example
//!
//! ```rust
//! use shape_core::errors::{FieldError, FieldResult};
//!
//! fn require_depth(schema: &[&str]) -> FieldResult<()> {
//!     if !schema.contains(&"d") {
//!         return Err(FieldError::unknown_field("W_shapes", "d"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_depth(&["weight", "Ix"]).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for catalog construction
pub type BuildResult<T> = Result<T, BuildError>;

/// Result type alias for field access and queries
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors raised while ingesting tabular sources into a catalog.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum BuildError {
    /// Two sources resolved to the same family name
    #[error("Duplicate family name: '{family}'")]
    DuplicateFamilyName { family: String },

    /// Two rows of one source carry the same section name
    #[error("Duplicate section name in '{family}': '{section}' (row {row})")]
    DuplicateSectionName {
        family: String,
        section: String,
        row: usize,
    },

    /// A data row has no section name in its first column
    #[error("Missing section name in '{family}' at row {row}")]
    MissingSectionName { family: String, row: usize },

    /// A data row's property count differs from the header's
    #[error("Row {row} of '{family}' has {found} property values, schema has {expected}")]
    RowSchemaMismatch {
        family: String,
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Two header columns share a name (after trimming, if enabled)
    #[error("Duplicate column name in '{family}': '{column}'")]
    DuplicateColumnName { family: String, column: String },

    /// The header row is empty, so there is no section-name column
    #[error("Source '{identifier}' has no header columns")]
    MissingHeader { identifier: String },
}

impl BuildError {
    /// Create a DuplicateFamilyName error
    pub fn duplicate_family(family: impl Into<String>) -> Self {
        BuildError::DuplicateFamilyName {
            family: family.into(),
        }
    }

    /// Create a DuplicateSectionName error
    pub fn duplicate_section(family: impl Into<String>, section: impl Into<String>, row: usize) -> Self {
        BuildError::DuplicateSectionName {
            family: family.into(),
            section: section.into(),
            row,
        }
    }

    /// Create a MissingSectionName error
    pub fn missing_section(family: impl Into<String>, row: usize) -> Self {
        BuildError::MissingSectionName {
            family: family.into(),
            row,
        }
    }

    /// Create a RowSchemaMismatch error
    pub fn row_mismatch(family: impl Into<String>, row: usize, expected: usize, found: usize) -> Self {
        BuildError::RowSchemaMismatch {
            family: family.into(),
            row,
            expected,
            found,
        }
    }

    /// Create a DuplicateColumnName error
    pub fn duplicate_column(family: impl Into<String>, column: impl Into<String>) -> Self {
        BuildError::DuplicateColumnName {
            family: family.into(),
            column: column.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            BuildError::DuplicateFamilyName { .. } => "DUPLICATE_FAMILY_NAME",
            BuildError::DuplicateSectionName { .. } => "DUPLICATE_SECTION_NAME",
            BuildError::MissingSectionName { .. } => "MISSING_SECTION_NAME",
            BuildError::RowSchemaMismatch { .. } => "ROW_SCHEMA_MISMATCH",
            BuildError::DuplicateColumnName { .. } => "DUPLICATE_COLUMN_NAME",
            BuildError::MissingHeader { .. } => "MISSING_HEADER",
        }
    }
}

/// Errors raised by field access, filters and sorts on a built catalog.
///
/// Callers often probe optional property names, so these are always
/// returned, never panicked on.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum FieldError {
    /// The property is not part of the family's schema
    #[error("Unknown field '{field}' in family '{family}'")]
    UnknownField { family: String, field: String },

    /// A filter criterion supplied neither `min` nor `max`
    #[error("Criterion for '{field}' has neither min nor max")]
    EmptyBound { field: String },
}

impl FieldError {
    /// Create an UnknownField error
    pub fn unknown_field(family: impl Into<String>, field: impl Into<String>) -> Self {
        FieldError::UnknownField {
            family: family.into(),
            field: field.into(),
        }
    }

    /// Create an EmptyBound error
    pub fn empty_bound(field: impl Into<String>) -> Self {
        FieldError::EmptyBound { field: field.into() }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            FieldError::UnknownField { .. } => "UNKNOWN_FIELD",
            FieldError::EmptyBound { .. } => "EMPTY_BOUND",
        }
    }
}
