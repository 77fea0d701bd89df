//! # shape_core - Structural Steel Shape Catalog
//!
//! `shape_core` holds standardized steel shape tables (W-shapes, channels,
//! angles, HSS, ...) in memory and answers two kinds of questions:
//! "what are the properties of W14X90?" and "which W-shapes between 11 and
//! 14 inches deep are lightest?".
//!
//! ## Design Philosophy
//!
//! - **Schema from data**: Each family's property names come from its table
//!   header, not from a compiled-in struct
//! - **Build once, read forever**: A catalog is built in one step and is
//!   immutable afterwards, so it can be shared across threads freely
//! - **Rich Errors**: Typos in property names are errors, never empty results
//! - **JSON-First**: Sections, families, criteria and errors serialize with serde
//!
//! ## Quick Start
//!
//! ```rust
//! use shape_core::{Catalog, CatalogBuilder, Criteria, MemoryTable};
//!
//! let w = MemoryTable::new("W_shapes.xlsx", ["Label", "d", "weight", "Ix"])
//!     .with_row(vec!["W12X26".into(), 12.2.into(), 26.0.into(), 204.0.into()])
//!     .with_row(vec!["W14X22".into(), 13.7.into(), 22.0.into(), 199.0.into()])
//!     .with_row(vec!["W10X30".into(), 10.5.into(), 30.0.into(), 170.0.into()]);
//!
//! let catalog: Catalog = CatalogBuilder::new().source(w).build().unwrap();
//! let family = catalog.family("W_shapes").unwrap();
//!
//! let hits = family.filter(&Criteria::new().range("d", 11.0, 14.0), Some("weight")).unwrap();
//! let names: Vec<&str> = hits.iter().map(|s| s.name()).collect();
//! assert_eq!(names, ["W14X22", "W12X26"]);
//! ```
//!
//! ## Modules
//!
//! - [`source`] - The tabular input boundary and an in-memory table
//! - [`builder`] - Catalog construction and schema inference
//! - [`catalog`] - The catalog root
//! - [`family`] - Shape families and section lookup
//! - [`section`] - Sections, schemas and property access
//! - [`query`] - Range filters and sorting
//! - [`value`] - Property values
//! - [`settings`] - Build and query options
//! - [`builtin`] - Built-in AISC W-shape table
//! - [`errors`] - Structured error types

pub mod builder;
pub mod builtin;
pub mod catalog;
pub mod errors;
pub mod family;
pub mod query;
pub mod section;
pub mod settings;
pub mod source;
pub mod value;

// Re-export commonly used types at crate root for convenience
pub use builder::{build, CatalogBuilder};
pub use catalog::Catalog;
pub use errors::{BuildError, BuildResult, FieldError, FieldResult};
pub use family::ShapeFamily;
pub use query::{Bound, Criteria, Query};
pub use section::{Schema, Section};
pub use settings::CatalogSettings;
pub use source::{Cell, MemoryTable, TabularSource};
pub use value::Value;
