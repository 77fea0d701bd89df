//! Built-in Shape Tables
//!
//! A small set of common AISC W-shapes (AISC Manual, 16th Ed.) for tests and
//! demos without an external shapes file. The tables go through the regular
//! [`CatalogBuilder`](crate::builder::CatalogBuilder), so the resulting
//! catalog behaves exactly like one loaded from spreadsheets.
//!
//! ```rust
//! let aisc = shape_core::builtin::aisc().unwrap();
//! let w14x90 = aisc.family("W_shapes").unwrap().section("W14X90").unwrap();
//! assert_eq!(w14x90.number("A").unwrap(), Some(26.5));
//! ```

use once_cell::sync::Lazy;

use crate::builder;
use crate::catalog::Catalog;
use crate::errors::{BuildError, BuildResult};
use crate::source::{Cell, MemoryTable};

/// Column layout of the built-in W-shape table
pub const W_SHAPE_COLUMNS: [&str; 17] = [
    "AISC_Manual_Label",
    "Type",
    "weight",
    "A",
    "d",
    "bf",
    "tf",
    "tw",
    "Ix",
    "Sx",
    "rx",
    "Zx",
    "Iy",
    "Sy",
    "ry",
    "Zy",
    "J",
];

/// Label, then W, A, d, bf, tf, tw, Ix, Sx, rx, Zx, Iy, Sy, ry, Zy, J
type WRow = (&'static str, [f64; 15]);

#[rustfmt::skip]
const COMMON_W_SHAPES: [WRow; 29] = [
    // W14 series (common columns)
    ("W14X22", [22.0, 6.49, 13.7, 7.0, 0.335, 0.22, 199.0, 29.0, 5.54, 33.2, 7.0, 2.8, 1.04, 4.39, 0.208]),
    ("W14X30", [30.0, 8.85, 13.8, 6.73, 0.385, 0.27, 291.0, 42.0, 5.73, 47.3, 19.6, 5.82, 1.49, 8.99, 0.38]),
    ("W14X48", [48.0, 14.1, 13.8, 8.03, 0.595, 0.34, 485.0, 70.2, 5.85, 78.4, 51.4, 12.8, 1.91, 26.7, 1.45]),
    ("W14X90", [90.0, 26.5, 14.0, 14.5, 0.71, 0.44, 999.0, 143.0, 6.14, 157.0, 362.0, 49.9, 3.7, 362.0, 4.06]),
    ("W14X132", [132.0, 38.8, 14.7, 14.7, 1.03, 0.645, 1530.0, 209.0, 6.28, 234.0, 548.0, 74.5, 3.76, 548.0, 12.3]),

    // W12 series (common beams/columns)
    ("W12X19", [19.0, 5.57, 12.2, 4.01, 0.35, 0.235, 130.0, 21.3, 4.82, 24.7, 3.76, 1.88, 0.822, 2.98, 0.18]),
    ("W12X26", [26.0, 7.65, 12.2, 6.49, 0.38, 0.23, 204.0, 33.4, 5.17, 37.2, 17.3, 5.34, 1.51, 17.3, 0.3]),
    ("W12X40", [40.0, 11.7, 11.9, 8.01, 0.515, 0.295, 307.0, 51.5, 5.13, 57.0, 44.1, 11.0, 1.94, 44.1, 0.86]),
    ("W12X58", [58.0, 17.0, 12.2, 10.0, 0.64, 0.36, 475.0, 78.0, 5.28, 86.4, 107.0, 21.4, 2.51, 107.0, 2.1]),
    ("W12X96", [96.0, 28.2, 12.7, 12.2, 0.9, 0.55, 833.0, 131.0, 5.44, 147.0, 270.0, 44.4, 3.09, 270.0, 6.85]),

    // W10 series
    ("W10X22", [22.0, 6.49, 10.2, 5.75, 0.36, 0.24, 118.0, 23.2, 4.27, 26.0, 11.4, 3.97, 1.33, 11.4, 0.239]),
    ("W10X33", [33.0, 9.71, 9.73, 7.96, 0.435, 0.29, 170.0, 35.0, 4.19, 38.8, 36.6, 9.2, 1.94, 36.6, 0.583]),
    ("W10X49", [49.0, 14.4, 10.0, 10.0, 0.56, 0.34, 272.0, 54.6, 4.35, 60.4, 93.4, 18.7, 2.54, 93.4, 1.39]),

    // W8 series
    ("W8X18", [18.0, 5.26, 8.14, 5.25, 0.33, 0.23, 61.9, 15.2, 3.43, 17.0, 7.97, 3.04, 1.23, 7.97, 0.172]),
    ("W8X24", [24.0, 7.08, 7.93, 6.5, 0.4, 0.245, 82.7, 20.9, 3.42, 23.1, 18.3, 5.63, 1.61, 18.3, 0.346]),
    ("W8X31", [31.0, 9.12, 8.0, 8.0, 0.435, 0.285, 110.0, 27.5, 3.47, 30.4, 37.1, 9.27, 2.02, 37.1, 0.536]),

    // W6 series
    ("W6X9", [9.0, 2.68, 5.9, 3.94, 0.215, 0.17, 16.4, 5.56, 2.47, 6.23, 2.2, 1.11, 0.905, 2.2, 0.0398]),
    ("W6X15", [15.0, 4.43, 5.99, 5.99, 0.26, 0.23, 29.1, 9.72, 2.56, 10.8, 9.32, 3.11, 1.45, 9.32, 0.103]),

    // W16 series (common beams)
    ("W16X26", [26.0, 7.68, 15.7, 5.5, 0.345, 0.25, 301.0, 38.4, 6.26, 44.2, 9.59, 3.49, 1.12, 5.48, 0.262]),
    ("W16X36", [36.0, 10.6, 15.9, 6.99, 0.43, 0.295, 448.0, 56.5, 6.51, 64.0, 24.5, 7.0, 1.52, 24.5, 0.545]),
    ("W16X50", [50.0, 14.7, 16.3, 7.07, 0.63, 0.38, 659.0, 81.0, 6.68, 92.0, 37.2, 10.5, 1.59, 37.2, 1.52]),

    // W18 series (common beams)
    ("W18X35", [35.0, 10.3, 17.7, 6.0, 0.425, 0.3, 510.0, 57.6, 7.04, 66.5, 15.3, 5.12, 1.22, 8.06, 0.506]),
    ("W18X50", [50.0, 14.7, 18.0, 7.5, 0.57, 0.355, 800.0, 88.9, 7.38, 101.0, 40.1, 10.7, 1.65, 40.1, 1.24]),
    ("W18X71", [71.0, 20.8, 18.5, 7.64, 0.81, 0.495, 1170.0, 127.0, 7.5, 146.0, 60.3, 15.8, 1.7, 60.3, 3.49]),

    // W21 series
    ("W21X44", [44.0, 13.0, 20.7, 6.5, 0.45, 0.35, 843.0, 81.6, 8.06, 95.4, 20.7, 6.36, 1.26, 9.77, 0.77]),
    ("W21X62", [62.0, 18.3, 21.0, 8.24, 0.615, 0.4, 1330.0, 127.0, 8.54, 144.0, 57.5, 13.9, 1.77, 57.5, 1.83]),

    // W24 series (common beams)
    ("W24X55", [55.0, 16.2, 23.6, 7.01, 0.505, 0.395, 1350.0, 114.0, 9.11, 134.0, 29.1, 8.3, 1.34, 13.4, 1.18]),
    ("W24X76", [76.0, 22.4, 23.9, 8.99, 0.68, 0.44, 2100.0, 176.0, 9.69, 200.0, 82.5, 18.4, 1.92, 82.5, 2.68]),
    ("W24X94", [94.0, 27.7, 24.3, 9.07, 0.875, 0.515, 2700.0, 222.0, 9.87, 254.0, 109.0, 24.0, 1.98, 109.0, 5.26]),
];

/// Table of common W-shapes, identified as `W_shapes`
pub fn common_w_shapes() -> MemoryTable {
    let mut table = MemoryTable::new("W_shapes", W_SHAPE_COLUMNS);
    for (label, properties) in COMMON_W_SHAPES {
        let mut row = Vec::with_capacity(W_SHAPE_COLUMNS.len());
        row.push(Cell::from(label));
        row.push(Cell::from("W"));
        row.extend(properties.into_iter().map(Cell::Number));
        table.push_row(row);
    }
    table
}

static AISC: Lazy<BuildResult<Catalog>> = Lazy::new(|| builder::build([common_w_shapes()]));

/// Process-wide catalog of the built-in tables, built on first use
pub fn aisc() -> Result<&'static Catalog, &'static BuildError> {
    Lazy::force(&AISC).as_ref()
}
