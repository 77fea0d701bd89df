//! Property Values
//!
//! A shape table mixes engineering quantities (weight, depth, Ix, ...) with
//! text columns such as type codes or EDI names. Every cell is typed on its
//! own when the catalog is built: if it parses as a number it becomes
//! [`Value::Number`], otherwise the raw text is kept as [`Value::Text`].
//!
//! Range filters only ever match numbers. Sorting uses [`Value::total_cmp`],
//! which orders numbers numerically, text lexicographically, and places all
//! numbers before all text when a column mixes the two.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::source::Cell;

/// A single property value of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Numeric value (integer cells are widened to f64)
    Number(f64),
    /// Cell text that did not parse as a number
    Text(String),
}

impl Value {
    /// Type a raw table cell.
    ///
    /// Finite numeric cells pass through; NaN and infinite cells (how some
    /// readers deliver blanks) become empty text. Text cells are parsed as an
    /// integer or floating point number and kept as text when that fails.
    /// With `trim` set, surrounding whitespace is removed first.
    pub fn from_cell(cell: &Cell, trim: bool) -> Self {
        match cell {
            Cell::Number(n) if n.is_finite() => Value::Number(*n),
            Cell::Number(_) => Value::Text(String::new()),
            Cell::Text(s) => {
                let text = if trim { s.trim() } else { s.as_str() };
                Value::parse(text)
            }
        }
    }

    /// Parse a text cell into a number, falling back to the text itself
    pub fn parse(text: &str) -> Self {
        parse_number(text)
            .map(Value::Number)
            .unwrap_or_else(|| Value::Text(text.to_string()))
    }

    /// Get the numeric value, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Get the text value, if any
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Number(_) => None,
            Value::Text(s) => Some(s),
        }
    }

    /// Check if this value can take part in a range comparison
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Total order used for sorting.
    ///
    /// Numbers compare numerically (`-0.0` equals `0.0`), text compares
    /// lexicographically, and any number orders before any text.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => {
                a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b))
            }
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Number(_), Value::Text(_)) => Ordering::Less,
            (Value::Text(_), Value::Number(_)) => Ordering::Greater,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse an integer or floating point literal.
///
/// Words such as "inf" or "NaN" are accepted by `f64::from_str` but are
/// kept as text here.
fn parse_number(s: &str) -> Option<f64> {
    if let Ok(i) = i64::from_str(s) {
        return Some(i as f64);
    }
    f64::from_str(s).ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_text() {
        assert_eq!(Value::parse("26"), Value::Number(26.0));
        assert_eq!(Value::parse("12.2"), Value::Number(12.2));
        assert_eq!(Value::parse("-0.5"), Value::Number(-0.5));
        assert_eq!(Value::parse("1e3"), Value::Number(1000.0));
    }

    #[test]
    fn test_parse_falls_back_to_text() {
        assert_eq!(Value::parse("W"), Value::Text("W".to_string()));
        assert_eq!(Value::parse(""), Value::Text(String::new()));
        assert_eq!(Value::parse("-"), Value::Text("-".to_string()));
        assert_eq!(Value::parse("inf"), Value::Text("inf".to_string()));
        assert_eq!(Value::parse("NaN"), Value::Text("NaN".to_string()));
    }

    #[test]
    fn test_from_cell_trim() {
        let cell = Cell::Text("  13.7 ".to_string());
        assert_eq!(Value::from_cell(&cell, true), Value::Number(13.7));
        assert_eq!(Value::from_cell(&cell, false), Value::Text("  13.7 ".to_string()));
        assert_eq!(Value::from_cell(&Cell::Number(199.0), false), Value::Number(199.0));
    }

    #[test]
    fn test_non_finite_cells_become_blank_text() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let value = Value::from_cell(&Cell::Number(n), true);
            assert_eq!(value, Value::Text(String::new()));
            assert!(!value.is_numeric());
        }
    }

    #[test]
    fn test_signed_zeros_compare_equal() {
        let zero = Value::Number(0.0);
        let neg_zero = Value::parse("-0.0");
        assert_eq!(neg_zero.total_cmp(&zero), Ordering::Equal);
        assert_eq!(zero.total_cmp(&neg_zero), Ordering::Equal);
    }

    #[test]
    fn test_total_cmp() {
        let a = Value::Number(22.0);
        let b = Value::Number(26.0);
        let t = Value::from("HSS");
        let u = Value::from("W");

        assert_eq!(a.total_cmp(&b), Ordering::Less);
        assert_eq!(b.total_cmp(&a), Ordering::Greater);
        assert_eq!(t.total_cmp(&u), Ordering::Less);
        assert_eq!(b.total_cmp(&t), Ordering::Less);
        assert_eq!(t.total_cmp(&a), Ordering::Greater);
        assert_eq!(a.total_cmp(&Value::Number(22.0)), Ordering::Equal);
    }

    #[test]
    fn test_serialization_is_untagged() {
        assert_eq!(serde_json::to_string(&Value::Number(26.0)).unwrap(), "26.0");
        assert_eq!(serde_json::to_string(&Value::from("W")).unwrap(), "\"W\"");

        let parsed: Value = serde_json::from_str("\"L\"").unwrap();
        assert_eq!(parsed, Value::from("L"));
    }
}
