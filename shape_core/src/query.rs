//! Range Queries
//!
//! Select the sections of a family whose numeric properties fall inside
//! inclusive bounds, then order them by one property.
//!
//! ## Semantics
//!
//! - A section is kept when every criterion holds: `min <= v` (if `min` is
//!   given) and `v <= max` (if `max` is given). Criteria are checked in the
//!   order they were added and stop at the first failure.
//! - A text value never satisfies a bound. Such sections are dropped, not
//!   reported.
//! - Every property name (criteria and sort key) is resolved before any
//!   section is examined, so a misspelled name is always an error, even on
//!   an empty family.
//! - Sorting is ascending by [`Value::total_cmp`] and stable: equal keys
//!   keep source row order. With no sort key, row order is returned.
//!
//! ## Example
//!
//! ```rust
//! use shape_core::query::Criteria;
//!
//! let catalog = shape_core::builtin::aisc().unwrap();
//! let w = catalog.family("W_shapes").unwrap();
//!
//! let criteria = Criteria::new().range("d", 11.0, 14.0);
//! let light_first = w.filter(&criteria, Some("weight")).unwrap();
//! assert_eq!(light_first[0].name(), "W12X19");
//!
//! // The same query through the builder
//! let same = w.query().range("d", 11.0, 14.0).sort_by("weight").run().unwrap();
//! assert_eq!(light_first, same);
//! ```

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{FieldError, FieldResult};
use crate::family::ShapeFamily;
use crate::section::Section;
use crate::value::Value;

/// Inclusive numeric bounds for one property
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bound {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Bound {
    /// Both ends bounded
    pub fn between(min: f64, max: f64) -> Self {
        Bound {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Lower bound only
    pub fn at_least(min: f64) -> Self {
        Bound { min: Some(min), max: None }
    }

    /// Upper bound only
    pub fn at_most(max: f64) -> Self {
        Bound { min: None, max: Some(max) }
    }

    /// Check if neither end is set
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Check a number against the bounds
    pub fn contains(&self, v: f64) -> bool {
        self.min.map_or(true, |min| v >= min) && self.max.map_or(true, |max| v <= max)
    }

    /// Check a property value; text never matches
    pub fn admits(&self, value: &Value) -> bool {
        value.as_f64().is_some_and(|v| self.contains(v))
    }
}

/// Ordered set of per-property bounds.
///
/// Deserializes from a JSON object such as `{"d": {"min": 11, "max": 14}}`,
/// keeping the object's key order as evaluation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    entries: Vec<(String, Bound)>,
}

impl Criteria {
    /// Create an empty criteria set (matches every section)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the bounds for a property.
    ///
    /// Setting a property again replaces its bounds in place.
    pub fn with(mut self, property: impl Into<String>, bound: Bound) -> Self {
        self.insert(property, bound);
        self
    }

    /// Bound a property on both ends
    pub fn range(self, property: impl Into<String>, min: f64, max: f64) -> Self {
        self.with(property, Bound::between(min, max))
    }

    /// Set the lower bound of a property, keeping any upper bound
    pub fn min(mut self, property: impl Into<String>, min: f64) -> Self {
        self.bound_mut(property.into()).min = Some(min);
        self
    }

    /// Set the upper bound of a property, keeping any lower bound
    pub fn max(mut self, property: impl Into<String>, max: f64) -> Self {
        self.bound_mut(property.into()).max = Some(max);
        self
    }

    /// Set the bounds for a property in place
    pub fn insert(&mut self, property: impl Into<String>, bound: Bound) {
        *self.bound_mut(property.into()) = bound;
    }

    /// Bounds for a property, if any
    pub fn get(&self, property: &str) -> Option<&Bound> {
        self.entries.iter().find(|(p, _)| p == property).map(|(_, b)| b)
    }

    /// Criteria in evaluation order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bound)> {
        self.entries.iter().map(|(p, b)| (p.as_str(), b))
    }

    /// Number of bounded properties
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no property is bounded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn bound_mut(&mut self, property: String) -> &mut Bound {
        let i = match self.entries.iter().position(|(p, _)| *p == property) {
            Some(i) => i,
            None => {
                self.entries.push((property, Bound::default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[i].1
    }
}

impl Serialize for Criteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, bound) in &self.entries {
            map.serialize_entry(property, bound)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Criteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CriteriaVisitor;

        impl<'de> Visitor<'de> for CriteriaVisitor {
            type Value = Criteria;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of property name to {min, max} bounds")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Criteria, A::Error> {
                let mut criteria = Criteria::new();
                while let Some((property, bound)) = access.next_entry::<String, Bound>()? {
                    criteria.insert(property, bound);
                }
                Ok(criteria)
            }
        }

        deserializer.deserialize_map(CriteriaVisitor)
    }
}

impl ShapeFamily {
    /// Sections matching `criteria`, ascending by `sort_by`.
    ///
    /// `sort_by = None` keeps source row order.
    ///
    /// # Errors
    ///
    /// - [`FieldError::UnknownField`] if a criterion or the sort key is not in
    ///   the schema
    /// - [`FieldError::EmptyBound`] if a criterion has neither `min` nor `max`
    pub fn filter(&self, criteria: &Criteria, sort_by: Option<&str>) -> FieldResult<Vec<&Section>> {
        let schema = self.schema();

        let mut checks = Vec::with_capacity(criteria.len());
        for (property, bound) in criteria.iter() {
            let position = schema.position(property)?;
            if bound.is_empty() {
                return Err(FieldError::empty_bound(property));
            }
            checks.push((position, bound));
        }
        let sort_position = sort_by.map(|p| schema.position(p)).transpose()?;

        let mut matches: Vec<&Section> = self
            .sections()
            .iter()
            .filter(|section| {
                checks
                    .iter()
                    .all(|(position, bound)| bound.admits(section.value_at(*position)))
            })
            .collect();

        if let Some(position) = sort_position {
            // Vec::sort_by is stable, so ties keep row order
            matches.sort_by(|a, b| a.value_at(position).total_cmp(b.value_at(position)));
        }

        Ok(matches)
    }

    /// [`ShapeFamily::filter`] sorted by the family's default sort key
    pub fn filter_default(&self, criteria: &Criteria) -> FieldResult<Vec<&Section>> {
        self.filter(criteria, self.default_sort_by())
    }

    /// Start a fluent query, sorted by the default sort key unless changed
    pub fn query(&self) -> Query<'_> {
        Query {
            family: self,
            criteria: Criteria::new(),
            sort_by: self.default_sort_by().map(str::to_string),
        }
    }
}

/// Fluent builder over [`ShapeFamily::filter`]
#[derive(Debug, Clone)]
pub struct Query<'a> {
    family: &'a ShapeFamily,
    criteria: Criteria,
    sort_by: Option<String>,
}

impl<'a> Query<'a> {
    /// Lower-bound a property
    pub fn min(mut self, property: impl Into<String>, min: f64) -> Self {
        self.criteria = self.criteria.min(property, min);
        self
    }

    /// Upper-bound a property
    pub fn max(mut self, property: impl Into<String>, max: f64) -> Self {
        self.criteria = self.criteria.max(property, max);
        self
    }

    /// Bound a property on both ends
    pub fn range(mut self, property: impl Into<String>, min: f64, max: f64) -> Self {
        self.criteria = self.criteria.range(property, min, max);
        self
    }

    /// Add every criterion of an existing set
    pub fn criteria(mut self, criteria: &Criteria) -> Self {
        for (property, bound) in criteria.iter() {
            self.criteria.insert(property, *bound);
        }
        self
    }

    /// Sort ascending by a property
    pub fn sort_by(mut self, property: impl Into<String>) -> Self {
        self.sort_by = Some(property.into());
        self
    }

    /// Keep source row order
    pub fn unsorted(mut self) -> Self {
        self.sort_by = None;
        self
    }

    /// Execute the query
    pub fn run(&self) -> FieldResult<Vec<&'a Section>> {
        self.family.filter(&self.criteria, self.sort_by.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CatalogBuilder;
    use crate::catalog::Catalog;
    use crate::source::{Cell, MemoryTable};
    use proptest::prelude::*;

    fn w_catalog() -> Catalog {
        let table = MemoryTable::new("W_shapes", ["Label", "d", "weight", "Ix"])
            .with_row(vec!["W12X26".into(), 12.2.into(), 26.0.into(), 204.0.into()])
            .with_row(vec!["W14X22".into(), 13.7.into(), 22.0.into(), 199.0.into()])
            .with_row(vec!["W10X30".into(), 10.5.into(), 30.0.into(), 170.0.into()]);
        CatalogBuilder::new().source(table).build().unwrap()
    }

    fn names(sections: &[&Section]) -> Vec<String> {
        sections.iter().map(|s| s.name().to_string()).collect()
    }

    #[test]
    fn test_depth_range_sorted_by_weight() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();
        let criteria = Criteria::new().range("d", 11.0, 14.0);

        let result = family.filter(&criteria, Some("weight")).unwrap();
        assert_eq!(names(&result), vec!["W14X22", "W12X26"]);
    }

    #[test]
    fn test_default_sort_is_weight() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter_default(&Criteria::new()).unwrap();
        assert_eq!(names(&result), vec!["W14X22", "W12X26", "W10X30"]);
    }

    #[test]
    fn test_no_sort_keeps_row_order() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter(&Criteria::new().min("Ix", 180.0), None).unwrap();
        assert_eq!(names(&result), vec!["W12X26", "W14X22"]);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter(&Criteria::new().range("weight", 22.0, 26.0), None).unwrap();
        assert_eq!(names(&result), vec!["W12X26", "W14X22"]);

        let result = family.filter(&Criteria::new().max("d", 10.5), None).unwrap();
        assert_eq!(names(&result), vec!["W10X30"]);
    }

    #[test]
    fn test_unknown_criterion_is_an_error() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter(&Criteria::new().min("nonexistent", 0.0), Some("weight"));
        assert_eq!(result, Err(FieldError::unknown_field("W_shapes", "nonexistent")));
    }

    #[test]
    fn test_unknown_sort_key_is_an_error() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter(&Criteria::new(), Some("Weight"));
        assert_eq!(result.unwrap_err().error_code(), "UNKNOWN_FIELD");
    }

    #[test]
    fn test_unknown_field_on_empty_family() {
        let table = MemoryTable::new("WT_shapes.csv", ["Label", "d"]);
        let catalog = CatalogBuilder::new().source(table).build().unwrap();
        let family = catalog.family("WT_shapes").unwrap();

        assert!(family.is_empty());
        assert!(family.filter(&Criteria::new().min("bf", 1.0), None).is_err());
    }

    #[test]
    fn test_empty_bound_is_an_error() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let criteria = Criteria::new().with("d", Bound::default());
        assert_eq!(family.filter(&criteria, None), Err(FieldError::empty_bound("d")));
    }

    #[test]
    fn test_text_values_fail_numeric_bounds() {
        let table = MemoryTable::new("L_shapes", ["Label", "t", "weight"])
            .with_row(vec!["L4X4X1/2".into(), 0.5.into(), 12.8.into()])
            .with_row(vec!["L4X4X3/8".into(), "-".into(), 9.8.into()])
            .with_row(vec!["L4X4X1/4".into(), 0.25.into(), 6.6.into()]);
        let catalog = CatalogBuilder::new().source(table).build().unwrap();
        let family = catalog.family("L_shapes").unwrap();

        let result = family.filter(&Criteria::new().min("t", 0.0), Some("weight")).unwrap();
        assert_eq!(names(&result), vec!["L4X4X1/4", "L4X4X1/2"]);
    }

    #[test]
    fn test_mixed_sort_orders_numbers_before_text() {
        let table = MemoryTable::new("HSS", ["Label", "OD"])
            .with_row(vec!["HSS6X4X1/4".into(), "n/a".into()])
            .with_row(vec!["HSS6.625X0.280".into(), 6.625.into()])
            .with_row(vec!["HSS5X4X1/4".into(), "".into()])
            .with_row(vec!["HSS4.000X0.220".into(), 4.0.into()]);
        let catalog = CatalogBuilder::new().source(table).build().unwrap();
        let family = catalog.family("HSS").unwrap();

        let result = family.filter(&Criteria::new(), Some("OD")).unwrap();
        assert_eq!(
            names(&result),
            vec!["HSS4.000X0.220", "HSS6.625X0.280", "HSS5X4X1/4", "HSS6X4X1/4"]
        );
    }

    #[test]
    fn test_ties_keep_row_order() {
        let mut table = MemoryTable::new("W_shapes", ["Label", "weight"]);
        for name in ["W8X31", "W10X30", "W14X30", "W12X30"] {
            let weight = if name == "W8X31" { 31.0 } else { 30.0 };
            table.push_row(vec![name.into(), Cell::Number(weight)]);
        }
        let catalog = CatalogBuilder::new().source(table).build().unwrap();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.filter(&Criteria::new(), Some("weight")).unwrap();
        assert_eq!(names(&result), vec!["W10X30", "W14X30", "W12X30", "W8X31"]);
    }

    #[test]
    fn test_signed_zero_weights_keep_row_order() {
        let table = MemoryTable::new("PL", ["Label", "weight"])
            .with_row(vec!["A".into(), "0".into()])
            .with_row(vec!["B".into(), "-0.0".into()])
            .with_row(vec!["C".into(), Cell::Number(-1.0)]);
        let catalog = CatalogBuilder::new().source(table).build().unwrap();
        let family = catalog.family("PL").unwrap();

        let result = family.filter(&Criteria::new(), Some("weight")).unwrap();
        assert_eq!(names(&result), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_query_builder() {
        let catalog = w_catalog();
        let family = catalog.family("W_shapes").unwrap();

        let result = family.query().min("d", 11.0).max("d", 14.0).run().unwrap();
        assert_eq!(names(&result), vec!["W14X22", "W12X26"]);

        let result = family.query().min("weight", 20.0).sort_by("Ix").run().unwrap();
        assert_eq!(names(&result), vec!["W10X30", "W14X22", "W12X26"]);

        let result = family.query().unsorted().run().unwrap();
        assert_eq!(names(&result), vec!["W12X26", "W14X22", "W10X30"]);
    }

    #[test]
    fn test_criteria_replace_in_place() {
        let criteria = Criteria::new()
            .min("d", 10.0)
            .range("weight", 20.0, 30.0)
            .max("d", 14.0);

        let order: Vec<&str> = criteria.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["d", "weight"]);
        assert_eq!(criteria.get("d"), Some(&Bound::between(10.0, 14.0)));

        let criteria = criteria.with("d", Bound::at_least(12.0));
        assert_eq!(criteria.get("d"), Some(&Bound::at_least(12.0)));
        assert_eq!(criteria.len(), 2);
    }

    #[test]
    fn test_criteria_from_json_keeps_key_order() {
        let criteria: Criteria =
            serde_json::from_str(r#"{"weight": {"max": 30}, "d": {"min": 11, "max": 14}}"#).unwrap();

        let order: Vec<&str> = criteria.iter().map(|(p, _)| p).collect();
        assert_eq!(order, vec!["weight", "d"]);
        assert_eq!(criteria.get("weight"), Some(&Bound::at_most(30.0)));

        let json = serde_json::to_string(&criteria).unwrap();
        assert_eq!(json, r#"{"weight":{"max":30.0},"d":{"min":11.0,"max":14.0}}"#);
    }

    #[test]
    fn test_bound_admits() {
        let bound = Bound::between(1.0, 2.0);
        assert!(bound.admits(&Value::Number(1.0)));
        assert!(bound.admits(&Value::Number(2.0)));
        assert!(!bound.admits(&Value::Number(2.5)));
        assert!(!bound.admits(&Value::from("1.5")));
        assert!(Bound::at_most(0.0).contains(-3.0));
    }

    fn family_from(rows: &[(f64, f64)]) -> Catalog {
        let mut table = MemoryTable::new("P", ["Label", "d", "weight"]);
        for (i, (d, w)) in rows.iter().enumerate() {
            table.push_row(vec![format!("S{i}").into(), (*d).into(), (*w).into()]);
        }
        CatalogBuilder::new().source(table).build().unwrap()
    }

    proptest! {
        #[test]
        fn prop_filter_partitions_family(
            rows in prop::collection::vec((0.0f64..50.0, 0.0f64..100.0), 0..40),
            lo in 0.0f64..50.0,
            span in 0.0f64..30.0,
        ) {
            let catalog = family_from(&rows);
            let family = catalog.family("P").unwrap();
            let bound = Bound::between(lo, lo + span);
            let criteria = Criteria::new().with("d", bound);

            let result = family.filter(&criteria, Some("weight")).unwrap();
            let kept: Vec<&str> = result.iter().map(|s| s.name()).collect();

            for section in family {
                let d = section.property("d").unwrap();
                prop_assert_eq!(bound.admits(d), kept.contains(&section.name()));
            }
        }

        #[test]
        fn prop_sort_is_stable_and_repeatable(
            rows in prop::collection::vec((0.0f64..5.0, 0u8..4), 0..40),
        ) {
            let rows: Vec<(f64, f64)> = rows.into_iter().map(|(d, w)| (d, w as f64)).collect();
            let catalog = family_from(&rows);
            let family = catalog.family("P").unwrap();

            let first = family.filter(&Criteria::new(), Some("weight")).unwrap();
            let second = family.filter(&Criteria::new(), Some("weight")).unwrap();
            prop_assert_eq!(&first, &second);

            for pair in first.windows(2) {
                let a = pair[0].number("weight").unwrap().unwrap();
                let b = pair[1].number("weight").unwrap().unwrap();
                prop_assert!(a <= b);
                if a == b {
                    let ia: usize = pair[0].name()[1..].parse().unwrap();
                    let ib: usize = pair[1].name()[1..].parse().unwrap();
                    prop_assert!(ia < ib);
                }
            }
        }
    }
}
