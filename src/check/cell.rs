//! Cell-level comparison

use crate::model::CellValue;

/// Decides whether two aligned cells hold the same value
///
/// The default comparator is exact. A tolerance only relaxes `Float`/`Float`
/// comparisons; nothing is ever coerced across types. Missing cells (`Null`
/// or NaN) never equal anything, themselves included, unless
/// `with_missing_equal` is set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CellComparator {
    tolerance: Option<f64>,
    missing_equal: bool,
}

impl CellComparator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept floats whose absolute difference is at most `tolerance`.
    /// A zero tolerance keeps the comparator exact.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = (tolerance > 0.0).then_some(tolerance);
        self
    }

    /// Treat two missing cells as equal
    pub fn with_missing_equal(mut self, missing_equal: bool) -> Self {
        self.missing_equal = missing_equal;
        self
    }

    pub fn tolerance(&self) -> Option<f64> {
        self.tolerance
    }

    pub fn missing_equal(&self) -> bool {
        self.missing_equal
    }

    pub fn equal(&self, a: &CellValue, b: &CellValue) -> bool {
        if a.is_missing() || b.is_missing() {
            return self.missing_equal && a.is_missing() && b.is_missing();
        }
        match self.tolerance {
            Some(tolerance) => a.equals_within(b, tolerance),
            None => a == b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_equality() {
        let comparator = CellComparator::new();

        assert!(comparator.equal(&CellValue::Int(42), &CellValue::Int(42)));
        assert!(!comparator.equal(&CellValue::Int(42), &CellValue::Int(43)));
        assert!(!comparator.equal(&CellValue::Int(1), &CellValue::Float(1.0)));
        assert!(comparator.equal(&CellValue::from("hello"), &CellValue::from("hello")));
        assert!(!comparator.equal(&CellValue::Float(0.1 + 0.2), &CellValue::Float(0.3)));
    }

    #[test]
    fn test_numeric_tolerance() {
        let comparator = CellComparator::new().with_tolerance(0.01);

        assert!(comparator.equal(&CellValue::Float(1.0), &CellValue::Float(1.005)));
        assert!(!comparator.equal(&CellValue::Float(1.0), &CellValue::Float(1.02)));
        assert!(!comparator.equal(&CellValue::Int(1), &CellValue::Float(1.0)));
    }

    #[test]
    fn test_missing_cells_differ_by_default() {
        let comparator = CellComparator::new();

        assert!(!comparator.equal(&CellValue::Null, &CellValue::Null));
        assert!(!comparator.equal(&CellValue::Float(f64::NAN), &CellValue::Float(f64::NAN)));
        assert!(!comparator.equal(&CellValue::Null, &CellValue::Int(0)));
    }

    #[test]
    fn test_missing_equal_matches_missing_pairs_only() {
        let comparator = CellComparator::new().with_missing_equal(true);

        assert!(comparator.equal(&CellValue::Null, &CellValue::Null));
        assert!(comparator.equal(&CellValue::Float(f64::NAN), &CellValue::Float(f64::NAN)));
        assert!(comparator.equal(&CellValue::Null, &CellValue::Float(f64::NAN)));
        assert!(!comparator.equal(&CellValue::Null, &CellValue::from("")));
    }

    #[test]
    fn test_zero_tolerance_is_exact() {
        assert_eq!(CellComparator::new().with_tolerance(0.0).tolerance(), None);
    }
}
