//! Scalar cell values

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single scalar stored in a dataset cell
///
/// Equality is strict per variant: an `Int` never equals a `Float`, even when
/// both hold the same number. `Float` values compare by `==`, except that two
/// NaNs are considered equal so that `CellValue` can serve as a map key.
/// Value comparison between datasets goes through `CellComparator`, which
/// treats missing cells differently.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(Cow<'static, str>),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CellValue::Null, CellValue::Null) => true,
            (CellValue::Bool(a), CellValue::Bool(b)) => a == b,
            (CellValue::Int(a), CellValue::Int(b)) => a == b,
            (CellValue::Float(a), CellValue::Float(b)) => (a.is_nan() && b.is_nan()) || a == b,
            (CellValue::String(a), CellValue::String(b)) => a == b,
            (CellValue::Date(a), CellValue::Date(b)) => a == b,
            (CellValue::DateTime(a), CellValue::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for CellValue {}

impl Hash for CellValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            CellValue::Null => {}
            CellValue::Bool(b) => b.hash(state),
            CellValue::Int(i) => i.hash(state),
            // NaN payloads differ but compare equal, and 0.0 == -0.0
            CellValue::Float(f) if f.is_nan() => f64::NAN.to_bits().hash(state),
            CellValue::Float(f) if *f == 0.0 => 0u64.hash(state),
            CellValue::Float(f) => f.to_bits().hash(state),
            CellValue::String(s) => s.hash(state),
            CellValue::Date(d) => d.hash(state),
            CellValue::DateTime(dt) => dt.hash(state),
        }
    }
}

impl CellValue {
    /// `Null` or a NaN float
    pub fn is_missing(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Float(f) => f.is_nan(),
            _ => false,
        }
    }

    /// Render the value for human-facing output
    pub fn display(&self) -> Cow<'_, str> {
        match self {
            CellValue::Null => Cow::Borrowed("NULL"),
            CellValue::Bool(b) => Cow::Owned(b.to_string()),
            CellValue::Int(i) => Cow::Owned(i.to_string()),
            CellValue::Float(f) => Cow::Owned(f.to_string()),
            CellValue::String(s) => Cow::Borrowed(s.as_ref()),
            CellValue::Date(d) => Cow::Owned(d.to_string()),
            CellValue::DateTime(dt) => Cow::Owned(dt.to_string()),
        }
    }

    /// Float equality within an absolute tolerance; other variants fall back to `==`
    pub fn equals_within(&self, other: &Self, tolerance: f64) -> bool {
        match (self, other) {
            (CellValue::Float(a), CellValue::Float(b)) if a.is_finite() && b.is_finite() => {
                (a - b).abs() <= tolerance
            }
            _ => self == other,
        }
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(Cow::Owned(s.to_string()))
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(Cow::Owned(s))
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Int(i)
    }
}

impl From<i32> for CellValue {
    fn from(i: i32) -> Self {
        CellValue::Int(i64::from(i))
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d)
    }
}

impl<T> From<Option<T>> for CellValue
where
    T: Into<CellValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => CellValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_no_cross_type_equality() {
        assert_ne!(CellValue::Int(1), CellValue::Float(1.0));
        assert_ne!(CellValue::from("1"), CellValue::Int(1));
        assert_eq!(CellValue::Null, CellValue::Null);
    }

    #[test]
    fn test_nan_usable_as_key() {
        let mut keys = FxHashSet::default();
        keys.insert(CellValue::Float(f64::NAN));
        assert!(keys.contains(&CellValue::Float(f64::NAN)));
        keys.insert(CellValue::Float(0.0));
        assert!(keys.contains(&CellValue::Float(-0.0)));
    }

    #[test]
    fn test_equals_within() {
        assert!(CellValue::Float(1.0).equals_within(&CellValue::Float(1.005), 0.01));
        assert!(!CellValue::Float(1.0).equals_within(&CellValue::Float(1.02), 0.01));
        assert!(!CellValue::Int(1).equals_within(&CellValue::Int(2), 10.0));
    }

    #[test]
    fn test_serializes_as_plain_json() {
        let values = vec![
            CellValue::Int(200),
            CellValue::Float(2.5),
            CellValue::from("abc"),
            CellValue::Null,
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[200,2.5,"abc",null]"#);
    }
}
