//! Check descriptors as read from check configuration

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CheckKind;
use crate::error::{Error, Result};

/// Parameter value meaning "take this from the target dataset at run time"
pub const DERIVE_FROM_TARGET: &str = "source";

const CUSTOM_PREFIX: &str = "custom_";

/// Whether a check is run by the standard dispatcher or the custom runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckCategory {
    Standard,
    Custom,
}

/// A parameter that is either given literally or derived from the target
#[derive(Debug, Clone, PartialEq)]
pub enum Param<T> {
    FromTarget,
    Value(T),
}

impl<T> Param<T> {
    /// Substitute the live value for the sentinel
    pub fn resolve(self, derive: impl FnOnce() -> T) -> T {
        match self {
            Param::FromTarget => derive(),
            Param::Value(value) => value,
        }
    }
}

/// One requested check: `{"expectation_type": ..., "kwargs": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDescriptor {
    pub expectation_type: String,
    #[serde(default)]
    pub kwargs: IndexMap<String, Value>,
}

impl CheckDescriptor {
    pub fn new(expectation_type: impl Into<String>) -> Self {
        Self {
            expectation_type: expectation_type.into(),
            kwargs: IndexMap::new(),
        }
    }

    pub fn for_kind(kind: CheckKind) -> Self {
        Self::new(kind.name())
    }

    /// Add a keyword argument
    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.expectation_type
    }

    pub fn category(&self) -> CheckCategory {
        if self.expectation_type.starts_with(CUSTOM_PREFIX) {
            CheckCategory::Custom
        } else {
            CheckCategory::Standard
        }
    }

    /// The built-in check this descriptor names, if any
    pub fn kind(&self) -> Option<CheckKind> {
        CheckKind::from_name(&self.expectation_type)
    }

    /// Read an optional keyword argument
    pub fn kwarg<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        self.kwargs
            .get(name)
            .map(|value| {
                serde_json::from_value(value.clone()).map_err(|e| self.invalid(name, e.to_string()))
            })
            .transpose()
    }

    /// Read a keyword argument that may carry the derive-from-target sentinel.
    ///
    /// A missing argument is treated like the sentinel.
    pub fn param<T: DeserializeOwned>(&self, name: &str) -> Result<Param<T>> {
        match self.kwargs.get(name) {
            None => Ok(Param::FromTarget),
            Some(Value::String(s)) if s == DERIVE_FROM_TARGET => Ok(Param::FromTarget),
            Some(value) => serde_json::from_value(value.clone())
                .map(Param::Value)
                .map_err(|e| self.invalid(name, e.to_string())),
        }
    }

    pub(crate) fn invalid(&self, name: &str, reason: impl Into<String>) -> Error {
        Error::InvalidParameter {
            check: self.expectation_type.clone(),
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// The check list used when no configuration is supplied: all four built-ins,
/// with the standard checks deriving their expectations from the target.
pub fn default_descriptors() -> Vec<CheckDescriptor> {
    vec![
        CheckDescriptor::for_kind(CheckKind::Schema).with_kwarg("column_list", DERIVE_FROM_TARGET),
        CheckDescriptor::for_kind(CheckKind::RowCount).with_kwarg("value", DERIVE_FROM_TARGET),
        CheckDescriptor::for_kind(CheckKind::PrimaryKey).with_kwarg("check_duplicates", true),
        CheckDescriptor::for_kind(CheckKind::RowValues).with_kwarg("threshold", 0.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_config_entry() {
        let descriptor: CheckDescriptor = serde_json::from_str(
            r#"{"expectation_type": "expect_table_row_count_to_equal", "kwargs": {"value": 3}}"#,
        )
        .unwrap();

        assert_eq!(descriptor.kind(), Some(CheckKind::RowCount));
        assert_eq!(descriptor.param::<usize>("value").unwrap(), Param::Value(3));
    }

    #[test]
    fn test_kwargs_default_to_empty() {
        let descriptor: CheckDescriptor =
            serde_json::from_str(r#"{"expectation_type": "expect_table_row_count_to_equal"}"#)
                .unwrap();
        assert!(descriptor.kwargs.is_empty());
        assert_eq!(descriptor.param::<usize>("value").unwrap(), Param::FromTarget);
    }

    #[test]
    fn test_sentinel_resolves_from_target() {
        let descriptor = CheckDescriptor::for_kind(CheckKind::Schema)
            .with_kwarg("column_list", DERIVE_FROM_TARGET);
        let columns = descriptor
            .param::<Vec<String>>("column_list")
            .unwrap()
            .resolve(|| vec!["id".to_string()]);
        assert_eq!(columns, vec!["id"]);
    }

    #[test]
    fn test_wrong_shape_is_invalid_parameter() {
        let descriptor = CheckDescriptor::for_kind(CheckKind::RowCount).with_kwarg("value", "three");
        let err = descriptor.param::<usize>("value").unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { ref name, .. } if name == "value"));
    }

    #[test]
    fn test_category_follows_prefix() {
        assert_eq!(
            CheckDescriptor::new("custom_expect_anything").category(),
            CheckCategory::Custom
        );
        assert_eq!(
            CheckDescriptor::new("expect_column_to_exist").category(),
            CheckCategory::Standard
        );
    }
}
