//! Check results and their aggregation

use indexmap::IndexMap;
use serde::Serialize;

use super::primary_key::{DuplicateKeys, MissingKeys};
use super::row_count::RowCountMismatch;
use super::row_values::ColumnMismatch;
use super::schema::SchemaMismatch;
use super::CheckKind;

/// Check-specific description of a failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DetailedErrors {
    Schema(SchemaMismatch),
    RowCount(RowCountMismatch),
    DuplicateKeys(DuplicateKeys),
    MissingKeys(MissingKeys),
    /// Differing columns keyed by column name, in source column order
    RowValues(IndexMap<String, ColumnMismatch>),
}

/// Outcome of a single check
///
/// `detailed_errors` is present exactly when the check failed; the two
/// constructors are the only way to build a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    detailed_errors: Option<DetailedErrors>,
}

impl CheckResult {
    pub fn passed() -> Self {
        Self {
            success: true,
            detailed_errors: None,
        }
    }

    pub fn failed(errors: DetailedErrors) -> Self {
        Self {
            success: false,
            detailed_errors: Some(errors),
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn detailed_errors(&self) -> Option<&DetailedErrors> {
        self.detailed_errors.as_ref()
    }
}

/// Results of several checks keyed by check name, in execution order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CheckResults(IndexMap<String, CheckResult>);

impl CheckResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a result; a later result for the same name replaces the earlier one
    pub fn insert(&mut self, name: impl Into<String>, result: CheckResult) {
        self.0.insert(name.into(), result);
    }

    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.0.get(name)
    }

    pub fn get_kind(&self, kind: CheckKind) -> Option<&CheckResult> {
        self.get(kind.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CheckResult)> {
        self.0.iter().map(|(name, result)| (name.as_str(), result))
    }

    /// Names of the checks that failed
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, result)| !result.success())
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True when every recorded check succeeded; vacuously true when empty
    pub fn all_successful(&self) -> bool {
        self.0.values().all(CheckResult::success)
    }
}

/// True iff every result in `results` succeeded
pub fn all_successful(results: &CheckResults) -> bool {
    results.all_successful()
}
