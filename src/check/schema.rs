//! Column list comparison

use serde::Serialize;

use super::{log_outcome, CheckKind, CheckResult, DetailedErrors};
use crate::model::Dataset;

/// Columns present on one side only
///
/// Both lists are empty when the column sets agree but their order does not;
/// reordering is not reported separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    /// Source columns absent from the target, in source order
    pub missing_in_target_data: Vec<String>,
    /// Target columns absent from the source, in target order
    pub missing_in_source_data: Vec<String>,
}

impl SchemaMismatch {
    fn between(source: &Dataset, target: &Dataset) -> Self {
        Self {
            missing_in_target_data: only_in(source, target),
            missing_in_source_data: only_in(target, source),
        }
    }
}

fn only_in(this: &Dataset, other: &Dataset) -> Vec<String> {
    this.columns
        .iter()
        .filter(|c| !other.has_column(&c.name))
        .map(|c| c.name.clone())
        .collect()
}

/// Source and target must have identical column lists, order included
pub fn check_schema(source: &Dataset, target: &Dataset) -> CheckResult {
    let expected: Vec<&str> = target.column_names();
    check_column_list(source, target, &expected)
}

/// The source's columns must equal `expected`, order included.
///
/// On failure the payload describes how source and target differ, whatever
/// list was expected.
pub fn check_column_list<S: AsRef<str>>(
    source: &Dataset,
    target: &Dataset,
    expected: &[S],
) -> CheckResult {
    let matches = source.column_count() == expected.len()
        && source
            .columns
            .iter()
            .zip(expected)
            .all(|(column, name)| column.name == name.as_ref());

    let result = if matches {
        CheckResult::passed()
    } else {
        CheckResult::failed(DetailedErrors::Schema(SchemaMismatch::between(
            source, target,
        )))
    };
    log_outcome(CheckKind::Schema, &result);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(result: &CheckResult) -> &SchemaMismatch {
        match result.detailed_errors() {
            Some(DetailedErrors::Schema(m)) => m,
            other => panic!("expected schema mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_identical_columns_pass() {
        let source = Dataset::new(["id", "value"]).unwrap();
        let target = Dataset::new(["id", "value"]).unwrap();

        let result = check_schema(&source, &target);
        assert!(result.success());
        assert!(result.detailed_errors().is_none());
    }

    #[test]
    fn test_reports_symmetric_difference() {
        let source = Dataset::new(["id", "value", "dude"]).unwrap();
        let target = Dataset::new(["id", "extra", "value"]).unwrap();

        let result = check_schema(&source, &target);
        assert!(!result.success());
        let m = mismatch(&result);
        assert_eq!(m.missing_in_target_data, vec!["dude"]);
        assert_eq!(m.missing_in_source_data, vec!["extra"]);
    }

    #[test]
    fn test_reordering_fails_with_empty_lists() {
        let source = Dataset::new(["id", "value"]).unwrap();
        let target = Dataset::new(["value", "id"]).unwrap();

        let result = check_schema(&source, &target);
        assert!(!result.success());
        let m = mismatch(&result);
        assert!(m.missing_in_target_data.is_empty());
        assert!(m.missing_in_source_data.is_empty());
    }

    #[test]
    fn test_explicit_column_list() {
        let source = Dataset::new(["id", "value"]).unwrap();
        let target = Dataset::new(["id", "value", "extra"]).unwrap();

        assert!(check_column_list(&source, &target, &["id", "value"]).success());

        let result = check_column_list(&source, &target, &["id"]);
        assert!(!result.success());
        assert_eq!(mismatch(&result).missing_in_source_data, vec!["extra"]);
    }
}
