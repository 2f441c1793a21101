//! Running requested checks
//!
//! Standard checks are looked up through an explicit kind-to-handler table.
//! Custom checks always run in dependency order: row values are only
//! compared once the primary key check has passed.

use super::cell::CellComparator;
use super::descriptor::{CheckCategory, CheckDescriptor};
use super::primary_key::{check_primary_keys_with, KeyCheckOptions};
use super::row_values::check_row_values_with;
use super::{check_column_list, check_row_count_equals, CheckKind, CheckResult, CheckResults};
use crate::error::Result;
use crate::model::Dataset;

type StandardHandler = fn(&Dataset, &Dataset, &CheckDescriptor) -> Result<CheckResult>;

fn standard_handler(kind: CheckKind) -> Option<StandardHandler> {
    match kind {
        CheckKind::Schema => Some(run_schema_check),
        CheckKind::RowCount => Some(run_row_count_check),
        CheckKind::PrimaryKey | CheckKind::RowValues => None,
    }
}

fn run_schema_check(
    source: &Dataset,
    target: &Dataset,
    descriptor: &CheckDescriptor,
) -> Result<CheckResult> {
    let expected = descriptor
        .param::<Vec<String>>("column_list")?
        .resolve(|| target.columns.iter().map(|c| c.name.clone()).collect());
    Ok(check_column_list(source, target, &expected))
}

fn run_row_count_check(
    source: &Dataset,
    target: &Dataset,
    descriptor: &CheckDescriptor,
) -> Result<CheckResult> {
    let expected = descriptor
        .param::<usize>("value")?
        .resolve(|| target.row_count());
    Ok(check_row_count_equals(source, target, expected))
}

/// Run the standard checks named in `descriptors` against the source.
///
/// Custom descriptors are skipped silently. Unknown names and descriptors
/// with malformed parameters are logged and skipped; neither stops the run.
pub fn apply_standard_checks(
    source: &Dataset,
    target: &Dataset,
    descriptors: &[CheckDescriptor],
) -> CheckResults {
    let mut results = CheckResults::new();

    for descriptor in descriptors {
        if descriptor.category() == CheckCategory::Custom {
            continue;
        }

        let Some((kind, handler)) = descriptor
            .kind()
            .and_then(|kind| standard_handler(kind).map(|handler| (kind, handler)))
        else {
            log::warn!("check {} is not supported, skipping", descriptor.name());
            continue;
        };

        match handler(source, target, descriptor) {
            Ok(result) => results.insert(kind.name(), result),
            Err(e) => log::warn!("{}, skipping", e),
        }
    }

    results
}

/// Settings for the custom checks
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CustomCheckOptions {
    pub keys: KeyCheckOptions,
    pub cells: CellComparator,
}

impl CustomCheckOptions {
    /// Read options from the custom descriptors in a check list.
    ///
    /// Recognised keyword arguments: `check_duplicates` and `strict` on the
    /// primary key check, `threshold` and `missing_equal` on the row value
    /// check.
    pub fn from_descriptors(descriptors: &[CheckDescriptor]) -> Result<Self> {
        let mut options = Self::default();

        for descriptor in descriptors {
            match descriptor.kind() {
                Some(CheckKind::PrimaryKey) => {
                    if let Some(check) = descriptor.kwarg::<bool>("check_duplicates")? {
                        options.keys.check_duplicates = check;
                    }
                    if let Some(strict) = descriptor.kwarg::<bool>("strict")? {
                        options.keys.strict = strict;
                    }
                }
                Some(CheckKind::RowValues) => {
                    if let Some(threshold) = descriptor.kwarg::<f64>("threshold")? {
                        if !threshold.is_finite() || threshold < 0.0 {
                            return Err(descriptor.invalid(
                                "threshold",
                                format!("expected a non-negative number, got {threshold}"),
                            ));
                        }
                        options.cells = options.cells.with_tolerance(threshold);
                    }
                    if let Some(missing_equal) = descriptor.kwarg::<bool>("missing_equal")? {
                        options.cells = options.cells.with_missing_equal(missing_equal);
                    }
                }
                _ => {}
            }
        }

        Ok(options)
    }
}

/// Check primary keys, then row values if the keys are consistent.
///
/// The row value result is absent from the returned map when the key check
/// failed, since alignment by key would be ambiguous.
pub fn apply_custom_checks(
    source: &Dataset,
    target: &Dataset,
    primary_key: &str,
    options: &CustomCheckOptions,
) -> Result<CheckResults> {
    let mut results = CheckResults::new();

    let keys = check_primary_keys_with(source, target, primary_key, options.keys)?;
    let keys_ok = keys.success();
    results.insert(CheckKind::PrimaryKey.name(), keys);

    if !keys_ok {
        log::info!("skipping {}: primary keys do not match", CheckKind::RowValues);
        return Ok(results);
    }

    let values = check_row_values_with(source, target, primary_key, &options.cells)?;
    results.insert(CheckKind::RowValues.name(), values);

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{default_descriptors, DetailedErrors, RowCountMismatch};
    use crate::model::CellValue;

    fn keyed(ids: &[i64], values: &[i64]) -> Dataset {
        Dataset::from_columns(vec![
            ("id", ids.iter().copied().map(CellValue::Int).collect()),
            ("value", values.iter().copied().map(CellValue::Int).collect()),
        ])
        .unwrap()
    }

    #[test]
    fn test_standard_checks_with_sentinels() {
        let source = keyed(&[1, 2, 3], &[100, 200, 300]);
        let target = keyed(&[1, 2], &[100, 250]);

        let results = apply_standard_checks(&source, &target, &default_descriptors());

        assert_eq!(results.len(), 2);
        assert!(results.get_kind(CheckKind::Schema).unwrap().success());
        let row_count = results.get_kind(CheckKind::RowCount).unwrap();
        assert_eq!(
            row_count.detailed_errors(),
            Some(&DetailedErrors::RowCount(RowCountMismatch {
                source_data_row_count: 3,
                target_data_row_count: 2,
            }))
        );
    }

    #[test]
    fn test_missing_kwargs_derive_from_target() {
        let source = keyed(&[1, 2, 3], &[100, 200, 300]);
        let target = keyed(&[1, 2, 3], &[100, 250, 300]);
        let descriptors = vec![
            CheckDescriptor::for_kind(CheckKind::Schema),
            CheckDescriptor::for_kind(CheckKind::RowCount),
        ];

        let results = apply_standard_checks(&source, &target, &descriptors);
        assert_eq!(results.len(), 2);
        assert!(results.all_successful());
    }

    #[test]
    fn test_literal_parameters_are_checked_against_source() {
        let source = keyed(&[1, 2, 3], &[0; 3]);
        let target = keyed(&[1, 2, 3], &[0; 3]);
        let descriptors = vec![
            CheckDescriptor::for_kind(CheckKind::RowCount).with_kwarg("value", 4),
            CheckDescriptor::for_kind(CheckKind::Schema)
                .with_kwarg("column_list", serde_json::json!(["id", "value"])),
        ];

        let results = apply_standard_checks(&source, &target, &descriptors);
        assert!(!results.get_kind(CheckKind::RowCount).unwrap().success());
        assert!(results.get_kind(CheckKind::Schema).unwrap().success());
    }

    #[test]
    fn test_unknown_and_custom_descriptors_are_skipped() {
        let source = keyed(&[1], &[0]);
        let descriptors = vec![
            CheckDescriptor::new("expect_column_values_to_be_unique"),
            CheckDescriptor::for_kind(CheckKind::PrimaryKey),
            CheckDescriptor::new("custom_expect_something_else"),
            CheckDescriptor::for_kind(CheckKind::RowCount).with_kwarg("value", "lots"),
        ];

        let results = apply_standard_checks(&source, &source, &descriptors);
        assert!(results.is_empty());
        assert!(results.all_successful());
    }

    #[test]
    fn test_custom_checks_skip_row_values_on_key_failure() {
        let source = keyed(&[1, 1, 3], &[100, 200, 301]);
        let target = keyed(&[1, 2, 3], &[100, 250, 300]);

        let results =
            apply_custom_checks(&source, &target, "id", &CustomCheckOptions::default()).unwrap();

        assert_eq!(results.len(), 1);
        assert!(!results.get_kind(CheckKind::PrimaryKey).unwrap().success());
        assert!(!results.contains(CheckKind::RowValues.name()));
    }

    #[test]
    fn test_custom_checks_compare_values_after_keys_pass() {
        let source = keyed(&[1, 2, 3], &[100, 200, 300]);
        let target = keyed(&[1, 2, 3], &[100, 250, 300]);

        let results =
            apply_custom_checks(&source, &target, "id", &CustomCheckOptions::default()).unwrap();

        let names: Vec<_> = results.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![CheckKind::PrimaryKey.name(), CheckKind::RowValues.name()]
        );
        assert!(results.get_kind(CheckKind::PrimaryKey).unwrap().success());
        assert!(!results.get_kind(CheckKind::RowValues).unwrap().success());
        assert!(!results.all_successful());
    }

    #[test]
    fn test_options_from_descriptors() {
        let descriptors = vec![
            CheckDescriptor::for_kind(CheckKind::PrimaryKey)
                .with_kwarg("check_duplicates", false)
                .with_kwarg("strict", true),
            CheckDescriptor::for_kind(CheckKind::RowValues)
                .with_kwarg("threshold", 0.5)
                .with_kwarg("missing_equal", true),
        ];

        let options = CustomCheckOptions::from_descriptors(&descriptors).unwrap();
        assert!(!options.keys.check_duplicates);
        assert!(options.keys.strict);
        assert_eq!(options.cells.tolerance(), Some(0.5));
        assert!(options.cells.missing_equal());

        let defaults = CustomCheckOptions::from_descriptors(&default_descriptors()).unwrap();
        assert_eq!(defaults, CustomCheckOptions::default());
    }

    #[test]
    fn test_negative_threshold_is_rejected() {
        let descriptors =
            vec![CheckDescriptor::for_kind(CheckKind::RowValues).with_kwarg("threshold", -1.0)];
        assert!(CustomCheckOptions::from_descriptors(&descriptors).is_err());
    }
}
