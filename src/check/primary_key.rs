//! Primary key consistency

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use super::{log_outcome, CheckKind, CheckResult, DetailedErrors};
use crate::error::{Error, Result, Side};
use crate::model::{CellValue, Dataset};

/// Every row whose key occurs more than once, in row order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DuplicateKeys {
    pub duplicate_keys_in_source: Vec<CellValue>,
    pub duplicate_keys_in_target: Vec<CellValue>,
}

/// Keys found on one side only
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingKeys {
    /// Source keys absent from the target, in source row order
    pub missing_in_target: Vec<CellValue>,
    /// Target keys absent from the source, in target row order
    pub missing_in_source: Vec<CellValue>,
}

/// Tuning for [`check_primary_keys_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCheckOptions {
    /// Fail on repeated keys before comparing key sets
    pub check_duplicates: bool,
    /// Fail when keys are missing on either side. When false, a mismatch is
    /// only reported if keys are missing on both sides at once.
    pub strict: bool,
}

impl Default for KeyCheckOptions {
    fn default() -> Self {
        Self {
            check_duplicates: true,
            strict: false,
        }
    }
}

/// Position of the key column, or the boundary error naming the side lacking it
pub(crate) fn key_column(dataset: &Dataset, primary_key: &str, side: Side) -> Result<usize> {
    dataset
        .column_index(primary_key)
        .ok_or_else(|| Error::MissingPrimaryKey {
            column: primary_key.to_string(),
            side,
        })
}

/// Check that `primary_key` can align source and target rows
pub fn check_primary_keys(
    source: &Dataset,
    target: &Dataset,
    primary_key: &str,
) -> Result<CheckResult> {
    check_primary_keys_with(source, target, primary_key, KeyCheckOptions::default())
}

pub fn check_primary_keys_with(
    source: &Dataset,
    target: &Dataset,
    primary_key: &str,
    options: KeyCheckOptions,
) -> Result<CheckResult> {
    let source_key = key_column(source, primary_key, Side::Source)?;
    let target_key = key_column(target, primary_key, Side::Target)?;

    let result = compare_keys(source, source_key, target, target_key, options);
    log_outcome(CheckKind::PrimaryKey, &result);
    Ok(result)
}

fn compare_keys(
    source: &Dataset,
    source_key: usize,
    target: &Dataset,
    target_key: usize,
    options: KeyCheckOptions,
) -> CheckResult {
    if options.check_duplicates {
        let duplicates = DuplicateKeys {
            duplicate_keys_in_source: duplicate_keys(source, source_key),
            duplicate_keys_in_target: duplicate_keys(target, target_key),
        };
        // Key-set comparison would be ambiguous past this point
        if !duplicates.duplicate_keys_in_source.is_empty()
            || !duplicates.duplicate_keys_in_target.is_empty()
        {
            return CheckResult::failed(DetailedErrors::DuplicateKeys(duplicates));
        }
    }

    let missing = MissingKeys {
        missing_in_target: keys_missing_from(source, source_key, target, target_key),
        missing_in_source: keys_missing_from(target, target_key, source, source_key),
    };

    let mismatched = if options.strict {
        !missing.missing_in_target.is_empty() || !missing.missing_in_source.is_empty()
    } else {
        !missing.missing_in_target.is_empty() && !missing.missing_in_source.is_empty()
    };

    if mismatched {
        CheckResult::failed(DetailedErrors::MissingKeys(missing))
    } else {
        if !missing.missing_in_target.is_empty() || !missing.missing_in_source.is_empty() {
            log::debug!(
                "one-directional key mismatch not reported: {} missing in target, {} missing in source",
                missing.missing_in_target.len(),
                missing.missing_in_source.len()
            );
        }
        CheckResult::passed()
    }
}

fn duplicate_keys(dataset: &Dataset, key: usize) -> Vec<CellValue> {
    let mut counts: FxHashMap<&CellValue, usize> = FxHashMap::default();
    for value in dataset.column_values(key) {
        *counts.entry(value).or_default() += 1;
    }

    dataset
        .column_values(key)
        .filter(|value| counts[value] > 1)
        .cloned()
        .collect()
}

/// Distinct keys of `this` that `other` lacks, in first-seen order
fn keys_missing_from(
    this: &Dataset,
    this_key: usize,
    other: &Dataset,
    other_key: usize,
) -> Vec<CellValue> {
    let present: FxHashSet<&CellValue> = other.column_values(other_key).collect();
    let mut seen: FxHashSet<&CellValue> = FxHashSet::default();

    this.column_values(this_key)
        .filter(|value| !present.contains(value) && seen.insert(*value))
        .cloned()
        .collect()
}
