//! Row value comparison after aligning rows by primary key

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use serde::Serialize;

use super::cell::CellComparator;
use super::primary_key::key_column;
use super::{log_outcome, CheckKind, CheckResult, DetailedErrors};
use crate::error::{Result, Side};
use crate::model::{CellValue, Dataset};

/// Differences found in one column
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ColumnMismatch {
    /// Keys of the differing rows, in source row order
    pub row_indices: Vec<CellValue>,
    pub source_data_values: Vec<CellValue>,
    pub target_data_values: Vec<CellValue>,
}

impl ColumnMismatch {
    fn push(&mut self, key: &CellValue, source: &CellValue, target: &CellValue) {
        self.row_indices.push(key.clone());
        self.source_data_values.push(source.clone());
        self.target_data_values.push(target.clone());
    }
}

/// Compare every shared column cell by cell, with exact equality.
/// Missing cells (`Null` or NaN) are reported even when both sides are missing.
///
/// Meant to run after [`check_primary_keys`](super::check_primary_keys)
/// succeeded. With duplicate or mismatched keys the result is not
/// meaningful: source rows without a target counterpart are skipped and a
/// repeated target key aligns to its last row.
pub fn check_row_values(
    source: &Dataset,
    target: &Dataset,
    primary_key: &str,
) -> Result<CheckResult> {
    check_row_values_with(source, target, primary_key, &CellComparator::default())
}

pub fn check_row_values_with(
    source: &Dataset,
    target: &Dataset,
    primary_key: &str,
    comparator: &CellComparator,
) -> Result<CheckResult> {
    let source_key = key_column(source, primary_key, Side::Source)?;
    let target_key = key_column(target, primary_key, Side::Target)?;

    let aligned = align_rows(source, source_key, target, target_key);
    let mut mismatches: IndexMap<String, ColumnMismatch> = IndexMap::new();

    for column in &source.columns {
        if column.index == source_key {
            continue;
        }
        let Some(target_column) = target.column_index(&column.name) else {
            log::debug!("column '{}' not in target data, not compared", column.name);
            continue;
        };

        let mut mismatch = ColumnMismatch::default();
        for &(source_row, target_row) in &aligned {
            let a = source.value(source_row, column.index);
            let b = target.value(target_row, target_column);
            if !comparator.equal(a, b) {
                mismatch.push(source.value(source_row, source_key), a, b);
            }
        }

        if !mismatch.row_indices.is_empty() {
            mismatches.insert(column.name.clone(), mismatch);
        }
    }

    let result = if mismatches.is_empty() {
        CheckResult::passed()
    } else {
        CheckResult::failed(DetailedErrors::RowValues(mismatches))
    };
    log_outcome(CheckKind::RowValues, &result);
    Ok(result)
}

/// Pair each source row with the target row carrying the same key,
/// in source row order
fn align_rows(
    source: &Dataset,
    source_key: usize,
    target: &Dataset,
    target_key: usize,
) -> Vec<(usize, usize)> {
    let index: FxHashMap<&CellValue, usize> = target
        .column_values(target_key)
        .enumerate()
        .map(|(row, key)| (key, row))
        .collect();

    source
        .column_values(source_key)
        .enumerate()
        .filter_map(|(row, key)| match index.get(key) {
            Some(&target_row) => Some((row, target_row)),
            None => {
                log::debug!("key {} has no target row, skipped", key);
                None
            }
        })
        .collect()
}
