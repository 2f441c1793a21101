//! Row count comparison

use serde::Serialize;

use super::{log_outcome, CheckKind, CheckResult, DetailedErrors};
use crate::model::Dataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowCountMismatch {
    pub source_data_row_count: usize,
    pub target_data_row_count: usize,
}

/// Source and target must have the same number of rows
pub fn check_row_count(source: &Dataset, target: &Dataset) -> CheckResult {
    check_row_count_equals(source, target, target.row_count())
}

/// The source must have exactly `expected` rows
pub fn check_row_count_equals(source: &Dataset, target: &Dataset, expected: usize) -> CheckResult {
    let result = if source.row_count() == expected {
        CheckResult::passed()
    } else {
        CheckResult::failed(DetailedErrors::RowCount(RowCountMismatch {
            source_data_row_count: source.row_count(),
            target_data_row_count: target.row_count(),
        }))
    };
    log_outcome(CheckKind::RowCount, &result);
    result
}
