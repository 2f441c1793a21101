//! Dataset comparison checks
//!
//! Four checks compare a source dataset against a target dataset:
//!
//! - [`check_schema`]: same columns in the same order
//! - [`check_row_count`]: same number of rows
//! - [`check_primary_keys`]: key column is unique and covers the same keys
//! - [`check_row_values`]: cell values agree once rows are aligned by key
//!
//! The first two are "standard" checks and can be driven from a list of
//! [`CheckDescriptor`]s via [`apply_standard_checks`]. The last two are
//! "custom" checks run by [`apply_custom_checks`], which skips the row-value
//! comparison when the key check fails.

pub mod cell;
mod comparator;
mod descriptor;
mod dispatch;
mod primary_key;
mod result;
mod row_count;
mod row_values;
mod schema;

pub use cell::CellComparator;
pub use comparator::Comparator;
pub use descriptor::{default_descriptors, CheckCategory, CheckDescriptor, Param, DERIVE_FROM_TARGET};
pub use dispatch::{apply_custom_checks, apply_standard_checks, CustomCheckOptions};
pub use primary_key::{check_primary_keys, check_primary_keys_with, DuplicateKeys, KeyCheckOptions, MissingKeys};
pub use result::{all_successful, CheckResult, CheckResults, DetailedErrors};
pub use row_count::{check_row_count, check_row_count_equals, RowCountMismatch};
pub use row_values::{check_row_values, check_row_values_with, ColumnMismatch};
pub use schema::{check_column_list, check_schema, SchemaMismatch};

/// The built-in checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckKind {
    Schema,
    RowCount,
    PrimaryKey,
    RowValues,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Schema,
        CheckKind::RowCount,
        CheckKind::PrimaryKey,
        CheckKind::RowValues,
    ];

    /// Name used in check configuration and in result maps
    pub fn name(self) -> &'static str {
        match self {
            CheckKind::Schema => "expect_table_columns_to_match_ordered_list",
            CheckKind::RowCount => "expect_table_row_count_to_equal",
            CheckKind::PrimaryKey => "custom_expect_primary_keys_to_match",
            CheckKind::RowValues => "custom_expect_row_values_to_match",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn category(self) -> CheckCategory {
        match self {
            CheckKind::Schema | CheckKind::RowCount => CheckCategory::Standard,
            CheckKind::PrimaryKey | CheckKind::RowValues => CheckCategory::Custom,
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Emit the one log line every check outcome gets
pub(crate) fn log_outcome(kind: CheckKind, result: &CheckResult) {
    match result.detailed_errors() {
        None => log::info!("check={} success=true", kind),
        Some(errors) => log::warn!(
            "check={} success=false detailed_errors={}",
            kind,
            serde_json::to_string(errors).unwrap_or_else(|_| format!("{errors:?}"))
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in CheckKind::ALL {
            assert_eq!(CheckKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(CheckKind::from_name("expect_column_to_exist"), None);
    }

    #[test]
    fn test_custom_kinds_use_custom_prefix() {
        for kind in CheckKind::ALL {
            let prefixed = kind.name().starts_with("custom_");
            assert_eq!(prefixed, kind.category() == CheckCategory::Custom);
        }
    }
}
