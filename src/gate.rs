//! Standard-then-custom check pipeline
//!
//! The gate runs the cheap structural checks first and stops there if any
//! fails. Otherwise it runs the custom checks (primary keys, then row values).

use serde::Serialize;

use crate::check::{CheckDescriptor, CheckResults, Comparator, CustomCheckOptions};
use crate::error::Result;

/// How far a gate run got
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    Passed,
    /// A schema or row count check failed; custom checks were not run
    FailedStandard,
    FailedCustom,
}

impl GateStatus {
    pub fn passed(self) -> bool {
        self == GateStatus::Passed
    }
}

impl std::fmt::Display for GateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateStatus::Passed => write!(f, "passed"),
            GateStatus::FailedStandard => write!(f, "failed (standard checks)"),
            GateStatus::FailedCustom => write!(f, "failed (custom checks)"),
        }
    }
}

/// Everything a gate run produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GateReport {
    pub status: GateStatus,
    pub standard: CheckResults,
    /// `None` when the standard stage failed
    pub custom: Option<CheckResults>,
}

impl GateReport {
    pub fn passed(&self) -> bool {
        self.status.passed()
    }
}

/// One configured gate: which checks to run and on which key
#[derive(Debug, Clone)]
pub struct Gate<'a> {
    descriptors: &'a [CheckDescriptor],
    primary_key: &'a str,
    strict_keys: bool,
}

impl<'a> Gate<'a> {
    pub fn new(descriptors: &'a [CheckDescriptor], primary_key: &'a str) -> Self {
        Self {
            descriptors,
            primary_key,
            strict_keys: false,
        }
    }

    /// Fail the key check on a mismatch in either direction
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    pub fn run(&self, comparator: &Comparator<'_>) -> Result<GateReport> {
        let mut options = CustomCheckOptions::from_descriptors(self.descriptors)?;
        options.keys.strict |= self.strict_keys;

        let standard = comparator.apply_standard_checks(self.descriptors);
        if !standard.all_successful() {
            log::warn!("one or more standard checks failed, aborting");
            return Ok(GateReport {
                status: GateStatus::FailedStandard,
                standard,
                custom: None,
            });
        }

        let custom = comparator.apply_custom_checks(self.primary_key, &options)?;
        let status = if custom.all_successful() {
            log::info!("all checks passed");
            GateStatus::Passed
        } else {
            log::warn!("one or more custom checks failed, aborting");
            GateStatus::FailedCustom
        };

        Ok(GateReport {
            status,
            standard,
            custom: Some(custom),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{default_descriptors, CheckKind};
    use crate::model::{CellValue, Dataset};
    use crate::session::Session;

    fn keyed(ids: &[i64], values: &[i64]) -> Dataset {
        Dataset::from_columns(vec![
            ("id", ids.iter().copied().map(CellValue::Int).collect()),
            ("value", values.iter().copied().map(CellValue::Int).collect()),
        ])
        .unwrap()
    }

    fn run(source: &Dataset, target: &Dataset) -> GateReport {
        let mut session = Session::new();
        session.initialize();
        let comparator = session.comparator(source, target).unwrap();
        let descriptors = default_descriptors();
        Gate::new(&descriptors, "id").run(&comparator).unwrap()
    }

    #[test]
    fn test_duplicate_keys_stop_before_row_values() {
        let source = keyed(&[1, 1, 3], &[100, 200, 301]);
        let target = keyed(&[1, 2, 3], &[100, 250, 300]);

        let report = run(&source, &target);

        assert_eq!(report.status, GateStatus::FailedCustom);
        assert!(report.standard.all_successful());
        assert_eq!(report.standard.len(), 2);
        let custom = report.custom.unwrap();
        assert!(!custom.get_kind(CheckKind::PrimaryKey).unwrap().success());
        assert!(custom.get_kind(CheckKind::RowValues).is_none());
    }

    #[test]
    fn test_structural_failure_skips_custom_checks() {
        let source = keyed(&[1, 2, 3], &[1, 2, 3]);
        let target = keyed(&[1, 2], &[1, 2]);

        let report = run(&source, &target);
        assert_eq!(report.status, GateStatus::FailedStandard);
        assert!(report.custom.is_none());
        assert!(!report.passed());
    }

    #[test]
    fn test_matching_datasets_pass() {
        let source = keyed(&[1, 2, 3], &[1, 2, 3]);
        let target = keyed(&[3, 2, 1], &[3, 2, 1]);

        let report = run(&source, &target);
        assert!(report.passed());
        assert_eq!(report.custom.unwrap().len(), 2);
    }

    #[test]
    fn test_strict_keys_flag_overrides_descriptors() {
        let source = keyed(&[1, 2, 3], &[1, 2, 3]);
        let target = keyed(&[1, 2, 2], &[1, 2, 2]);
        let mut session = Session::new();
        session.initialize();
        let comparator = session.comparator(&source, &target).unwrap();
        let descriptors = vec![CheckDescriptor::for_kind(CheckKind::PrimaryKey)
            .with_kwarg("check_duplicates", false)];

        let lenient = Gate::new(&descriptors, "id").run(&comparator).unwrap();
        assert_eq!(lenient.status, GateStatus::Passed);

        let strict = Gate::new(&descriptors, "id")
            .with_strict_keys(true)
            .run(&comparator)
            .unwrap();
        assert_eq!(strict.status, GateStatus::FailedCustom);
    }
}
