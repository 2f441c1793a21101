//! Source/target pair handed out by a `Session`

use super::descriptor::CheckDescriptor;
use super::dispatch::{apply_custom_checks, apply_standard_checks, CustomCheckOptions};
use super::{check_primary_keys, check_row_count, check_row_values, check_schema};
use super::{CheckResult, CheckResults};
use crate::error::Result;
use crate::model::Dataset;

/// Borrowed source and target datasets plus every check that can run on them
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    source: &'a Dataset,
    target: &'a Dataset,
}

impl<'a> Comparator<'a> {
    pub(crate) fn new(source: &'a Dataset, target: &'a Dataset) -> Self {
        Self { source, target }
    }

    pub fn source(&self) -> &'a Dataset {
        self.source
    }

    pub fn target(&self) -> &'a Dataset {
        self.target
    }

    pub fn check_schema(&self) -> CheckResult {
        check_schema(self.source, self.target)
    }

    pub fn check_row_count(&self) -> CheckResult {
        check_row_count(self.source, self.target)
    }

    pub fn check_primary_keys(&self, primary_key: &str) -> Result<CheckResult> {
        check_primary_keys(self.source, self.target, primary_key)
    }

    pub fn check_row_values(&self, primary_key: &str) -> Result<CheckResult> {
        check_row_values(self.source, self.target, primary_key)
    }

    pub fn apply_standard_checks(&self, descriptors: &[CheckDescriptor]) -> CheckResults {
        apply_standard_checks(self.source, self.target, descriptors)
    }

    pub fn apply_custom_checks(
        &self,
        primary_key: &str,
        options: &CustomCheckOptions,
    ) -> Result<CheckResults> {
        apply_custom_checks(self.source, self.target, primary_key, options)
    }
}
