//! JSON output format

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use crate::check::CheckResults;
use crate::gate::{GateReport, GateStatus};

use super::OutputFormatter;

/// Pretty-printed JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source_file: String,
    target_file: String,
    status: GateStatus,
    success: bool,
    standard_checks: &'a CheckResults,
    #[serde(skip_serializing_if = "Option::is_none")]
    custom_checks: Option<&'a CheckResults>,
}

impl OutputFormatter for JsonOutput {
    fn render(
        &self,
        report: &GateReport,
        source_path: &Path,
        target_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let output = JsonReport {
            source_file: source_path.display().to_string(),
            target_file: target_path.display().to_string(),
            status: report.status,
            success: report.passed(),
            standard_checks: &report.standard,
            custom_checks: report.custom.as_ref(),
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckKind, CheckResult};

    #[test]
    fn test_renders_results_by_check_name() {
        let mut standard = CheckResults::new();
        standard.insert(CheckKind::Schema.name(), CheckResult::passed());
        let report = GateReport {
            status: GateStatus::Passed,
            standard,
            custom: Some(CheckResults::new()),
        };

        let mut buf = Vec::new();
        JsonOutput::new()
            .render(&report, Path::new("a.csv"), Path::new("b.csv"), &mut buf)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "passed");
        assert_eq!(value["success"], true);
        assert_eq!(
            value["standard_checks"]["expect_table_columns_to_match_ordered_list"],
            serde_json::json!({ "success": true })
        );
        assert_eq!(value["custom_checks"], serde_json::json!({}));
    }

    #[test]
    fn test_omits_custom_checks_that_never_ran() {
        let report = GateReport {
            status: GateStatus::FailedStandard,
            standard: CheckResults::new(),
            custom: None,
        };

        let mut buf = Vec::new();
        JsonOutput::new()
            .render(&report, Path::new("a.csv"), Path::new("b.csv"), &mut buf)
            .unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["status"], "failed_standard");
        assert!(value.get("custom_checks").is_none());
    }
}
