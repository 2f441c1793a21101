//! HTML report output

use std::io::Write;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;
use tera::{Context, Tera};

use crate::check::{CheckResults, DetailedErrors};
use crate::gate::{GateReport, GateStatus};

use super::OutputFormatter;

/// HTML report output
pub struct HtmlOutput;

impl HtmlOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    source_file: String,
    target_file: String,
    status: GateStatus,
    status_text: String,
    passed: bool,
    custom_ran: bool,
    checks: Vec<CheckView<'a>>,
}

#[derive(Serialize)]
struct CheckView<'a> {
    stage: &'static str,
    name: &'a str,
    success: bool,
    details: Option<&'a DetailedErrors>,
}

fn check_views<'a>(stage: &'static str, results: &'a CheckResults) -> Vec<CheckView<'a>> {
    results
        .iter()
        .map(|(name, result)| CheckView {
            stage,
            name,
            success: result.success(),
            details: result.detailed_errors(),
        })
        .collect()
}

impl OutputFormatter for HtmlOutput {
    fn render(
        &self,
        report: &GateReport,
        source_path: &Path,
        target_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let mut checks = check_views("standard", &report.standard);
        if let Some(custom) = &report.custom {
            checks.extend(check_views("custom", custom));
        }

        let view = ReportView {
            source_file: source_path.display().to_string(),
            target_file: target_path.display().to_string(),
            status: report.status,
            status_text: report.status.to_string(),
            passed: report.passed(),
            custom_ran: report.custom.is_some(),
            checks,
        };

        let context = Context::from_serialize(&view).context("Failed to build report context")?;
        let html = Tera::one_off(TEMPLATE, &context, true).context("Failed to render HTML report")?;
        writer.write_all(html.as_bytes())?;
        Ok(())
    }
}

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>datagate: {{ source_file }} → {{ target_file }}</title>
  <style>
    :root {
      --bg: #1a1b26;
      --fg: #a9b1d6;
      --accent: #7aa2f7;
      --green: #9ece6a;
      --red: #f7768e;
      --border: #414868;
    }
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: 'JetBrains Mono', 'Fira Code', monospace;
      background: var(--bg);
      color: var(--fg);
      padding: 2rem;
      line-height: 1.6;
    }
    .header { border-bottom: 2px solid var(--border); padding-bottom: 1rem; margin-bottom: 2rem; }
    .header h1 { color: var(--accent); font-size: 2rem; font-weight: 600; }
    .status { font-size: 1.25rem; font-weight: 600; margin-bottom: 2rem; }
    .pass { color: var(--green); }
    .fail { color: var(--red); }
    table { width: 100%; border-collapse: collapse; margin-bottom: 2rem; }
    th, td { text-align: left; padding: 0.75rem; border: 1px solid var(--border); vertical-align: top; }
    th { background: rgba(255,255,255,0.05); font-weight: 600; }
    pre { white-space: pre-wrap; font-size: 0.875rem; }
    .note { opacity: 0.7; }
  </style>
</head>
<body>
  <div class="header">
    <h1>datagate</h1>
    <p class="files">{{ source_file }} → {{ target_file }}</p>
  </div>
  <p class="status {% if passed %}pass{% else %}fail{% endif %}">{% if passed %}PASS{% else %}FAIL{% endif %}: {{ status_text }}</p>
  <table>
    <tr><th>Stage</th><th>Check</th><th>Result</th><th>Details</th></tr>
    {%- for check in checks %}
    <tr>
      <td>{{ check.stage }}</td>
      <td>{{ check.name }}</td>
      <td class="{% if check.success %}pass{% else %}fail{% endif %}">{% if check.success %}pass{% else %}fail{% endif %}</td>
      <td>{% if check.details %}<pre>{{ check.details | json_encode(pretty=true) }}</pre>{% endif %}</td>
    </tr>
    {%- endfor %}
  </table>
  {%- if not custom_ran %}
  <p class="note">Custom checks were not run because a standard check failed.</p>
  {%- endif %}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::{CheckKind, CheckResult, SchemaMismatch};

    #[test]
    fn test_renders_escaped_failure_details() {
        let mut standard = CheckResults::new();
        standard.insert(
            CheckKind::Schema.name(),
            CheckResult::failed(DetailedErrors::Schema(SchemaMismatch {
                missing_in_target_data: vec!["<b>".to_string()],
                missing_in_source_data: vec![],
            })),
        );
        let report = GateReport {
            status: GateStatus::FailedStandard,
            standard,
            custom: None,
        };

        let mut buf = Vec::new();
        HtmlOutput::new()
            .render(&report, Path::new("a.csv"), Path::new("b.csv"), &mut buf)
            .unwrap();
        let html = String::from_utf8(buf).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("expect_table_columns_to_match_ordered_list"));
        assert!(html.contains("missing_in_target_data"));
        assert!(html.contains("&lt;b&gt;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("Custom checks were not run"));
    }
}
