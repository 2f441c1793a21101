//! Colored terminal output

use std::io::{IsTerminal, Write};
use std::path::Path;

use anyhow::Result;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use termcolor::{Ansi, Color, ColorChoice, ColorSpec, NoColor, WriteColor};

use crate::check::{CheckResults, DetailedErrors};
use crate::gate::GateReport;
use crate::model::CellValue;

use super::OutputFormatter;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Terminal output with colors
pub struct TerminalOutput {
    color_choice: ColorChoice,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Stage")]
    stage: &'static str,
    #[tabled(rename = "Check")]
    check: String,
    #[tabled(rename = "Result")]
    result: &'static str,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    fn use_color(&self) -> bool {
        match self.color_choice {
            ColorChoice::Always | ColorChoice::AlwaysAnsi => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
            }
        }
    }

    fn write_header(&self, writer: &mut dyn Write, source: &Path, target: &Path) -> Result<()> {
        writeln!(writer, "{}", RULE)?;
        writeln!(
            writer,
            " datagate: {} → {}",
            source.display(),
            target.display()
        )?;
        writeln!(writer, "{}", RULE)?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_summary(&self, report: &GateReport, writer: &mut dyn Write) -> Result<()> {
        let mut rows = summary_rows("standard", &report.standard);
        if let Some(custom) = &report.custom {
            rows.extend(summary_rows("custom", custom));
        }
        if rows.is_empty() {
            writeln!(writer, "No checks were run.")?;
            writeln!(writer)?;
            return Ok(());
        }

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        writeln!(writer, "{}", table)?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_failures(&self, results: &CheckResults, writer: &mut dyn Write) -> Result<()> {
        for (name, result) in results.iter() {
            let Some(errors) = result.detailed_errors() else {
                continue;
            };
            writeln!(writer, "{}:", name)?;
            write_detailed_errors(errors, writer)?;
            writeln!(writer)?;
        }
        Ok(())
    }

    fn write_status(&self, report: &GateReport, writer: &mut dyn WriteColor) -> Result<()> {
        let (label, color) = if report.passed() {
            ("PASS", Color::Green)
        } else {
            ("FAIL", Color::Red)
        };

        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "{}", label)?;
        writer.reset()?;
        writeln!(writer, " {}", report.status)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(
        &self,
        report: &GateReport,
        source_path: &Path,
        target_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_header(writer, source_path, target_path)?;
        self.write_summary(report, writer)?;
        self.write_failures(&report.standard, writer)?;
        if let Some(custom) = &report.custom {
            self.write_failures(custom, writer)?;
        }

        if self.use_color() {
            self.write_status(report, &mut Ansi::new(writer))
        } else {
            self.write_status(report, &mut NoColor::new(writer))
        }
    }
}

fn summary_rows(stage: &'static str, results: &CheckResults) -> Vec<SummaryRow> {
    results
        .iter()
        .map(|(name, result)| SummaryRow {
            stage,
            check: name.to_string(),
            result: if result.success() { "pass" } else { "fail" },
        })
        .collect()
}

fn write_detailed_errors(errors: &DetailedErrors, writer: &mut dyn Write) -> Result<()> {
    match errors {
        DetailedErrors::Schema(mismatch) => {
            writeln!(
                writer,
                "  missing in target: {}",
                join_or_none(&mismatch.missing_in_target_data)
            )?;
            writeln!(
                writer,
                "  missing in source: {}",
                join_or_none(&mismatch.missing_in_source_data)
            )?;
        }
        DetailedErrors::RowCount(mismatch) => {
            writeln!(
                writer,
                "  rows: {} in source, {} in target",
                mismatch.source_data_row_count, mismatch.target_data_row_count
            )?;
        }
        DetailedErrors::DuplicateKeys(dups) => {
            writeln!(
                writer,
                "  duplicate keys in source: {}",
                join_cells(&dups.duplicate_keys_in_source)
            )?;
            writeln!(
                writer,
                "  duplicate keys in target: {}",
                join_cells(&dups.duplicate_keys_in_target)
            )?;
        }
        DetailedErrors::MissingKeys(missing) => {
            writeln!(
                writer,
                "  keys missing in target: {}",
                join_cells(&missing.missing_in_target)
            )?;
            writeln!(
                writer,
                "  keys missing in source: {}",
                join_cells(&missing.missing_in_source)
            )?;
        }
        DetailedErrors::RowValues(columns) => {
            for (column, mismatch) in columns {
                writeln!(writer, "  {}:", column)?;
                let pairs = mismatch
                    .source_data_values
                    .iter()
                    .zip(&mismatch.target_data_values);
                for (key, (source, target)) in mismatch.row_indices.iter().zip(pairs) {
                    writeln!(
                        writer,
                        "    {}: {} → {}",
                        key.display(),
                        source.display(),
                        target.display()
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn join_or_none(names: &[String]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}

fn join_cells(cells: &[CellValue]) -> String {
    if cells.is_empty() {
        return "(none)".to_string();
    }
    cells
        .iter()
        .map(|c| c.display())
        .collect::<Vec<_>>()
        .join(", ")
}
