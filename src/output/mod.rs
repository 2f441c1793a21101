//! Output formatting for gate reports

mod html;
mod json;
mod terminal;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use termcolor::ColorChoice;

use crate::config::OutputFormat;
use crate::gate::GateReport;

pub use html::HtmlOutput;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a gate report to a writer
    fn render(
        &self,
        report: &GateReport,
        source_path: &Path,
        target_path: &Path,
        writer: &mut dyn Write,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat, color: ColorChoice) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::with_color_choice(color)),
            OutputFormat::Json => Box::new(JsonOutput::new()),
            OutputFormat::Html => Box::new(HtmlOutput::new()),
        }
    }
}

/// Render a gate report to stdout
pub fn render_to_stdout(
    report: &GateReport,
    source_path: &Path,
    target_path: &Path,
    format: OutputFormat,
    color: ColorChoice,
) -> Result<()> {
    let formatter = OutputFactory::create(format, color);
    let mut stdout = std::io::stdout().lock();
    formatter.render(report, source_path, target_path, &mut stdout)
}
