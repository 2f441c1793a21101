//! datagate - Data-quality gate for tabular datasets

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::ColorChoice;

use datagate::config::{CheckConfig, Config, OutputFormat};
use datagate::gate::Gate;
use datagate::output::render_to_stdout;
use datagate::parser::ParserFactory;
use datagate::session::Session;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
    Html,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Html => OutputFormat::Html,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliColor {
    Auto,
    Always,
    Never,
}

impl From<CliColor> for ColorChoice {
    fn from(c: CliColor) -> Self {
        match c {
            CliColor::Auto => ColorChoice::Auto,
            CliColor::Always => ColorChoice::Always,
            CliColor::Never => ColorChoice::Never,
        }
    }
}

/// Check a target dataset against its source of truth (CSV, TSV, JSON, Parquet)
#[derive(Parser, Debug)]
#[command(name = "datagate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source-of-truth dataset
    source_file: PathBuf,

    /// Dataset under test
    target_file: PathBuf,

    /// Primary key column used to align rows
    #[arg(short, long, default_value = "id")]
    key: String,

    /// JSON file listing the checks to run (defaults to the built-in checks)
    #[arg(short, long)]
    checks: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Fail the key check when keys are missing on either side
    #[arg(long)]
    strict_keys: bool,

    /// When to color terminal output
    #[arg(long, value_enum, default_value = "auto")]
    color: CliColor,

    /// Log each check as it runs
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1), // Gate failed
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else if cli.quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<bool> {
    let checks = match &cli.checks {
        Some(path) => CheckConfig::from_path(path)?,
        None => CheckConfig::default(),
    };

    let config = Config::new(cli.source_file, cli.target_file)
        .with_primary_key(cli.key)
        .with_output_format(cli.format.into())
        .with_checks(checks)
        .with_strict_key_match(cli.strict_keys)
        .with_color(cli.color.into());

    // Parse files
    let factory = ParserFactory::new();

    let source = factory
        .parse(&config.source_file)
        .with_context(|| format!("Failed to parse source file: {}", config.source_file.display()))?;

    let target = factory
        .parse(&config.target_file)
        .with_context(|| format!("Failed to parse target file: {}", config.target_file.display()))?;

    let mut session = Session::new();
    session.initialize();
    let comparator = session.comparator(&source, &target)?;

    let report = Gate::new(&config.checks.expectations, &config.primary_key)
        .with_strict_keys(config.strict_key_match)
        .run(&comparator)?;

    render_to_stdout(
        &report,
        &config.source_file,
        &config.target_file,
        config.output_format,
        config.color,
    )?;

    Ok(report.passed())
}
