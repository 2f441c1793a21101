//! datagate - Data-quality gate for tabular datasets
//!
//! Compares a target dataset against its source of truth. Structural checks
//! (column list, row count) run first; only if they pass are the key and
//! row-value checks run. Data can be read from CSV, TSV, JSON and Parquet.

pub mod check;
pub mod config;
pub mod error;
pub mod gate;
pub mod model;
pub mod output;
pub mod parser;
pub mod session;

pub use check::{CheckDescriptor, CheckKind, CheckResult, CheckResults, Comparator};
pub use config::Config;
pub use error::{Error, Result};
pub use gate::{Gate, GateReport, GateStatus};
pub use model::{CellValue, Dataset};
pub use session::Session;
