//! Dataset sources: reading tabular files into a `Dataset`

mod csv;
mod json;
mod parquet;

use std::path::Path;

use anyhow::{bail, Result};

use crate::model::Dataset;

pub use self::csv::CsvParser;
pub use self::json::JsonParser;
pub use self::parquet::ParquetParser;

/// Trait for reading tabular data files
pub trait Parser: Send + Sync {
    /// Read a file into a dataset
    fn parse(&self, path: &Path) -> Result<Dataset>;

    /// Check if this parser can handle the given (lowercase) file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Picks a parser based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![
                Box::new(CsvParser::comma()),
                Box::new(CsvParser::tab()),
                Box::new(JsonParser),
                Box::new(ParquetParser),
            ],
        }
    }

    /// Get a parser for the given file path
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match self.parsers.iter().find(|p| p.supports_extension(&ext)) {
            Some(parser) => Ok(parser.as_ref()),
            None => bail!(
                "Unsupported file format: {}",
                if ext.is_empty() { "unknown" } else { ext.as_str() }
            ),
        }
    }

    /// Read a file using the appropriate parser
    pub fn parse(&self, path: &Path) -> Result<Dataset> {
        let parser = self.get_parser(path)?;
        let dataset = parser.parse(path)?;
        log::debug!(
            "read {}: {} columns, {} rows",
            path.display(),
            dataset.column_count(),
            dataset.row_count()
        );
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let factory = ParserFactory::new();
        let err = factory.get_parser(Path::new("data.xlsx")).err().unwrap();
        assert_eq!(err.to_string(), "Unsupported file format: xlsx");

        let err = factory.get_parser(Path::new("data")).err().unwrap();
        assert_eq!(err.to_string(), "Unsupported file format: unknown");
    }

    #[test]
    fn test_extension_lookup_is_case_insensitive() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("DATA.CSV")).is_ok());
        assert!(factory.get_parser(Path::new("data.tsv")).is_ok());
        assert!(factory.get_parser(Path::new("data.ndjson")).is_ok());
        assert!(factory.get_parser(Path::new("data.parquet")).is_ok());
    }
}
