//! CSV and TSV file parser

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};

use crate::model::{CellValue, Dataset};

use super::Parser;

/// Parser for delimited text files with a header row
pub struct CsvParser {
    delimiter: u8,
}

impl CsvParser {
    /// `.csv` / `.txt`
    pub fn comma() -> Self {
        Self { delimiter: b',' }
    }

    /// `.tsv`
    pub fn tab() -> Self {
        Self { delimiter: b'\t' }
    }

    /// Read delimited text from any reader
    pub fn read<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(self.delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read CSV headers")?
            .clone();
        let mut dataset = Dataset::new(headers.iter())?;

        for (i, record) in csv_reader.records().enumerate() {
            // 1-indexed, after the header line
            let line = i + 2;
            let record = record.with_context(|| format!("Failed to read CSV row {}", line))?;

            if record.len() > dataset.column_count() {
                bail!(
                    "CSV row {} has {} fields, expected at most {}",
                    line,
                    record.len(),
                    dataset.column_count()
                );
            }

            // Short rows are padded with nulls
            let mut cells: Vec<CellValue> = record.iter().map(parse_cell_value).collect();
            cells.resize(dataset.column_count(), CellValue::Null);
            dataset.add_row(cells, line);
        }
        dataset.widen_numeric_columns();

        Ok(dataset)
    }
}

impl Parser for CsvParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        self.read(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        match self.delimiter {
            b'\t' => ext == "tsv",
            _ => matches!(ext, "csv" | "txt"),
        }
    }
}

/// Infer a typed value from a text field
fn parse_cell_value(s: &str) -> CellValue {
    let trimmed = s.trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") || trimmed == "NA" {
        return CellValue::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return CellValue::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return CellValue::Float(f);
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return CellValue::Date(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return CellValue::DateTime(dt);
        }
    }

    CellValue::from(trimmed)
}
