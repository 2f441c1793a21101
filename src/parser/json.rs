//! JSON records parser

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexSet;
use serde_json::{Map, Value};

use crate::model::{CellValue, Dataset};

use super::Parser;

/// Parser for JSON record files.
///
/// Accepts an array of objects, a single object, or newline-delimited
/// objects. Columns are the union of all object keys in first-seen order;
/// keys an object lacks read as `Null`.
pub struct JsonParser;

impl JsonParser {
    /// Read JSON records from text
    pub fn read(&self, text: &str) -> Result<Dataset> {
        let records = match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items,
            Ok(value @ Value::Object(_)) => vec![value],
            Ok(_) => bail!("JSON must be an array of objects or an object"),
            // Not a single document: try one object per line
            Err(_) => read_lines(text)?,
        };

        let objects = records
            .iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(obj) => Ok(obj),
                other => bail!("record {} is not an object: {}", i + 1, other),
            })
            .collect::<Result<Vec<&Map<String, Value>>>>()?;

        let mut names: IndexSet<&str> = IndexSet::new();
        for obj in &objects {
            names.extend(obj.keys().map(String::as_str));
        }

        let mut dataset = Dataset::new(names.iter().copied())?;
        for (i, obj) in objects.iter().enumerate() {
            let cells = names.iter().map(|name| json_value_to_cell(obj.get(*name))).collect();
            dataset.add_row(cells, i + 1);
        }
        dataset.widen_numeric_columns();

        Ok(dataset)
    }
}

impl Parser for JsonParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to open JSON file: {}", path.display()))?;
        self.read(&text)
            .with_context(|| format!("Failed to parse JSON file: {}", path.display()))
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "json" | "jsonl" | "ndjson")
    }
}

fn read_lines(text: &str) -> Result<Vec<Value>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str(line).with_context(|| format!("Invalid JSON on line {}", i + 1))
        })
        .collect()
}

fn json_value_to_cell(value: Option<&Value>) -> CellValue {
    match value {
        None | Some(Value::Null) => CellValue::Null,
        Some(Value::Bool(b)) => CellValue::Bool(*b),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => CellValue::Int(i),
            (None, Some(f)) => CellValue::Float(f),
            (None, None) => CellValue::from(n.to_string()),
        },
        Some(Value::String(s)) => {
            if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                return CellValue::Date(date);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
                return CellValue::DateTime(dt);
            }
            CellValue::from(s.as_str())
        }
        // Nested values are compared by their JSON text
        Some(nested) => CellValue::from(nested.to_string()),
    }
}
