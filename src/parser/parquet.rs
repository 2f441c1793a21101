//! Parquet file parser

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Date32Array, Float32Array, Float64Array, Int16Array,
    Int32Array, Int64Array, Int8Array, LargeStringArray, StringArray, TimestampMicrosecondArray,
    TimestampMillisecondArray, TimestampNanosecondArray, TimestampSecondArray, UInt16Array,
    UInt32Array, UInt64Array, UInt8Array,
};
use arrow::datatypes::{DataType, TimeUnit};
use arrow::util::display::{ArrayFormatter, FormatOptions};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::model::{CellValue, Dataset};

use super::Parser;

/// Parser for Parquet files
pub struct ParquetParser;

impl Parser for ParquetParser {
    fn parse(&self, path: &Path) -> Result<Dataset> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open Parquet file: {}", path.display()))?;

        let builder = ParquetRecordBatchReaderBuilder::try_new(file)
            .context("Failed to create Parquet reader")?;
        let schema = builder.schema().clone();
        let reader = builder.build().context("Failed to build Parquet reader")?;

        let mut dataset = Dataset::new(schema.fields().iter().map(|f| f.name().clone()))?;

        let mut line = 0usize;
        for batch in reader {
            let batch = batch.context("Failed to read Parquet batch")?;
            let columns: Vec<Vec<CellValue>> = batch
                .columns()
                .iter()
                .map(column_cells)
                .collect::<Result<_>>()?;

            for row in 0..batch.num_rows() {
                line += 1;
                let cells = columns.iter().map(|column| column[row].clone()).collect();
                dataset.add_row(cells, line);
            }
        }

        Ok(dataset)
    }

    fn supports_extension(&self, ext: &str) -> bool {
        matches!(ext, "parquet" | "pq")
    }
}

macro_rules! collect_cells {
    ($array:expr, $ty:ty, |$v:ident| $convert:expr) => {{
        let typed = $array
            .as_any()
            .downcast_ref::<$ty>()
            .context("Parquet column does not match its declared type")?;
        (0..typed.len())
            .map(|i| {
                if typed.is_null(i) {
                    CellValue::Null
                } else {
                    let $v = typed.value(i);
                    $convert
                }
            })
            .collect()
    }};
}

macro_rules! collect_temporal {
    ($array:expr, $ty:ty, $as_chrono:ident, $variant:path) => {{
        let typed = $array
            .as_any()
            .downcast_ref::<$ty>()
            .context("Parquet column does not match its declared type")?;
        (0..typed.len())
            .map(|i| match typed.$as_chrono(i) {
                Some(value) if !typed.is_null(i) => $variant(value),
                _ => CellValue::Null,
            })
            .collect()
    }};
}

/// Convert one Arrow column to cells; unsupported types fall back to their text form
fn column_cells(array: &ArrayRef) -> Result<Vec<CellValue>> {
    let cells: Vec<CellValue> = match array.data_type() {
        DataType::Boolean => collect_cells!(array, BooleanArray, |v| CellValue::Bool(v)),
        DataType::Int8 => collect_cells!(array, Int8Array, |v| CellValue::Int(v.into())),
        DataType::Int16 => collect_cells!(array, Int16Array, |v| CellValue::Int(v.into())),
        DataType::Int32 => collect_cells!(array, Int32Array, |v| CellValue::Int(v.into())),
        DataType::Int64 => collect_cells!(array, Int64Array, |v| CellValue::Int(v)),
        DataType::UInt8 => collect_cells!(array, UInt8Array, |v| CellValue::Int(v.into())),
        DataType::UInt16 => collect_cells!(array, UInt16Array, |v| CellValue::Int(v.into())),
        DataType::UInt32 => collect_cells!(array, UInt32Array, |v| CellValue::Int(v.into())),
        DataType::UInt64 => collect_cells!(array, UInt64Array, |v| match i64::try_from(v) {
            Ok(i) => CellValue::Int(i),
            Err(_) => CellValue::from(v.to_string()),
        }),
        DataType::Float32 => {
            collect_cells!(array, Float32Array, |v| CellValue::Float(f64::from(v)))
        }
        DataType::Float64 => collect_cells!(array, Float64Array, |v| CellValue::Float(v)),
        DataType::Utf8 => collect_cells!(array, StringArray, |v| CellValue::from(v)),
        DataType::LargeUtf8 => collect_cells!(array, LargeStringArray, |v| CellValue::from(v)),
        DataType::Date32 => {
            collect_temporal!(array, Date32Array, value_as_date, CellValue::Date)
        }
        DataType::Timestamp(TimeUnit::Second, _) => collect_temporal!(
            array,
            TimestampSecondArray,
            value_as_datetime,
            CellValue::DateTime
        ),
        DataType::Timestamp(TimeUnit::Millisecond, _) => collect_temporal!(
            array,
            TimestampMillisecondArray,
            value_as_datetime,
            CellValue::DateTime
        ),
        DataType::Timestamp(TimeUnit::Microsecond, _) => collect_temporal!(
            array,
            TimestampMicrosecondArray,
            value_as_datetime,
            CellValue::DateTime
        ),
        DataType::Timestamp(TimeUnit::Nanosecond, _) => collect_temporal!(
            array,
            TimestampNanosecondArray,
            value_as_datetime,
            CellValue::DateTime
        ),
        _ => {
            let formatter = ArrayFormatter::try_new(array.as_ref(), &FormatOptions::default())
                .context("Unsupported Parquet column type")?;
            (0..array.len())
                .map(|i| {
                    if array.is_null(i) {
                        CellValue::Null
                    } else {
                        CellValue::from(formatter.value(i).to_string())
                    }
                })
                .collect()
        }
    };
    Ok(cells)
}
