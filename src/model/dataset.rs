//! Dataset, Column and Row structures

use serde::{Deserialize, Serialize};

use super::cell::CellValue;
use crate::error::{Error, Result};

static NULL_CELL: CellValue = CellValue::Null;

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name (from header)
    pub name: String,
    /// Column index (0-based position)
    pub index: usize,
}

impl Column {
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
        }
    }
}

/// A row in the dataset
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub cells: Vec<CellValue>,
    /// Original line/record number in the source file (1-indexed)
    pub source_line: usize,
}

impl Row {
    pub fn new(cells: Vec<CellValue>, source_line: usize) -> Self {
        Self { cells, source_line }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&CellValue> {
        self.cells.get(index)
    }
}

/// An in-memory tabular dataset: ordered named columns and ordered rows
///
/// Rows shorter than the column list read as `Null` for the missing cells.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset with the given column names.
    ///
    /// Fails on a repeated name, since lookups by name would only ever see
    /// the first of the two columns.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<Column> = Vec::new();
        for (i, name) in names.into_iter().enumerate() {
            let name = name.into();
            if columns.iter().any(|c| c.name == name) {
                return Err(Error::DuplicateColumn(name));
            }
            columns.push(Column::new(name, i));
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    /// Build a dataset from column-oriented data.
    ///
    /// ```
    /// use datagate::model::{CellValue, Dataset};
    ///
    /// let data = Dataset::from_columns(vec![
    ///     ("id", vec![CellValue::Int(1), CellValue::Int(2)]),
    ///     ("value", vec![CellValue::Int(100), CellValue::Int(200)]),
    /// ])
    /// .unwrap();
    /// assert_eq!(data.row_count(), 2);
    /// assert_eq!(data.column_names(), vec!["id", "value"]);
    /// ```
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<CellValue>)>,
        S: Into<String>,
    {
        let (names, values): (Vec<String>, Vec<Vec<CellValue>>) = columns
            .into_iter()
            .map(|(name, values)| (name.into(), values))
            .unzip();

        let mut dataset = Self::new(names)?;

        let expected = values.first().map_or(0, Vec::len);
        if let Some((column, cells)) = dataset
            .columns
            .iter()
            .zip(&values)
            .find(|(_, cells)| cells.len() != expected)
        {
            return Err(Error::RaggedColumns {
                column: column.name.clone(),
                expected,
                actual: cells.len(),
            });
        }

        let mut iters: Vec<_> = values.into_iter().map(Vec::into_iter).collect();
        for line in 1..=expected {
            let cells = iters.iter_mut().filter_map(Iterator::next).collect();
            dataset.add_row(cells, line);
        }
        Ok(dataset)
    }

    /// Add a row to the dataset
    pub fn add_row(&mut self, cells: Vec<CellValue>, source_line: usize) {
        self.rows.push(Row::new(cells, source_line));
    }

    /// Get column index by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Value of a column in a row; cells past the end of a short row read as `Null`
    pub fn value(&self, row: usize, column: usize) -> &CellValue {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .unwrap_or(&NULL_CELL)
    }

    /// Iterate over one column's values in row order
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = &CellValue> + '_ {
        (0..self.rows.len()).map(move |row| self.value(row, column))
    }

    /// Store every numeric column as a single scalar type.
    ///
    /// A column holding both `Int` and `Float` cells (nulls aside) becomes all
    /// `Float`, so `100` and `100.0` read the same. Columns mixing numbers
    /// with other types are left alone.
    pub fn widen_numeric_columns(&mut self) {
        for column in 0..self.column_count() {
            let widened = self
                .column_values(column)
                .fold(NumericType::Null, |ty, cell| ty.widen(cell));
            if widened != NumericType::Float {
                continue;
            }
            for row in &mut self.rows {
                if let Some(cell) = row.cells.get_mut(column) {
                    if let CellValue::Int(i) = *cell {
                        *cell = CellValue::Float(i as f64);
                    }
                }
            }
        }
    }

    /// Number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Numeric type a column settles on after seeing its cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumericType {
    Null,
    Int,
    Float,
    Mixed,
}

impl NumericType {
    fn widen(self, cell: &CellValue) -> NumericType {
        let other = match cell {
            CellValue::Null => return self,
            CellValue::Int(_) => NumericType::Int,
            CellValue::Float(_) => NumericType::Float,
            _ => NumericType::Mixed,
        };
        match (self, other) {
            (NumericType::Null, t) => t,
            (a, b) if a == b => a,
            (NumericType::Int, NumericType::Float) | (NumericType::Float, NumericType::Int) => {
                NumericType::Float
            }
            _ => NumericType::Mixed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_builds_rows() {
        let data = Dataset::from_columns(vec![
            ("id", vec![CellValue::Int(1), CellValue::Int(2)]),
            ("name", vec![CellValue::from("a"), CellValue::from("b")]),
        ])
        .unwrap();

        assert_eq!(data.row_count(), 2);
        assert_eq!(data.column_count(), 2);
        assert_eq!(data.value(1, 1), &CellValue::from("b"));
        assert_eq!(data.rows[0].source_line, 1);
    }

    #[test]
    fn test_from_columns_rejects_ragged_input() {
        let err = Dataset::from_columns(vec![
            ("id", vec![CellValue::Int(1), CellValue::Int(2)]),
            ("name", vec![CellValue::from("a")]),
        ])
        .unwrap_err();

        assert_eq!(
            err,
            Error::RaggedColumns {
                column: "name".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_from_columns_rejects_duplicate_names() {
        let err = Dataset::from_columns(vec![("id", vec![]), ("id", vec![])]).unwrap_err();
        assert_eq!(err, Error::DuplicateColumn("id".into()));
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = Dataset::new(["id", "value", "id"]).unwrap_err();
        assert_eq!(err, Error::DuplicateColumn("id".into()));
    }

    #[test]
    fn test_widen_mixed_numeric_columns() {
        let mut data = Dataset::from_columns(vec![
            ("mixed", vec![CellValue::Int(100), CellValue::Float(2.5), CellValue::Null]),
            ("ints", vec![CellValue::Int(1), CellValue::Int(2), CellValue::Int(3)]),
            ("text", vec![CellValue::Int(1), CellValue::Float(2.5), CellValue::from("x")]),
        ])
        .unwrap();

        data.widen_numeric_columns();

        assert_eq!(data.value(0, 0), &CellValue::Float(100.0));
        assert_eq!(data.value(2, 0), &CellValue::Null);
        assert_eq!(data.value(0, 1), &CellValue::Int(1));
        assert_eq!(data.value(0, 2), &CellValue::Int(1));
    }

    #[test]
    fn test_short_rows_read_as_null() {
        let mut data = Dataset::new(["a", "b"]).unwrap();
        data.add_row(vec![CellValue::Int(1)], 2);

        assert_eq!(data.value(0, 1), &CellValue::Null);
        let column: Vec<_> = data.column_values(1).collect();
        assert_eq!(column, vec![&CellValue::Null]);
    }
}
