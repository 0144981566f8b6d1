//! Tabular Data
//!
//! In-memory table decoded from an uploaded spreadsheet, plus the cleaning
//! steps applied at ingest time:
//! - `delimited` - comma-separated text
//! - `workbook` - first worksheet of an XLSX workbook

pub mod delimited;
pub mod workbook;

use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use thiserror::Error;

/// Supported upload formats, chosen by file name extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Xlsx,
}

impl TableFormat {
    /// Case-insensitive suffix match on `.csv` / `.xlsx`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".csv") {
            Some(TableFormat::Csv)
        } else if lower.ends_with(".xlsx") {
            Some(TableFormat::Xlsx)
        } else {
            None
        }
    }
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("No columns to parse from file")]
    Empty,

    #[error("Error tokenizing data. Expected {expected} fields in line {line}, saw {found}")]
    RowTooLong {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook has no worksheets")]
    NoWorksheet,

    #[error("{0}")]
    Workbook(String),
}

/// A single cell value. `Missing` marks an empty or null marker cell.
#[derive(Debug, Clone)]
pub enum Cell {
    Missing,
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Cell::Missing, Cell::Missing) => true,
            (Cell::Int(a), Cell::Int(b)) => a == b,
            (Cell::Float(a), Cell::Float(b)) => a.to_bits() == b.to_bits(),
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Cell::Missing => {}
            Cell::Int(v) => v.hash(state),
            Cell::Float(v) => v.to_bits().hash(state),
            Cell::Bool(v) => v.hash(state),
            Cell::Text(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Missing => Ok(()),
            Cell::Int(v) => write!(f, "{}", v),
            // `{:?}` keeps the trailing `.0` on integral floats
            Cell::Float(v) => write!(f, "{:?}", v),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
            Cell::Text(v) => write!(f, "{}", v),
        }
    }
}

/// Named columns over ordered rows. Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Missing);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Decode a payload according to its format.
    pub fn parse(format: TableFormat, bytes: &[u8]) -> Result<Self, TableError> {
        match format {
            TableFormat::Csv => delimited::read(bytes),
            TableFormat::Xlsx => workbook::read(bytes),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// (row count, column count)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Remove rows equal to an earlier row, keeping first occurrences in order.
    pub fn drop_duplicates(mut self) -> Self {
        let mut seen: HashSet<Vec<Cell>> = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
        self
    }

    /// Replace every missing cell with `value`.
    pub fn fill_missing(mut self, value: Cell) -> Self {
        for cell in self.rows.iter_mut().flatten() {
            if cell.is_missing() {
                *cell = value.clone();
            }
        }
        self
    }

    /// First `n` rows.
    pub fn head(&self, n: usize) -> Self {
        Self {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Comma-separated text with a header line; missing cells are empty fields.
    pub fn to_csv(&self) -> Result<String, TableError> {
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        wtr.write_record(&self.columns)?;
        for row in &self.rows {
            wtr.write_record(row.iter().map(|cell| cell.to_string()))?;
        }
        let data = wtr
            .into_inner()
            .map_err(|e| TableError::Csv(e.into_error().into()))?;
        Ok(String::from_utf8_lossy(&data).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![
                vec![Cell::Int(1), Cell::Missing],
                vec![Cell::Int(1), Cell::Missing],
                vec![Cell::Int(2), Cell::Float(3.0)],
                vec![Cell::Int(1), Cell::Missing],
            ],
        )
    }

    #[test]
    fn test_format_from_filename() {
        assert_eq!(TableFormat::from_filename("sales.csv"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_filename("SALES.CSV"), Some(TableFormat::Csv));
        assert_eq!(TableFormat::from_filename("Report.XlSx"), Some(TableFormat::Xlsx));
        assert_eq!(TableFormat::from_filename("legacy.xls"), None);
        assert_eq!(TableFormat::from_filename("notes.txt"), None);
        assert_eq!(TableFormat::from_filename("csv"), None);
    }

    #[test]
    fn test_drop_duplicates_keeps_first_occurrence_order() {
        let table = sample().drop_duplicates();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.rows()[0], vec![Cell::Int(1), Cell::Missing]);
        assert_eq!(table.rows()[1], vec![Cell::Int(2), Cell::Float(3.0)]);
    }

    #[test]
    fn test_duplicates_are_detected_before_filling() {
        let table = Table::new(
            vec!["a".to_string()],
            vec![vec![Cell::Missing], vec![Cell::Int(0)]],
        );
        let cleaned = table.drop_duplicates().fill_missing(Cell::Int(0));
        assert_eq!(cleaned.shape(), (2, 1));
        assert!(cleaned.rows().iter().all(|r| r[0] == Cell::Int(0)));
    }

    #[test]
    fn test_fill_missing() {
        let table = sample().fill_missing(Cell::Int(0));
        assert!(table.rows().iter().flatten().all(|c| !c.is_missing()));
        assert_eq!(table.rows()[0][1], Cell::Int(0));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![vec![Cell::Int(1)]],
        );
        assert_eq!(table.rows()[0].len(), 3);
        assert!(table.rows()[0][2].is_missing());
    }

    #[test]
    fn test_head_and_to_csv() {
        let csv = sample().head(3).to_csv().unwrap();
        assert_eq!(csv, "a,b\n1,\n1,\n2,3.0\n");
    }

    #[test]
    fn test_to_csv_quotes_and_bools() {
        let table = Table::new(
            vec!["name".to_string(), "active".to_string()],
            vec![vec![Cell::Text("Doe, Jane".to_string()), Cell::Bool(true)]],
        );
        assert_eq!(table.to_csv().unwrap(), "name,active\n\"Doe, Jane\",True\n");
    }
}
