use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx, XlsxError};

use super::delimited::column_names;
use super::{Cell, Table, TableError};

/// Decode the first worksheet; its first row names the columns.
///
/// Columns are counted from A even when the used area starts further right;
/// the leading blank columns come back as `Unnamed: <idx>` with no values.
pub fn read(bytes: &[u8]) -> Result<Table, TableError> {
    let mut workbook: Xlsx<Cursor<Vec<u8>>> = open_workbook_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e: XlsxError| TableError::Workbook(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(TableError::NoWorksheet)?
        .map_err(|e| TableError::Workbook(e.to_string()))?;

    let offset = range.start().map_or(0, |(_, col)| col as usize);

    let mut rows = range.rows();
    let header = rows.next().ok_or(TableError::Empty)?;
    let names: Vec<String> = std::iter::repeat(String::new())
        .take(offset)
        .chain(header.iter().map(|data| to_cell(data).to_string()))
        .collect();
    let columns = column_names(names.iter().map(String::as_str));

    let rows = rows
        .map(|row| {
            std::iter::repeat(Cell::Missing)
                .take(offset)
                .chain(row.iter().map(to_cell))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::String(s) if s.is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Int(v) => Cell::Int(*v),
        // numeric cells are stored as floats; integral ones read back as integers
        Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Cell::Int(*v as i64),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(v) => Cell::Bool(*v),
        Data::DateTime(dt) if dt.is_duration() => Cell::Float(dt.as_f64()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(value) => Cell::Text(value.format(DATETIME_FORMAT).to_string()),
            // outside the range chrono can represent
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}
