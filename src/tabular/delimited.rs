// Comma-separated decoding.
//
// The first non-blank line names the columns. Column types are inferred from
// every non-missing value in the column, so "1" and "1.5" in the same column
// both read as floats.

use csv::ReaderBuilder;

use super::{Cell, Table, TableError};

/// Field values read as missing.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnKind {
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

pub fn read(bytes: &[u8]) -> Result<Table, TableError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut lines = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if record.len() == 1 && record[0].is_empty() {
            continue;
        }
        lines.push(record);
    }

    let mut lines = lines.into_iter();
    let header = lines.next().ok_or(TableError::Empty)?;
    let columns = column_names(header.iter());
    let width = columns.len();

    let mut raw_rows: Vec<Vec<Option<String>>> = Vec::new();
    for (idx, record) in lines.enumerate() {
        if record.len() > width {
            return Err(TableError::RowTooLong {
                // header is line 1
                line: idx + 2,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<Option<String>> = record
            .iter()
            .map(|field| {
                if MISSING_MARKERS.contains(&field) {
                    None
                } else {
                    Some(field.to_string())
                }
            })
            .collect();
        row.resize(width, None);
        raw_rows.push(row);
    }

    let kinds: Vec<ColumnKind> = (0..width)
        .map(|col| infer_kind(raw_rows.iter().map(|row| row[col].as_deref())))
        .collect();

    let rows = raw_rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .zip(kinds.iter())
                .map(|(value, kind)| convert(value, *kind))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

/// Blank names become `Unnamed: <idx>`; repeats get `.1`, `.2`, ... suffixes.
pub(super) fn column_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn infer_kind<'a>(values: impl Iterator<Item = Option<&'a str>>) -> ColumnKind {
    let mut kind = ColumnKind::Empty;
    let mut has_missing = false;

    for value in values {
        let Some(value) = value else {
            has_missing = true;
            continue;
        };
        let this = if parse_int(value).is_some() {
            ColumnKind::Int
        } else if parse_float(value).is_some() {
            ColumnKind::Float
        } else if parse_bool(value).is_some() {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        };
        kind = match (kind, this) {
            (ColumnKind::Empty, k) => k,
            (a, b) if a == b => a,
            (ColumnKind::Int, ColumnKind::Float) | (ColumnKind::Float, ColumnKind::Int) => {
                ColumnKind::Float
            }
            _ => ColumnKind::Text,
        };
    }

    // integer columns cannot hold missing cells
    if kind == ColumnKind::Int && has_missing {
        ColumnKind::Float
    } else {
        kind
    }
}

fn convert(value: Option<String>, kind: ColumnKind) -> Cell {
    let Some(value) = value else {
        return Cell::Missing;
    };
    match kind {
        ColumnKind::Int => parse_int(&value).map(Cell::Int),
        ColumnKind::Float => parse_float(&value).map(Cell::Float),
        ColumnKind::Bool => parse_bool(&value).map(Cell::Bool),
        ColumnKind::Text | ColumnKind::Empty => None,
    }
    .unwrap_or(Cell::Text(value))
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

fn parse_float(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim() {
        "True" | "true" | "TRUE" => Some(true),
        "False" | "false" | "FALSE" => Some(false),
        _ => None,
    }
}
