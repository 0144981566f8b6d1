mod common;

use axum::http::StatusCode;
use common::{xlsx, TestApp};
use sheet_insight::tabular::{Cell, Table, TableFormat};

const NO_PROVIDER: &str = "http://127.0.0.1:9/v1";

#[test]
fn test_leading_blank_column_is_kept() {
    let workbook = xlsx(&[&["", "a", "b"], &["", "1", "2"], &["", "3", "4"]]);

    let table = Table::parse(TableFormat::Xlsx, &workbook).unwrap();

    assert_eq!(table.columns(), ["Unnamed: 0", "a", "b"]);
    assert_eq!(table.shape(), (2, 3));
    assert_eq!(table.rows()[0], vec![Cell::Missing, Cell::Int(1), Cell::Int(2)]);
}

#[test]
fn test_repeated_headers_are_suffixed() {
    let workbook = xlsx(&[&["kota", "kota", "", "kota"], &["Jakarta", "Bogor", "1", "Depok"]]);

    let table = Table::parse(TableFormat::Xlsx, &workbook).unwrap();

    assert_eq!(table.columns(), ["kota", "kota.1", "Unnamed: 2", "kota.2"]);
}

#[tokio::test]
async fn test_upload_counts_columns_from_a() {
    let app = TestApp::new(NO_PROVIDER);
    let workbook = xlsx(&[&["", "a", "b"], &["", "1", "2"], &["", "3", "4"]]);

    let (status, body) = app.upload("offset.xlsx", &workbook).await;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["rows"], 2);
    assert_eq!(body["cols"], 3);
}
