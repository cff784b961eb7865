use std::path::{Path, PathBuf};

use objects_shared::fixture::FixtureRow;
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};
use serde_json::{Value, json};
use tempfile::TempDir;

use crate::e2e_mock::helpers::E2EError;

pub const SHEET_NAME: &str = "Add_data";
const HEADERS: [&str; 5] = ["name", "price", "cPUModel", "capacity", "year"];

/// Rows modelled on the product sheet the suite normally runs with.
pub fn sample_rows() -> Vec<FixtureRow> {
    let row = |name: &str, price: Value, cpu: &str, capacity: &str, year: i64| FixtureRow {
        name: Some(json!(name)),
        price: Some(price),
        cpu_model: Some(json!(cpu)),
        capacity: Some(json!(capacity)),
        year: Some(json!(year)),
    };
    vec![
        row("Apple MacBook Pro 16", json!(1849.99), "Intel Core i9", "1 TB", 2019),
        row("Dell XPS 15", json!(1499), "Intel Core i7", "512 GB", 2021),
        row("Lenovo ThinkPad X1", json!(1299.5), "Intel Core i5", "256 GB", 2020),
        row("HP Spectre x360", json!(1599), "Intel Core i7", "1 TB", 2022),
        row("Asus ZenBook 14", json!(999), "AMD Ryzen 7", "512 GB", 2023),
    ]
}

/// A workbook in a temp dir that is removed on drop.
pub struct TestWorkbook {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestWorkbook {
    pub fn create(rows: &[FixtureRow]) -> Result<Self, E2EError> {
        Self::create_with_sheet(SHEET_NAME, rows)
    }

    pub fn create_with_sheet(sheet_name: &str, rows: &[FixtureRow]) -> Result<Self, E2EError> {
        let dir = tempfile::tempdir().map_err(|e| E2EError::Fixture(e.to_string()))?;
        let path = dir.path().join("testData.xlsx");
        write_workbook(&path, sheet_name, rows).map_err(|e| E2EError::Fixture(e.to_string()))?;
        Ok(Self { _dir: dir, path })
    }
}

pub fn write_workbook(path: &Path, sheet_name: &str, rows: &[FixtureRow]) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name)?;

    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        let cells = [&row.name, &row.price, &row.cpu_model, &row.capacity, &row.year];
        for (col, cell) in cells.into_iter().enumerate() {
            if let Some(value) = cell {
                write_cell(sheet, r, col as u16, value)?;
            }
        }
    }

    workbook.save(path)
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &Value) -> Result<(), XlsxError> {
    match value {
        Value::String(s) => sheet.write_string(row, col, s.as_str()).map(|_| ()),
        Value::Number(n) => sheet
            .write_number(row, col, n.as_f64().unwrap_or_default())
            .map(|_| ()),
        Value::Bool(b) => sheet.write_boolean(row, col, *b).map(|_| ()),
        Value::Null => Ok(()),
        other => sheet.write_string(row, col, other.to_string()).map(|_| ()),
    }
}
