//! Spreadsheet fixture loading.
//!
//! A worksheet is read into rows keyed by the header row, the way the suite's
//! test data has always been laid out: first row holds column names, every
//! following row is one record.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{Data, Range, Reader, open_workbook_auto};
use objects_shared::fixture::{FixtureRow, Row};
use serde_json::{Number, Value};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Failed to open workbook {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Sheet '{sheet}' not found in {path} (available: {available:?})")]
    SheetNotFound {
        sheet: String,
        path: PathBuf,
        available: Vec<String>,
    },

    #[error("Failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    #[error("Fixture row {index} requested but the sheet only has {len} rows")]
    MissingRow { index: usize, len: usize },

    #[error("Fixture row {index} is malformed: {source}")]
    InvalidRow {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Read `sheet_name` from the workbook at `path` into header-keyed rows.
pub fn read_sheet(path: &Path, sheet_name: &str) -> Result<Vec<Row>, FixtureError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| FixtureError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let available = workbook.sheet_names();
    if !available.iter().any(|name| name == sheet_name) {
        return Err(FixtureError::SheetNotFound {
            sheet: sheet_name.to_string(),
            path: path.to_path_buf(),
            available,
        });
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|source| FixtureError::Sheet {
            sheet: sheet_name.to_string(),
            source,
        })?;

    let rows = rows_from_range(&range);
    info!(
        "Loaded {} fixture rows from {} [{}]",
        rows.len(),
        path.display(),
        sheet_name
    );
    Ok(rows)
}

/// Convert a cell range into rows keyed by the first row's headers.
///
/// Columns with a blank header are dropped, blank cells are left out of the
/// row, and rows with no values at all are skipped. A repeated header keeps
/// its first column; later ones become `name_1`, `name_2`, ...
pub fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let mut lines = range.rows();
    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let headers = unique_headers(header);

    lines
        .filter_map(|cells| {
            let row: Row = headers
                .iter()
                .zip(cells)
                .filter_map(|(name, cell)| Some((name.clone()?, cell_value(cell)?)))
                .collect();
            if row.is_empty() {
                debug!("Skipping empty fixture row");
                None
            } else {
                Some(row)
            }
        })
        .collect()
}

fn unique_headers(header: &[Data]) -> Vec<Option<String>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    header
        .iter()
        .map(|cell| {
            let name = header_name(cell)?;
            let unique = match seen.get(&name).copied() {
                Some(mut counter) => {
                    let candidate = loop {
                        let candidate = format!("{}_{}", name, counter);
                        counter += 1;
                        if !seen.contains_key(&candidate) {
                            break candidate;
                        }
                    };
                    seen.insert(name, counter);
                    candidate
                }
                None => name,
            };
            seen.insert(unique.clone(), 1);
            Some(unique)
        })
        .collect()
}

fn header_name(cell: &Data) -> Option<String> {
    let name = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty | Data::Error(_) => return None,
        other => other.to_string(),
    };
    (!name.is_empty()).then_some(name)
}

/// JSON value of a single cell. `None` means the cell is undefined.
pub fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => number(*f),
        Data::Bool(b) => Some(Value::Bool(*b)),
        Data::DateTime(dt) => number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
    }
}

// Spreadsheets store every number as a float; whole numbers go out as
// integers so they compare equal to what the API echoes back.
fn number(f: f64) -> Option<Value> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number)
    }
}

/// The loaded fixture sheet, indexed positionally.
#[derive(Debug, Clone, Default)]
pub struct Fixtures {
    rows: Vec<Row>,
}

impl Fixtures {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Typed fixture at `index` (0 is the first row under the header).
    pub fn row(&self, index: usize) -> Result<FixtureRow, FixtureError> {
        let raw = self.rows.get(index).ok_or(FixtureError::MissingRow {
            index,
            len: self.rows.len(),
        })?;
        FixtureRow::from_row(raw).map_err(|source| FixtureError::InvalidRow { index, source })
    }
}

pub fn load_fixtures(path: &Path, sheet_name: &str) -> Result<Fixtures, FixtureError> {
    read_sheet(path, sheet_name).map(Fixtures::new)
}
