//! Loading of spreadsheet exports into untyped usage rows.
//!
//! Uploads are either Excel workbooks (`.xlsx`, `.xls`, `.xlsb`, `.ods`) or CSV.
//! The upstream export names its columns `"Date "` (with a trailing space) and
//! `"Value"`. Only those two columns are kept; every other column is ignored.

mod delimited;
mod headers;
mod workbook;

use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use tracing::debug;

pub use headers::{DATE_HEADER, VALUE_HEADER};

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

#[derive(Debug, thiserror::Error)]
pub enum UsageTableError {
    #[error("failed to read usage export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid usage CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid usage workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("usage workbook has no worksheet with a header row")]
    EmptyWorkbook,
    #[error("usage export is missing the '{header}' column")]
    MissingColumn { header: &'static str },
}

/// A cell as the export typed it. Workbooks carry real dates and numbers;
/// CSV cells are always text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

/// One row as it appeared in the export. Blank or undecodable cells are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub date: Option<Cell>,
    pub value: Option<Cell>,
}

impl RawRecord {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: Some(Cell::Text(date.into())),
            value: Some(Cell::Text(value.into())),
        }
    }
}

/// The date and value columns of an export, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageTable {
    records: Vec<RawRecord>,
}

impl UsageTable {
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self { records }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, UsageTableError> {
        let contents = std::fs::read(path)?;
        Self::from_bytes(&contents)
    }

    /// Reads a workbook when the bytes carry a zip or OLE signature, CSV otherwise.
    pub fn from_bytes(contents: &[u8]) -> Result<Self, UsageTableError> {
        let table = if is_workbook(contents) {
            workbook::read(contents)?
        } else {
            delimited::read(contents)?
        };

        debug!(rows = table.len(), "loaded usage export");
        Ok(table)
    }

    /// Reads a CSV export.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, UsageTableError> {
        let table = delimited::read(reader)?;
        debug!(rows = table.len(), "loaded usage CSV");
        Ok(table)
    }

    pub fn records(&self) -> &[RawRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_workbook(contents: &[u8]) -> bool {
    contents.starts_with(ZIP_MAGIC) || contents.starts_with(OLE_MAGIC)
}

/// Trimmed text, `None` when blank.
fn text_cell(raw: &str) -> Option<Cell> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(Cell::Text(trimmed.to_string()))
    }
}
