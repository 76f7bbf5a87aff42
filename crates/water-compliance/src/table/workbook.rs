use super::{headers, text_cell, Cell, RawRecord, UsageTable, UsageTableError};
use super::{DATE_HEADER, VALUE_HEADER};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use std::io::Cursor;

/// Reads the first worksheet; its first non-empty row is the header row.
pub(super) fn read(contents: &[u8]) -> Result<UsageTable, UsageTableError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(contents))?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or(UsageTableError::EmptyWorkbook)??;

    let mut rows = sheet.rows();
    let header_row: Vec<Option<String>> = rows
        .next()
        .ok_or(UsageTableError::EmptyWorkbook)?
        .iter()
        .map(header_text)
        .collect();
    let date_index = headers::locate(&header_row, DATE_HEADER)?;
    let value_index = headers::locate(&header_row, VALUE_HEADER)?;

    let records = rows
        .map(|row| RawRecord {
            date: row.get(date_index).and_then(cell),
            value: row.get(value_index).and_then(cell),
        })
        .collect();

    Ok(UsageTable::from_records(records))
}

fn header_text(data: &Data) -> Option<String> {
    match data {
        Data::Empty => None,
        Data::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

fn cell(data: &Data) -> Option<Cell> {
    match data {
        Data::Int(value) => Some(Cell::Number(*value as f64)),
        Data::Float(value) => Some(Cell::Number(*value)),
        Data::String(text) | Data::DateTimeIso(text) => text_cell(text),
        Data::DateTime(datetime) => datetime.as_datetime().map(|dt| Cell::Date(dt.date())),
        _ => None,
    }
}
