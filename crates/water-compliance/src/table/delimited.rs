use super::{headers, text_cell, Cell, RawRecord, UsageTable, UsageTableError};
use super::{DATE_HEADER, VALUE_HEADER};
use csv::ByteRecord;
use std::io::Read;

/// Rows are read as bytes so a cell that is not UTF-8 (a stray Windows-1252
/// byte, say) only blanks that cell instead of failing the whole file.
pub(super) fn read<R: Read>(reader: R) -> Result<UsageTable, UsageTableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(reader);

    let header_row: Vec<Option<String>> = csv_reader
        .byte_headers()?
        .iter()
        .map(|header| std::str::from_utf8(header).ok().map(str::to_string))
        .collect();
    let date_index = headers::locate(&header_row, DATE_HEADER)?;
    let value_index = headers::locate(&header_row, VALUE_HEADER)?;

    let mut records = Vec::new();
    for row in csv_reader.byte_records() {
        let row = row?;
        records.push(RawRecord {
            date: cell(&row, date_index),
            value: cell(&row, value_index),
        });
    }

    Ok(UsageTable::from_records(records))
}

fn cell(row: &ByteRecord, index: usize) -> Option<Cell> {
    row.get(index)
        .and_then(|bytes| std::str::from_utf8(bytes).ok())
        .and_then(text_cell)
}
