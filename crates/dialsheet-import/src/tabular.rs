use crate::error::Result;
use dialsheet_core::{CellValue, Table};

/// Decodes a CSV whose first record is the header; short rows read as empty cells.
pub fn read_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let columns = reader
        .headers()?
        .iter()
        .map(|header| header.trim().to_string())
        .collect();
    let mut table = Table::new(columns);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(CellValue::from_field).collect());
    }
    Ok(table)
}

/// Positional reader for files the table reader rejects: the first record is
/// skipped as a header, column 0 is the phone and column 1 the name.
pub fn read_csv_positional(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut table = Table::new(vec![String::new(), String::new()]);
    for record in reader.byte_records().skip(1) {
        let record = record?;
        let row = (0..2)
            .map(|index| {
                record
                    .get(index)
                    .map(|field| CellValue::from(String::from_utf8_lossy(field).into_owned()))
                    .unwrap_or_default()
            })
            .collect();
        table.push_row(row);
    }
    Ok(table)
}
