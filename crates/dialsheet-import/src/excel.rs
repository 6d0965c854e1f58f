use crate::error::Result;
use dialsheet_core::Table;

/// Decodes the first worksheet of an `.xlsx`/`.xls` workbook; the first row is the header.
#[cfg(feature = "excel")]
pub fn read_workbook(bytes: &[u8]) -> Result<Table> {
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use dialsheet_core::CellValue;
    use std::io::Cursor;

    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let Some(range) = workbook.worksheet_range_at(0) else {
        return Ok(Table::default());
    };
    let range = range?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };
    let columns = header
        .iter()
        .map(|cell| match cell {
            Data::Empty => String::new(),
            other => other.to_string().trim().to_string(),
        })
        .collect();

    let mut table = Table::new(columns);
    for row in rows {
        let cells = row
            .iter()
            .map(|cell| match cell {
                Data::Empty => CellValue::Empty,
                Data::String(value) => CellValue::from(value.as_str()),
                Data::Int(value) => CellValue::Int(*value),
                Data::Float(value) => CellValue::Float(*value),
                Data::Bool(value) => CellValue::Bool(*value),
                Data::Error(_) => CellValue::Empty,
                other => CellValue::from(other.to_string()),
            })
            .collect();
        table.push_row(cells);
    }
    Ok(table)
}

#[cfg(not(feature = "excel"))]
pub fn read_workbook(_bytes: &[u8]) -> Result<Table> {
    Err(crate::error::ImportError::ExcelUnavailable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "excel")]
    #[test]
    fn garbage_bytes_are_a_decode_error() {
        assert!(read_workbook(b"not a workbook").is_err());
    }

    #[cfg(not(feature = "excel"))]
    #[test]
    fn workbooks_need_the_excel_feature() {
        assert!(matches!(
            read_workbook(b"PK"),
            Err(crate::error::ImportError::ExcelUnavailable)
        ));
    }
}
