use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::domain::error::{AppError, Result};
use crate::domain::grid::{CellValue, RawGrid};

/// Decode the first worksheet of an in-memory workbook.
///
/// Cell 0 of every row is the first column of the sheet's used range, not
/// column A. Trailing empty cells are dropped, so row lengths follow the
/// last filled cell of each row.
pub fn decode_first_sheet(bytes: &[u8]) -> Result<RawGrid> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| AppError::SpreadsheetError(format!("Failed to open workbook: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AppError::SpreadsheetError("No worksheet found".to_string()))?
        .map_err(|e| AppError::SpreadsheetError(format!("Failed to read worksheet: {}", e)))?;

    let rows = range
        .rows()
        .map(|row| {
            let mut cells: Vec<CellValue> = row.iter().map(to_cell_value).collect();
            while matches!(cells.last(), Some(CellValue::Empty)) {
                cells.pop();
            }
            cells
        })
        .collect();

    Ok(RawGrid::new(rows))
}

fn to_cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Integer(*i),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Other(other.to_string()),
    }
}
