use rust_xlsxwriter::Workbook;

use super::xlsx_err;
use crate::domain::error::{AppError, Result};
use crate::domain::grid::Row;

/// Write rows to a single-sheet `.xlsx` workbook in memory.
///
/// Every cell is written as a string, matching the normalized grid;
/// empty strings leave the cell blank.
pub fn encode_workbook<'a, I>(rows: I, sheet_name: &str) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name).map_err(xlsx_err)?;

    for (row_idx, row) in rows.into_iter().enumerate() {
        let row_num = u32::try_from(row_idx)
            .map_err(|_| AppError::Internal("Too many rows to export".to_string()))?;
        for (col_idx, cell) in row.iter().enumerate() {
            if cell.is_empty() {
                continue;
            }
            let col_num = u16::try_from(col_idx)
                .map_err(|_| AppError::Internal("Too many columns to export".to_string()))?;
            worksheet
                .write_string(row_num, col_num, cell)
                .map_err(xlsx_err)?;
        }
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::spreadsheet::{decode_first_sheet, EXPORT_SHEET_NAME};
    use calamine::{open_workbook_auto_from_rs, Reader};
    use std::io::Cursor;

    fn rows() -> Vec<Row> {
        vec![
            vec!["Producto".into(), "Precio".into()],
            vec!["Arroz".into(), "2.5".into()],
            vec!["Sal".into(), "".into(), "nota".into()],
        ]
    }

    #[test]
    fn test_sheet_named_inventario() {
        let bytes = encode_workbook(&rows(), EXPORT_SHEET_NAME).unwrap();
        let workbook = open_workbook_auto_from_rs(Cursor::new(bytes.as_slice())).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Inventario".to_string()]);
    }

    #[test]
    fn test_cells_written_as_strings() {
        let bytes = encode_workbook(&rows(), EXPORT_SHEET_NAME).unwrap();
        let grid = decode_first_sheet(&bytes).unwrap();

        use crate::domain::grid::CellValue;
        assert_eq!(grid.rows[1][1], CellValue::Text("2.5".into()));
        assert_eq!(grid.rows[2][1], CellValue::Empty);
        assert_eq!(grid.rows[2][2], CellValue::Text("nota".into()));
    }

    #[test]
    fn test_invalid_sheet_name_is_internal_error() {
        let err = encode_workbook(&rows(), "bad[name]").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
