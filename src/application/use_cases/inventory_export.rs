use tracing::info;

use crate::domain::error::{AppError, Result};
use crate::domain::inventory::InventorySession;
use crate::infrastructure::spreadsheet::{encode_workbook, EXPORT_SHEET_NAME};

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub struct ExportedWorkbook {
    pub file_name: String,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

pub struct InventoryExportUseCase {
    file_name: String,
}

impl InventoryExportUseCase {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }

    /// Serialize the cleaned grid (header and items, quantities excluded).
    pub fn execute(&self, session: &InventorySession) -> Result<ExportedWorkbook> {
        if session.is_empty() {
            return Err(AppError::NothingToExport);
        }

        let bytes = encode_workbook(session.rows(), EXPORT_SHEET_NAME)?;
        let rows = session.row_count();

        info!(file_name = %self.file_name, rows, bytes = bytes.len(), "Inventory exported");

        Ok(ExportedWorkbook {
            file_name: self.file_name.clone(),
            rows,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::CellValue;
    use crate::infrastructure::spreadsheet::decode_first_sheet;

    #[test]
    fn test_empty_session_refuses_export() {
        let use_case = InventoryExportUseCase::new("inventario.xlsx");
        let err = use_case.execute(&InventorySession::new()).err().unwrap();
        assert!(matches!(err, AppError::NothingToExport));
    }

    #[test]
    fn test_export_contains_cleaned_grid() {
        let mut session = InventorySession::new();
        session.load(
            vec![
                vec!["Producto".into(), "Precio".into()],
                vec!["Arroz".into(), "2.5".into()],
            ],
            None,
        );
        session.set_quantity(0, 9).unwrap();

        let exported = InventoryExportUseCase::new("inventario.xlsx")
            .execute(&session)
            .unwrap();

        assert_eq!(exported.file_name, "inventario.xlsx");
        assert_eq!(exported.rows, 2);

        let grid = decode_first_sheet(&exported.bytes).unwrap();
        assert_eq!(
            grid.rows,
            vec![
                vec![CellValue::Text("Producto".into()), CellValue::Text("Precio".into())],
                vec![CellValue::Text("Arroz".into()), CellValue::Text("2.5".into())],
            ]
        );
    }

    #[test]
    fn test_header_only_session_exports() {
        let mut session = InventorySession::new();
        session.load(vec![vec!["Producto".into()]], None);

        let exported = InventoryExportUseCase::new("inventario.xlsx")
            .execute(&session)
            .unwrap();
        assert_eq!(exported.rows, 1);
    }
}
