//! Spreadsheet codec: `.xls`/`.xlsx` decoding with calamine, `.xlsx` encoding with rust_xlsxwriter.

mod decoder;
mod encoder;

pub use decoder::decode_first_sheet;
pub use encoder::encode_workbook;

/// Sheet name used for exported inventories
pub const EXPORT_SHEET_NAME: &str = "Inventario";

/// Upload extensions accepted for catalog ingestion
pub const SUPPORTED_EXTENSIONS: [&str; 2] = [".xls", ".xlsx"];

/// Extension sniffing only; the content is not inspected.
pub fn has_supported_extension(file_name: &str) -> bool {
    let name = file_name.to_lowercase();
    SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn xlsx_err(err: rust_xlsxwriter::XlsxError) -> crate::domain::error::AppError {
    crate::domain::error::AppError::Internal(format!("Failed to write workbook: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert!(has_supported_extension("catalogo.xlsx"));
        assert!(has_supported_extension("CATALOGO.XLS"));
        assert!(has_supported_extension("inventario 2024.Xlsx"));
        assert!(!has_supported_extension("catalogo.csv"));
        assert!(!has_supported_extension("catalogo.xlsm"));
        assert!(!has_supported_extension("xlsx"));
        assert!(!has_supported_extension("catalogo.pdf"));
    }
}
