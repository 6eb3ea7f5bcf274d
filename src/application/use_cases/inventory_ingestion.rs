use serde::Serialize;
use tracing::info;

use crate::domain::cleaner::{clean_grid, CleanedGrid};
use crate::domain::error::{AppError, Result};
use crate::domain::inventory::InventorySession;
use crate::domain::upload::UploadedFile;
use crate::infrastructure::spreadsheet::{decode_first_sheet, has_supported_extension};

pub const UNSUPPORTED_FORMAT_MESSAGE: &str = "Formato no soportado. Sube un .xls o .xlsx";

/// A decoded and cleaned catalog, not yet loaded into a session
#[derive(Debug, Clone)]
pub struct ParsedCatalog {
    pub file_name: String,
    pub rows_read: usize,
    pub grid: CleanedGrid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestionSummary {
    pub file_name: String,
    pub rows_read: usize,
    pub blank_rows_removed: usize,
    pub discount_rows_removed: usize,
    /// Rows kept, header included
    pub rows_loaded: usize,
    pub items: usize,
}

#[derive(Default)]
pub struct InventoryIngestionUseCase;

impl InventoryIngestionUseCase {
    pub fn new() -> Self {
        Self
    }

    /// Check the extension, decode the first sheet and clean it. Touches no session.
    pub fn parse(&self, file: &UploadedFile) -> Result<ParsedCatalog> {
        if !has_supported_extension(&file.file_name) {
            return Err(AppError::UnsupportedFormat(
                UNSUPPORTED_FORMAT_MESSAGE.to_string(),
            ));
        }

        let raw = decode_first_sheet(&file.bytes)?;
        let rows_read = raw.len();
        let grid = clean_grid(&raw);

        Ok(ParsedCatalog {
            file_name: file.file_name.clone(),
            rows_read,
            grid,
        })
    }

    /// Replace the session contents with a parsed catalog.
    pub fn load(&self, session: &mut InventorySession, catalog: ParsedCatalog) -> IngestionSummary {
        let ParsedCatalog {
            file_name,
            rows_read,
            grid,
        } = catalog;

        let rows_loaded = grid.rows.len();
        session.load(grid.rows, Some(file_name.clone()));

        let summary = IngestionSummary {
            file_name,
            rows_read,
            blank_rows_removed: grid.blank_rows_removed,
            discount_rows_removed: grid.discount_rows_removed,
            rows_loaded,
            items: session.items().len(),
        };

        info!(
            file_name = %summary.file_name,
            rows_read = summary.rows_read,
            blank_rows_removed = summary.blank_rows_removed,
            discount_rows_removed = summary.discount_rows_removed,
            items = summary.items,
            "Catalog loaded"
        );

        summary
    }

    pub fn execute(
        &self,
        session: &mut InventorySession,
        file: &UploadedFile,
    ) -> Result<IngestionSummary> {
        let catalog = self.parse(file)?;
        Ok(self.load(session, catalog))
    }
}
