pub mod use_cases;

pub use use_cases::inventory_export::InventoryExportUseCase;
pub use use_cases::inventory_ingestion::InventoryIngestionUseCase;
pub use use_cases::table_extraction::TableExtractionUseCase;
