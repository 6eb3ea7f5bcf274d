pub mod inventory_export;
pub mod inventory_ingestion;
pub mod table_extraction;
