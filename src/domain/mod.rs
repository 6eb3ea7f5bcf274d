// ============================================================
// DOMAIN LAYER
// ============================================================
// Grid normalization, discount-row cleaning and the inventory session.
// No I/O, no async.

pub mod cleaner;
pub mod error;
pub mod grid;
pub mod inventory;
pub mod upload;

pub use cleaner::CleanedGrid;
pub use grid::{CellValue, RawGrid, Row};
pub use inventory::{InventoryItem, InventorySession, OrderLine};
pub use upload::UploadedFile;
