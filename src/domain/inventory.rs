use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};
use super::grid::Row;

/// A catalog row together with the quantity the user wants to order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub cells: Row,
    pub quantity: u32,
}

impl InventoryItem {
    fn new(cells: Row) -> Self {
        Self { cells, quantity: 0 }
    }

    /// First cell of the row, the product name in catalog exports
    pub fn product(&self) -> &str {
        self.cells.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub index: usize,
    pub product: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexedItem<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub item: &'a InventoryItem,
}

/// Serializable snapshot of the session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView<'a> {
    pub source_name: Option<&'a str>,
    pub header: Option<&'a Row>,
    pub items: Vec<IndexedItem<'a>>,
    pub row_count: usize,
}

/// The loaded catalog: header row, item rows and their quantities.
///
/// Item indices are zero-based and exclude the header, so item `i`
/// corresponds to row `i + 1` of the cleaned grid.
#[derive(Debug, Clone, Default)]
pub struct InventorySession {
    source_name: Option<String>,
    header: Option<Row>,
    items: Vec<InventoryItem>,
}

impl InventorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole session with a freshly cleaned grid. Quantities restart at zero.
    pub fn load(&mut self, rows: Vec<Row>, source_name: Option<String>) {
        let mut rows = rows.into_iter();
        self.header = rows.next();
        self.items = rows.map(InventoryItem::new).collect();
        self.source_name = source_name;
    }

    /// Forget the loaded catalog
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no rows (not even a header) are loaded
    pub fn is_empty(&self) -> bool {
        self.header.is_none()
    }

    /// Rows in the cleaned grid, header included
    pub fn row_count(&self) -> usize {
        self.header.as_ref().map_or(0, |_| 1 + self.items.len())
    }

    pub fn source_name(&self) -> Option<&str> {
        self.source_name.as_deref()
    }

    pub fn header(&self) -> Option<&Row> {
        self.header.as_ref()
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    /// The cleaned grid in row order, header first
    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.header
            .iter()
            .chain(self.items.iter().map(|item| &item.cells))
    }

    pub fn quantities(&self) -> Vec<u32> {
        self.items.iter().map(|item| item.quantity).collect()
    }

    pub fn item(&self, index: usize) -> Result<&InventoryItem> {
        self.items.get(index).ok_or_else(|| self.out_of_range(index))
    }

    pub fn set_quantity(&mut self, index: usize, quantity: u32) -> Result<()> {
        let err = self.out_of_range(index);
        let item = self.items.get_mut(index).ok_or(err)?;
        item.quantity = quantity;
        Ok(())
    }

    /// Zero every quantity, keeping the catalog
    pub fn reset_quantities(&mut self) {
        for item in &mut self.items {
            item.quantity = 0;
        }
    }

    pub fn order_line(&self, index: usize) -> Result<OrderLine> {
        let item = self.item(index)?;
        Ok(OrderLine {
            index,
            product: item.product().to_string(),
            quantity: item.quantity,
        })
    }

    /// Every item with a non-zero quantity
    pub fn order(&self) -> Vec<OrderLine> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.quantity > 0)
            .map(|(index, item)| OrderLine {
                index,
                product: item.product().to_string(),
                quantity: item.quantity,
            })
            .collect()
    }

    /// Case-insensitive substring match on the product cell. A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<IndexedItem<'_>> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| needle.is_empty() || item.product().to_lowercase().contains(&needle))
            .map(|(index, item)| IndexedItem { index, item })
            .collect()
    }

    pub fn view(&self) -> InventoryView<'_> {
        InventoryView {
            source_name: self.source_name(),
            header: self.header(),
            items: self
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| IndexedItem { index, item })
                .collect(),
            row_count: self.row_count(),
        }
    }

    fn out_of_range(&self, index: usize) -> AppError {
        AppError::ValidationError(format!(
            "Item index {} out of range ({} items loaded)",
            index,
            self.items.len()
        ))
    }
}

/// Reads a quantity typed by the user.
///
/// Blank, non-numeric, negative and non-finite input all read as 0;
/// fractions truncate toward zero and huge values saturate.
pub fn parse_quantity_input(input: &str) -> u32 {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return 0;
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u32,
        _ => 0,
    }
}
