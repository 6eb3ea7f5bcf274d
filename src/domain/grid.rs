// ============================================================
// GRID TYPES
// ============================================================
// Cell values as they come out of a decoded sheet, and the
// normalization into the trimmed string grid used everywhere else.

use serde::{Deserialize, Serialize};

/// A row of normalized cells. Rows may differ in length.
pub type Row = Vec<String>;

/// A single decoded cell, before normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Integer(i64),
    Bool(bool),
    /// Dates, durations and error cells, already rendered by the decoder
    Other(String),
}

impl CellValue {
    /// Trimmed string representation; blank cells become `""`
    pub fn to_trimmed_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::Other(s) => s.trim().to_string(),
            // f64 Display is shortest round-trip: 1.0 -> "1", 0.25 -> "0.25"
            CellValue::Number(n) => n.to_string(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Bool(b) => b.to_string(),
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) | CellValue::Other(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// Decoded first sheet: rows of raw cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawGrid {
    pub rows: Vec<Vec<CellValue>>,
}

impl RawGrid {
    pub fn new(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drop rows where every cell is blank and coerce the rest to trimmed strings.
pub fn trim_grid(raw: &RawGrid) -> Vec<Row> {
    raw.rows
        .iter()
        .filter(|row| row.iter().any(|cell| !cell.is_blank()))
        .map(|row| row.iter().map(CellValue::to_trimmed_string).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_number_rendering() {
        assert_eq!(CellValue::Number(1.0).to_trimmed_string(), "1");
        assert_eq!(CellValue::Number(0.25).to_trimmed_string(), "0.25");
        assert_eq!(CellValue::Number(-3.5).to_trimmed_string(), "-3.5");
        assert_eq!(CellValue::Integer(42).to_trimmed_string(), "42");
        assert_eq!(CellValue::Bool(true).to_trimmed_string(), "true");
    }

    #[test]
    fn test_text_is_trimmed() {
        assert_eq!(text("  Arroz 1kg \t").to_trimmed_string(), "Arroz 1kg");
        assert_eq!(CellValue::Empty.to_trimmed_string(), "");
    }

    #[test]
    fn test_blank_rows_removed() {
        let raw = RawGrid::new(vec![
            vec![text("Producto"), text("Precio")],
            vec![CellValue::Empty, text("   ")],
            vec![],
            vec![text("Arroz"), CellValue::Number(2.5)],
        ]);

        let trimmed = trim_grid(&raw);

        assert_eq!(
            trimmed,
            vec![
                vec!["Producto".to_string(), "Precio".to_string()],
                vec!["Arroz".to_string(), "2.5".to_string()],
            ]
        );
    }

    #[test]
    fn test_zero_is_not_blank() {
        let raw = RawGrid::new(vec![vec![CellValue::Empty, CellValue::Number(0.0)]]);
        assert_eq!(trim_grid(&raw), vec![vec![String::new(), "0".to_string()]]);
    }

    #[test]
    fn test_row_lengths_preserved() {
        let raw = RawGrid::new(vec![
            vec![text("a")],
            vec![text("b"), text("c"), text("d")],
        ]);
        let trimmed = trim_grid(&raw);
        assert_eq!(trimmed[0].len(), 1);
        assert_eq!(trimmed[1].len(), 3);
    }
}
