// ============================================================
// DISCOUNT ROW CLEANER
// ============================================================
// Catalog exports interleave per-item discount tiers (four fractional
// multipliers) among the item rows, with no type marker. A row whose
// first four cells are all fractions in (0, 1) is one of those.

use super::grid::{trim_grid, RawGrid, Row};

/// Number of leading cells inspected by the discount heuristic
pub const DISCOUNT_PROBE_CELLS: usize = 4;

/// Result of cleaning a decoded sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanedGrid {
    pub rows: Vec<Row>,
    pub blank_rows_removed: usize,
    pub discount_rows_removed: usize,
}

/// Non-empty cell whose leading number, with the first `,` read as `.`, lies in (0, 1).
pub fn is_decimal_fraction(cell: &str) -> bool {
    if cell.is_empty() {
        return false;
    }

    let normalized = cell.replacen(',', ".", 1);
    match leading_float(&normalized) {
        Some(n) => n > 0.0 && n < 1.0,
        None => false,
    }
}

/// Parses the longest numeric prefix, so `"0.5%"` reads as 0.5.
fn leading_float(text: &str) -> Option<f64> {
    match fast_float2::parse_partial::<f64, _>(text.trim_start()) {
        Ok((value, consumed)) if consumed > 0 => Some(value),
        _ => None,
    }
}

/// Missing cells count as empty, which never classify as fractions.
pub fn is_discount_row(row: &[String]) -> bool {
    (0..DISCOUNT_PROBE_CELLS).all(|i| row.get(i).is_some_and(|cell| is_decimal_fraction(cell)))
}

/// Keep every row that is not a discount row, in order.
pub fn remove_discount_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().filter(|row| !is_discount_row(row)).collect()
}

/// Trim, drop blank rows, then drop discount rows.
pub fn clean_grid(raw: &RawGrid) -> CleanedGrid {
    let trimmed = trim_grid(raw);
    let blank_rows_removed = raw.len() - trimmed.len();
    let before = trimmed.len();
    let rows = remove_discount_rows(trimmed);

    CleanedGrid {
        discount_rows_removed: before - rows.len(),
        blank_rows_removed,
        rows,
    }
}
