//! Cell collector - finds the string cells of a worksheet that need translating

use crate::types::{CellCoord, TranslatableText};
use crate::workbook::SheetView;
use std::collections::HashSet;

/// Collect every string cell of `sheet` in row-major order.
///
/// Cells covered by a merged range are skipped unless they are its top-left
/// corner. Numbers, dates, booleans, errors and empty cells never appear.
pub fn collect_cells<S: SheetView + ?Sized>(sheet: &S) -> TranslatableText {
    let shadows: HashSet<CellCoord> = sheet
        .merged_ranges()
        .iter()
        .flat_map(|range| range.shadow_cells())
        .collect();

    let mut collected = TranslatableText::new();
    for row in 1..=sheet.max_row() {
        for col in 1..=sheet.max_col() {
            let coord = CellCoord::new(row, col);
            if shadows.contains(&coord) {
                continue;
            }
            if let Some(text) = sheet.value(coord).as_text() {
                collected.push(coord, text.to_string());
            }
        }
    }

    collected
}
