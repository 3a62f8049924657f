//! Workbook exporter - [`Workbook`] → `.xlsx` bytes

use super::Workbook;
use crate::error::{TranslatorError, TranslatorResult};
use crate::types::CellCoord;
use std::io::Cursor;
use umya_spreadsheet::Worksheet;

/// Serialize the whole package, sheets in tab order
pub fn write_workbook(workbook: &Workbook) -> TranslatorResult<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(workbook.spreadsheet(), &mut cursor)
        .map_err(|e| TranslatorError::Workbook(format!("Failed to save Excel file: {}", e)))?;
    Ok(cursor.into_inner())
}

/// Replace the value of a cell with `text`, keeping its style.
///
/// A formula on the cell is dropped so the text is what Excel shows.
pub fn write_text(sheet: &mut Worksheet, coord: CellCoord, text: &str) {
    let cell = sheet.get_cell_mut((coord.col, coord.row));
    cell.get_cell_value_mut().remove_formula();
    cell.set_value_string(text);
}
