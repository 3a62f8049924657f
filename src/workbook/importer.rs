//! Workbook importer - `.xlsx` bytes → [`Workbook`], plus the typed cell view
//! the collector reads through

use super::{SheetView, Workbook};
use crate::error::{TranslatorError, TranslatorResult};
use crate::types::{CellCoord, CellValue, DateValue, MergedRange};
use std::io::Cursor;
use tracing::debug;
use umya_spreadsheet::helper::coordinate::index_from_coordinate;
use umya_spreadsheet::{Cell, Worksheet};

/// Parse an `.xlsx` buffer, every sheet loaded eagerly.
pub fn read_workbook(bytes: &[u8]) -> TranslatorResult<Workbook> {
    let book = umya_spreadsheet::reader::xlsx::read_reader(Cursor::new(bytes), true)
        .map_err(|e| TranslatorError::InvalidInput(format!("Failed to open Excel file: {}", e)))?;

    let workbook = Workbook::from_spreadsheet(book);
    for sheet in workbook.sheets() {
        debug!(
            sheet = %sheet.get_name(),
            cells = sheet.get_cell_collection().len(),
            merged = sheet.get_merge_cells().len(),
            "loaded sheet"
        );
    }
    Ok(workbook)
}

impl SheetView for Worksheet {
    fn max_row(&self) -> u32 {
        self.get_highest_row()
    }

    fn max_col(&self) -> u32 {
        self.get_highest_column()
    }

    fn value(&self, coord: CellCoord) -> CellValue {
        self.get_cell((coord.col, coord.row))
            .map(cell_value)
            .unwrap_or_default()
    }

    fn merged_ranges(&self) -> Vec<MergedRange> {
        self.get_merge_cells()
            .iter()
            .filter_map(|range| parse_range(&range.get_range()))
            .collect()
    }
}

/// Typed value of a cell; formula cells report their cached result
pub fn cell_value(cell: &Cell) -> CellValue {
    match cell.get_data_type() {
        "s" | "str" | "inlineStr" => CellValue::String(cell.get_value().into_owned()),
        "b" => {
            let value = cell.get_value();
            CellValue::Boolean(value.eq_ignore_ascii_case("true") || value == "1")
        }
        "e" => CellValue::Error(cell.get_value().into_owned()),
        "n" => match cell.get_value_number() {
            Some(number) => {
                let format = cell
                    .get_style()
                    .get_number_format()
                    .map(|f| f.get_format_code().to_string());
                match format.as_deref().and_then(date_format_kind) {
                    Some(duration) => CellValue::Date(DateValue {
                        serial: number,
                        duration,
                    }),
                    None => CellValue::Number(number),
                }
            }
            None => CellValue::Empty,
        },
        _ => CellValue::Empty,
    }
}

/// `Some(is_duration)` when a number format code renders dates or times
fn date_format_kind(code: &str) -> Option<bool> {
    let mut plain = String::new();
    let mut duration = false;
    let mut in_quotes = false;
    let mut chars = code.chars();

    while let Some(c) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '\\' => {
                chars.next();
            }
            '[' => {
                // colors, locales and conditions, or elapsed-time tokens
                let inner: String = chars.by_ref().take_while(|&c| c != ']').collect();
                let inner = inner.to_ascii_lowercase();
                if !inner.is_empty() && inner.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    duration = true;
                }
            }
            _ => plain.push(c.to_ascii_lowercase()),
        }
    }

    if duration {
        Some(true)
    } else if plain.contains(['y', 'm', 'd', 'h', 's']) {
        Some(false)
    } else {
        None
    }
}

/// `"B2:D4"` (or a lone `"B2"`) as a 1-based range
fn parse_range(reference: &str) -> Option<MergedRange> {
    let (start, end) = reference.split_once(':').unwrap_or((reference, reference));
    let (Some(min_col), Some(min_row), _, _) = index_from_coordinate(start) else {
        return None;
    };
    let (Some(max_col), Some(max_row), _, _) = index_from_coordinate(end) else {
        return None;
    };
    Some(MergedRange::new(
        min_row.min(max_row),
        min_col.min(max_col),
        min_row.max(max_row),
        min_col.max(max_col),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bytes_are_invalid_input() {
        assert!(matches!(
            read_workbook(b"not a zip"),
            Err(TranslatorError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_cell_values_are_typed() {
        let mut book = umya_spreadsheet::new_file();
        let sheet = book.get_sheet_by_name_mut("Sheet1").unwrap();
        sheet.get_cell_mut("A1").set_value_string("text");
        sheet.get_cell_mut("B1").set_value_number(2.5);
        sheet.get_cell_mut("C1").set_value_bool(true);
        sheet.get_cell_mut("D1").set_value_number(45000);
        sheet
            .get_style_mut("D1")
            .get_number_format_mut()
            .set_format_code("yyyy-mm-dd");

        assert_eq!(sheet.value(CellCoord::new(1, 1)), CellValue::String("text".into()));
        assert_eq!(sheet.value(CellCoord::new(1, 2)), CellValue::Number(2.5));
        assert_eq!(sheet.value(CellCoord::new(1, 3)), CellValue::Boolean(true));
        assert_eq!(
            sheet.value(CellCoord::new(1, 4)),
            CellValue::Date(DateValue {
                serial: 45000.0,
                duration: false
            })
        );
        assert_eq!(sheet.value(CellCoord::new(9, 9)), CellValue::Empty);
        assert_eq!((sheet.max_row(), sheet.max_col()), (1, 4));
    }

    #[test]
    fn test_date_format_detection() {
        assert_eq!(date_format_kind("yyyy-mm-dd"), Some(false));
        assert_eq!(date_format_kind("h:mm AM/PM"), Some(false));
        assert_eq!(date_format_kind("[h]:mm:ss"), Some(true));
        assert_eq!(date_format_kind("[Red]0.00"), None);
        assert_eq!(date_format_kind("0.00%"), None);
        assert_eq!(date_format_kind("General"), None);
        assert_eq!(date_format_kind("#,##0 \"days\""), None);
    }

    #[test]
    fn test_parse_range() {
        assert_eq!(parse_range("B2:D4"), Some(MergedRange::new(2, 2, 4, 4)));
        assert_eq!(parse_range("C3"), Some(MergedRange::new(3, 3, 3, 3)));
        assert_eq!(parse_range("nonsense"), None);
    }
}
