//! Workbook access
//!
//! - Import: `.xlsx` bytes → [`Workbook`] (umya-spreadsheet)
//! - Export: [`Workbook`] → `.xlsx` bytes
//!
//! The loaded package is written back as a whole, so styles, column widths,
//! panes, comments and hyperlinks of existing sheets survive. Translation only
//! appends sheet copies and rewrites string cells on those copies.

mod exporter;
mod importer;

pub use exporter::{write_text, write_workbook};
pub use importer::{cell_value, read_workbook};

use crate::error::{TranslatorError, TranslatorResult};
use crate::types::{CellCoord, CellValue, MergedRange};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Maximum sheet name length accepted by Excel
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Read access the cell collector needs from a worksheet
pub trait SheetView {
    /// Last occupied row (1-based), 0 for an empty sheet
    fn max_row(&self) -> u32;
    /// Last occupied column (1-based), 0 for an empty sheet
    fn max_col(&self) -> u32;
    fn value(&self, coord: CellCoord) -> CellValue;
    fn merged_ranges(&self) -> Vec<MergedRange>;
}

/// A loaded `.xlsx` package, sheets in tab order
pub struct Workbook {
    book: Spreadsheet,
}

impl Workbook {
    pub(crate) fn from_spreadsheet(book: Spreadsheet) -> Self {
        Self { book }
    }

    pub(crate) fn spreadsheet(&self) -> &Spreadsheet {
        &self.book
    }

    pub fn sheets(&self) -> &[Worksheet] {
        self.book.get_sheet_collection()
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets()
            .iter()
            .map(|s| s.get_name().to_string())
            .collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets().iter().find(|s| s.get_name() == name)
    }

    /// Excel compares sheet names case-insensitively
    pub fn has_sheet_named(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.sheets()
            .iter()
            .any(|s| s.get_name().to_lowercase() == lower)
    }

    /// Name for the `lang` clone of `original`, unique within this workbook
    pub fn unique_sheet_name(&self, original: &str, lang: &str) -> String {
        let base = clone_sheet_name(original, lang);
        if !self.has_sheet_named(&base) {
            return base;
        }

        let mut n = 2;
        loop {
            let suffix = format!("~{}", n);
            let keep = MAX_SHEET_NAME_CHARS.saturating_sub(suffix.chars().count());
            let candidate: String = base.chars().take(keep).chain(suffix.chars()).collect();
            if !self.has_sheet_named(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    /// Append a full copy of `source` (values, styles, merges, layout) as `name`
    pub fn clone_sheet(&mut self, source: &str, name: &str) -> TranslatorResult<&mut Worksheet> {
        let mut copy = self
            .sheet(source)
            .ok_or_else(|| TranslatorError::SheetNotFound(source.to_string()))?
            .clone();
        copy.set_name(name);

        self.book.add_sheet(copy).map_err(|e| {
            TranslatorError::Workbook(format!("Failed to add sheet '{}': {}", name, e))
        })
    }
}

/// `"<original>_<lang>"` truncated to the sheet name limit
pub fn clone_sheet_name(original: &str, lang: &str) -> String {
    format!("{}_{}", original, lang)
        .chars()
        .take(MAX_SHEET_NAME_CHARS)
        .collect()
}
