use serde::{Deserialize, Serialize};
use std::fmt;

//==============================================================================
// Grid Coordinates
//==============================================================================

/// A cell position in a worksheet, 1-based on both axes.
///
/// Ordering is row-major, which is also the collector's scan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Convert a 1-based column number to its Excel letter
    ///
    /// Examples:
    /// - 1 → A
    /// - 26 → Z
    /// - 27 → AA
    pub fn column_letter(col: u32) -> String {
        let mut result = String::new();
        let mut idx = col.saturating_sub(1);

        loop {
            let remainder = (idx % 26) as u8;
            result.insert(0, (b'A' + remainder) as char);
            if idx < 26 {
                break;
            }
            idx = idx / 26 - 1;
        }

        result
    }

    /// A1-style reference (`B3` for row 3, column 2)
    pub fn to_a1(&self) -> String {
        format!("{}{}", Self::column_letter(self.col), self.row)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Rectangle of merged cells (1-based, inclusive bounds).
///
/// Only the top-left corner holds a value; the other cells are shadows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MergedRange {
    pub min_row: u32,
    pub min_col: u32,
    pub max_row: u32,
    pub max_col: u32,
}

impl MergedRange {
    pub fn new(min_row: u32, min_col: u32, max_row: u32, max_col: u32) -> Self {
        Self {
            min_row,
            min_col,
            max_row,
            max_col,
        }
    }

    pub fn top_left(&self) -> CellCoord {
        CellCoord::new(self.min_row, self.min_col)
    }

    pub fn contains(&self, coord: CellCoord) -> bool {
        (self.min_row..=self.max_row).contains(&coord.row)
            && (self.min_col..=self.max_col).contains(&coord.col)
    }

    /// Every covered coordinate except the top-left corner
    pub fn shadow_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let top_left = self.top_left();
        (self.min_row..=self.max_row)
            .flat_map(move |row| (self.min_col..=self.max_col).map(move |col| CellCoord::new(row, col)))
            .filter(move |coord| *coord != top_left)
    }

    pub fn is_single_cell(&self) -> bool {
        self.min_row == self.max_row && self.min_col == self.max_col
    }
}

impl fmt::Display for MergedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.top_left(),
            CellCoord::new(self.max_row, self.max_col)
        )
    }
}

//==============================================================================
// Cell Values
//==============================================================================

/// Numeric cell whose number format renders it as a date or time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DateValue {
    /// Excel serial number (days since 1899-12-30)
    pub serial: f64,
    /// Elapsed-time format such as `[h]:mm:ss`
    pub duration: bool,
}

/// Typed content of a single cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Date(DateValue),
    /// Cached formula error such as `#DIV/0!`
    Error(String),
    #[default]
    Empty,
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }
}

//==============================================================================
// Translatable Text Set
//==============================================================================

/// String cells of one worksheet in row-major scan order.
///
/// Translation results are aligned positionally with this order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslatableText {
    entries: Vec<(CellCoord, String)>,
}

impl TranslatableText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, coord: CellCoord, text: String) {
        self.entries.push((coord, text));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(CellCoord, String)] {
        &self.entries
    }

    pub fn texts(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, text)| text.as_str()).collect()
    }

    pub fn coords(&self) -> Vec<CellCoord> {
        self.entries.iter().map(|(coord, _)| *coord).collect()
    }

    /// Split into the `(texts, coordinates)` pair handed to the translator
    pub fn into_parts(self) -> (Vec<String>, Vec<CellCoord>) {
        self.entries
            .into_iter()
            .map(|(coord, text)| (text, coord))
            .unzip()
    }
}

//==============================================================================
// Translation Options
//==============================================================================

/// How the provider should interpret the submitted text
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TextType {
    #[default]
    Plain,
    Html,
}

impl TextType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextType::Plain => "plain",
            TextType::Html => "html",
        }
    }
}

impl fmt::Display for TextType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of one `translate` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslateOptions {
    /// Target language codes, in request order
    pub targets: Vec<String>,
    /// Source language; `None` or `"auto"` lets the provider detect it
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub text_type: TextType,
    /// Custom Translator category id
    #[serde(default)]
    pub category: Option<String>,
}

impl TranslateOptions {
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_text_type(mut self, text_type: TextType) -> Self {
        self.text_type = text_type;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Explicit source language, or `None` when detection was requested
    pub fn source_language(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("auto"))
    }

    pub fn category_id(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Targets with blanks and duplicates removed, first occurrence kept
    pub fn unique_targets(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for target in &self.targets {
            let target = target.trim();
            if !target.is_empty() && !seen.iter().any(|s: &String| s.eq_ignore_ascii_case(target)) {
                seen.push(target.to_string());
            }
        }
        seen
    }
}
