//! Workbook pipeline
//!
//! Loads a workbook, collects the string cells of each source sheet,
//! translates them and appends one translated clone per target language.

use crate::collector::collect_cells;
use crate::error::{TranslatorError, TranslatorResult};
use crate::translator::{BatchTranslator, TranslationProvider, TranslationTable};
use crate::types::{TranslatableText, TranslateOptions};
use crate::workbook::{read_workbook, write_text, write_workbook, SheetView};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// What to translate in a workbook
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkbookRequest {
    pub options: TranslateOptions,
    /// Restrict processing to these sheets; `None` means every sheet.
    /// Repeated names are processed once.
    #[serde(default)]
    pub sheets: Option<Vec<String>>,
}

impl WorkbookRequest {
    pub fn new(options: TranslateOptions) -> Self {
        Self {
            options,
            sheets: None,
        }
    }

    pub fn with_sheets<I, S>(mut self, sheets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sheets = Some(sheets.into_iter().map(Into::into).collect());
        self
    }
}

/// Outcome for one source sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    pub sheet: String,
    /// Number of translatable cells found
    pub cells: usize,
    /// Names of the sheets created from it
    pub created: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TranslatedWorkbook {
    pub bytes: Vec<u8>,
    pub sheets: Vec<SheetSummary>,
}

impl TranslatedWorkbook {
    pub fn created_sheets(&self) -> usize {
        self.sheets.iter().map(|s| s.created.len()).sum()
    }
}

/// One source sheet and the translations produced for it
struct SheetJob {
    sheet: String,
    text: TranslatableText,
    table: Option<TranslationTable>,
}

/// Translate every selected sheet of an `.xlsx` buffer into new tabs.
///
/// The package is parsed once to collect text and again to apply the
/// results, so no workbook is held while requests are in flight.
pub async fn translate_workbook<P: TranslationProvider>(
    bytes: &[u8],
    request: &WorkbookRequest,
    translator: &BatchTranslator<P>,
) -> TranslatorResult<TranslatedWorkbook> {
    let mut jobs = plan_sheets(bytes, request)?;

    for job in &mut jobs {
        if job.text.is_empty() {
            info!(sheet = %job.sheet, "no text cells, skipping");
            continue;
        }
        info!(sheet = %job.sheet, cells = job.text.len(), "translating sheet");
        let table = translator
            .translate(&job.text.texts(), &request.options)
            .await?;
        job.table = Some(table);
    }

    apply_translations(bytes, &jobs, &request.options.unique_targets())
}

/// Resolve the sheets to process and collect their text cells
fn plan_sheets(bytes: &[u8], request: &WorkbookRequest) -> TranslatorResult<Vec<SheetJob>> {
    let workbook = read_workbook(bytes)?;

    let names = match &request.sheets {
        Some(selected) => {
            let mut names: Vec<String> = Vec::with_capacity(selected.len());
            for name in selected {
                if workbook.sheet(name).is_none() {
                    return Err(TranslatorError::SheetNotFound(name.clone()));
                }
                if !names.contains(name) {
                    names.push(name.clone());
                }
            }
            names
        }
        None => workbook.sheet_names(),
    };

    names
        .into_iter()
        .map(|name| -> TranslatorResult<SheetJob> {
            let sheet = workbook
                .sheet(&name)
                .ok_or_else(|| TranslatorError::SheetNotFound(name.clone()))?;
            Ok(SheetJob {
                text: collect_cells(sheet),
                sheet: name,
                table: None,
            })
        })
        .collect()
}

/// Append one clone per target to each translated sheet and serialize
fn apply_translations(
    bytes: &[u8],
    jobs: &[SheetJob],
    targets: &[String],
) -> TranslatorResult<TranslatedWorkbook> {
    let mut workbook = read_workbook(bytes)?;
    let mut summaries = Vec::with_capacity(jobs.len());

    for job in jobs {
        let mut summary = SheetSummary {
            sheet: job.sheet.clone(),
            cells: job.text.len(),
            created: Vec::new(),
        };

        if let Some(table) = &job.table {
            for lang in targets {
                let Some(translated) = table.get(lang) else {
                    continue;
                };
                let clone_name = workbook.unique_sheet_name(&job.sheet, lang);
                let clone = workbook.clone_sheet(&job.sheet, &clone_name)?;
                for ((coord, _), text) in job.text.entries().iter().zip(translated) {
                    write_text(clone, *coord, text);
                }
                debug!(sheet = %job.sheet, clone = %clone_name, "added translated sheet");
                summary.created.push(clone_name);
            }
        }

        summaries.push(summary);
    }

    let bytes = write_workbook(&workbook)?;
    Ok(TranslatedWorkbook {
        bytes,
        sheets: summaries,
    })
}

/// Collector view of one sheet, no translation involved
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetInspection {
    pub sheet: String,
    pub max_row: u32,
    pub max_col: u32,
    pub merged_ranges: usize,
    pub translatable_cells: usize,
    /// `(A1 reference, text)` for each collected cell
    pub cells: Vec<(String, String)>,
}

/// Run the collector over every sheet of an `.xlsx` buffer
pub fn inspect_workbook(bytes: &[u8]) -> TranslatorResult<Vec<SheetInspection>> {
    let workbook = read_workbook(bytes)?;

    Ok(workbook
        .sheets()
        .iter()
        .map(|sheet| {
            let collected = collect_cells(sheet);
            SheetInspection {
                sheet: sheet.get_name().to_string(),
                max_row: sheet.max_row(),
                max_col: sheet.max_col(),
                merged_ranges: sheet.merged_ranges().len(),
                translatable_cells: collected.len(),
                cells: collected
                    .entries()
                    .iter()
                    .map(|(coord, text)| (coord.to_a1(), text.clone()))
                    .collect(),
            }
        })
        .collect())
}
