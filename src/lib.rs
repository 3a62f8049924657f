//! xlsx-translator - translate Excel workbooks into per-language sheet tabs
//!
//! Every string cell of a worksheet is collected (merged ranges contribute
//! only their top-left cell), translated through the Azure Translator batch
//! endpoint, and written back onto a clone of the sheet named
//! `<sheet>_<lang>`.
//!
//! # Example
//!
//! ```no_run
//! use xlsx_translator::pipeline::{translate_workbook, WorkbookRequest};
//! use xlsx_translator::translator::BatchTranslator;
//! use xlsx_translator::{TranslateOptions, TranslatorConfig};
//!
//! # async fn run() -> xlsx_translator::TranslatorResult<()> {
//! let config = TranslatorConfig::new(
//!     "https://api.cognitive.microsofttranslator.com",
//!     "<subscription key>",
//!     "japaneast",
//! );
//! let translator = BatchTranslator::azure(config);
//! let request = WorkbookRequest::new(TranslateOptions::new(["ja", "en"]));
//!
//! let bytes = std::fs::read("book.xlsx")?;
//! let translated = translate_workbook(&bytes, &request, &translator).await?;
//! std::fs::write("book_translated.xlsx", &translated.bytes)?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod translator;
pub mod types;
pub mod workbook;

// Re-export commonly used types
pub use collector::collect_cells;
pub use config::TranslatorConfig;
pub use error::{TranslatorError, TranslatorResult};
pub use translator::{BatchTranslator, TranslationTable};
pub use types::{CellCoord, CellValue, MergedRange, TextType, TranslatableText, TranslateOptions};
