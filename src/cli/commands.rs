use crate::error::{TranslatorError, TranslatorResult};
use crate::pipeline::{inspect_workbook, translate_workbook, WorkbookRequest};
use crate::translator::BatchTranslator;
use crate::types::{TextType, TranslateOptions};
use crate::TranslatorConfig;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Install the tracing subscriber (`RUST_LOG` wins over `verbose`)
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "xlsx_translator=debug"
    } else {
        "xlsx_translator=warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Default output path: `<stem>_translated.xlsx` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "workbook".to_string());
    input.with_file_name(format!("{}_translated.xlsx", stem))
}

/// Inputs of the translate command
#[derive(Debug, Clone)]
pub struct TranslateCommand {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub targets: Vec<String>,
    pub source: Option<String>,
    pub text_type: TextType,
    pub category: Option<String>,
    pub sheets: Vec<String>,
    pub config: TranslatorConfig,
}

/// Execute the translate command
pub async fn translate(cmd: TranslateCommand) -> TranslatorResult<()> {
    let output = cmd
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cmd.input));

    println!("{}", "🌐 Translating workbook".bold().green());
    println!("   Input:  {}", cmd.input.display());
    println!("   Output: {}", output.display());
    println!("   To:     {}", cmd.targets.join(", ").bright_yellow());
    println!(
        "   From:   {}\n",
        cmd.source.as_deref().unwrap_or("auto")
    );

    let mut options = TranslateOptions::new(cmd.targets.iter().cloned()).with_text_type(cmd.text_type);
    options.source = cmd.source.clone();
    options.category = cmd.category.clone();
    if options.unique_targets().is_empty() {
        return Err(TranslatorError::InvalidInput(
            "at least one target language is required".to_string(),
        ));
    }

    let mut request = WorkbookRequest::new(options);
    if !cmd.sheets.is_empty() {
        request = request.with_sheets(cmd.sheets.iter().cloned());
    }

    let bytes = fs::read(&cmd.input)?;
    let translator = BatchTranslator::azure(cmd.config);
    let result = translate_workbook(&bytes, &request, &translator).await?;

    for summary in &result.sheets {
        if summary.created.is_empty() {
            println!("   {} {} (no text cells)", "⏭".dimmed(), summary.sheet.dimmed());
        } else {
            println!(
                "   📄 {} - {} cells → {}",
                summary.sheet.bright_blue(),
                summary.cells,
                summary.created.join(", ")
            );
        }
    }

    fs::write(&output, &result.bytes)?;

    println!();
    println!("{}", "✅ Translation complete!".bold().green());
    println!(
        "   {} new sheet(s) written to {}\n",
        result.created_sheets(),
        output.display()
    );

    Ok(())
}

/// Execute the inspect command
pub fn inspect(input: PathBuf, verbose: bool) -> TranslatorResult<()> {
    println!("{}", "🔍 Inspecting workbook".bold().green());
    println!("   File: {}\n", input.display());

    let bytes = fs::read(&input)?;
    let sheets = inspect_workbook(&bytes)?;

    for sheet in &sheets {
        println!(
            "   📄 {} - {} text cells ({} rows × {} cols, {} merged ranges)",
            sheet.sheet.bright_blue(),
            sheet.translatable_cells,
            sheet.max_row,
            sheet.max_col,
            sheet.merged_ranges
        );
        if verbose {
            for (reference, text) in &sheet.cells {
                println!("      {:>8}  {}", reference.cyan(), text);
            }
        }
    }

    let total: usize = sheets.iter().map(|s| s.translatable_cells).sum();
    println!();
    println!(
        "{}",
        format!("✅ {} sheet(s), {} translatable cells", sheets.len(), total)
            .bold()
            .green()
    );

    Ok(())
}
