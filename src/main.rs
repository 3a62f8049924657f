use clap::{Parser, Subcommand};
use std::path::PathBuf;
use xlsx_translator::cli::{self, ProviderArgs, TranslateCommand};
use xlsx_translator::error::TranslatorResult;
use xlsx_translator::TextType;

#[derive(Parser)]
#[command(name = "xlsx-translator")]
#[command(about = "Translate every text cell of an Excel workbook into new per-language sheets.")]
#[command(long_about = "xlsx-translator - Excel workbook translation via Azure Translator

Each sheet with text cells gets one new tab per target language, named
<sheet>_<lang> (max 31 characters). Merged cells keep their layout; only the
top-left cell of a merged range is translated. Numbers, dates, booleans and
errors are left untouched.

COMMANDS:
  translate - Translate a workbook into one or more languages
  inspect   - List the text cells that would be translated (no network)

CONFIGURATION:
  TRANSLATOR_KEY       Subscription key (or --key)
  TRANSLATOR_REGION    Resource region (or --region)
  TRANSLATOR_ENDPOINT  Endpoint URL (or --endpoint)

EXAMPLES:
  xlsx-translator translate book.xlsx --to ja --to en
  xlsx-translator translate book.xlsx -o out.xlsx --to ko --from zh-Hant
  xlsx-translator inspect book.xlsx -v")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a workbook into new per-language sheets
    Translate {
        /// Path to the .xlsx file
        input: PathBuf,

        /// Output path (default: <input>_translated.xlsx)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Target language code (repeatable, or comma-separated)
        #[arg(short, long = "to", required = true, value_delimiter = ',')]
        targets: Vec<String>,

        /// Source language code, or "auto" for detection
        #[arg(short = 'f', long = "from", default_value = "auto")]
        source: String,

        /// How the provider should treat cell text
        #[arg(long, value_enum, default_value_t = TextType::Plain)]
        text_type: TextType,

        /// Custom Translator category id
        #[arg(long)]
        category: Option<String>,

        /// Only translate these sheets (repeatable)
        #[arg(short, long = "sheet")]
        sheets: Vec<String>,

        /// Show debug logging
        #[arg(short, long)]
        verbose: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Show translatable cells per sheet without calling the provider
    Inspect {
        /// Path to the .xlsx file
        input: PathBuf,

        /// List every collected cell
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> TranslatorResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Translate {
            input,
            output,
            targets,
            source,
            text_type,
            category,
            sheets,
            verbose,
            provider,
        } => {
            cli::init_tracing(verbose);
            cli::translate(TranslateCommand {
                input,
                output,
                targets,
                source: Some(source),
                text_type,
                category,
                sheets,
                config: provider.to_config(),
            })
            .await
        }

        Commands::Inspect { input, verbose } => {
            cli::init_tracing(false);
            cli::inspect(input, verbose)
        }
    }
}
