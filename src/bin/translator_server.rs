//! xlsx-translator API Server binary
//!
//! HTTP REST API for workbook translation.

use clap::Parser;
use xlsx_translator::api::{run_api_server, server::ApiConfig};
use xlsx_translator::cli::ProviderArgs;

#[derive(Parser, Debug)]
#[command(name = "xlsx-translator-server")]
#[command(version)]
#[command(about = "xlsx-translator API Server - HTTP API for Excel workbook translation")]
#[command(long_about = r#"
xlsx-translator API Server

Endpoints:
  - POST /api/v1/translate - Translate an .xlsx request body, returns .xlsx
  - POST /api/v1/inspect   - List translatable cells of an .xlsx request body
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - Tracing and structured logging (RUST_LOG)

Example usage:
  TRANSLATOR_KEY=... TRANSLATOR_REGION=japaneast xlsx-translator-server --port 3000

  curl -X POST "http://localhost:3000/api/v1/translate?to=ja,en&from=auto" \
    --data-binary @book.xlsx -o book_translated.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TRANSLATOR_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "TRANSLATOR_PORT")]
    port: u16,

    #[command(flatten)]
    provider: ProviderArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        translator: args.provider.to_config(),
    };

    run_api_server(config).await
}
