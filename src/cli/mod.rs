//! CLI command handlers

pub mod args;
pub mod commands;

pub use args::ProviderArgs;
pub use commands::{init_tracing, inspect, translate, TranslateCommand};
