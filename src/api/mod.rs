//! Translator API Server module
//!
//! HTTP front end for the workbook pipeline.
//! Run with `xlsx-translator-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};
