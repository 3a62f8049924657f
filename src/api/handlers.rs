//! API request handlers
//!
//! Handlers for all REST API endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TranslatorError;
use crate::pipeline::{inspect_workbook, translate_workbook, SheetInspection, WorkbookRequest};
use crate::translator::BatchTranslator;
use crate::types::{TextType, TranslateOptions};

use super::server::AppState;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const OUTPUT_FILE_NAME: &str = "all_sheets_translated.xlsx";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// HTTP status for a failed request
pub fn error_status(err: &TranslatorError) -> StatusCode {
    if err.is_input_error() {
        StatusCode::BAD_REQUEST
    } else if err.is_provider_error() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

fn error_response(err: &TranslatorError) -> Response {
    tracing::warn!(error = %err, "request failed");
    (
        error_status(err),
        Json(ApiResponse::<()>::err(err.to_string())),
    )
        .into_response()
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

fn endpoint(path: &str, method: &str, description: &str) -> EndpointInfo {
    EndpointInfo {
        path: path.to_string(),
        method: method.to_string(),
        description: description.to_string(),
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(RootResponse {
        name: "xlsx-translator API Server".to_string(),
        version: state.version.clone(),
        description: "Translate Excel workbooks into per-language sheets".to_string(),
        endpoints: vec![
            endpoint("/health", "GET", "Health check endpoint"),
            endpoint("/version", "GET", "Get server version"),
            endpoint(
                "/api/v1/inspect",
                "POST",
                "List translatable cells of an uploaded .xlsx body",
            ),
            endpoint(
                "/api/v1/translate",
                "POST",
                "Translate an uploaded .xlsx body (?to=ja,en&from=auto&text_type=plain)",
            ),
        ],
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub credentials_configured: bool,
}

/// GET /health - Health check
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        credentials_configured: state.translator.credentials().is_ok(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["translate".to_string(), "inspect".to_string()],
    }))
}

/// Inspect response
#[derive(Serialize, Default)]
pub struct InspectResponse {
    pub sheets: Vec<SheetInspection>,
    pub translatable_cells: usize,
}

/// POST /api/v1/inspect - Collect text cells of an uploaded workbook
pub async fn inspect(body: Bytes) -> Response {
    match inspect_workbook(&body) {
        Ok(sheets) => {
            let translatable_cells = sheets.iter().map(|s| s.translatable_cells).sum();
            Json(ApiResponse::ok(InspectResponse {
                sheets,
                translatable_cells,
            }))
            .into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Query parameters of the translate endpoint
#[derive(Debug, Deserialize)]
pub struct TranslateQuery {
    /// Comma-separated target languages
    pub to: String,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub text_type: Option<TextType>,
    #[serde(default)]
    pub category: Option<String>,
    /// Comma-separated sheet names to restrict processing to
    #[serde(default)]
    pub sheets: Option<String>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl TranslateQuery {
    pub fn to_request(&self) -> Result<WorkbookRequest, TranslatorError> {
        let targets = split_list(&self.to);
        if targets.is_empty() {
            return Err(TranslatorError::InvalidInput(
                "at least one target language is required".to_string(),
            ));
        }

        let options = TranslateOptions {
            targets,
            source: self.from.clone(),
            text_type: self.text_type.unwrap_or_default(),
            category: self.category.clone(),
        };

        let mut request = WorkbookRequest::new(options);
        if let Some(sheets) = &self.sheets {
            let sheets = split_list(sheets);
            if !sheets.is_empty() {
                request = request.with_sheets(sheets);
            }
        }
        Ok(request)
    }
}

/// POST /api/v1/translate - Translate an uploaded workbook
pub async fn translate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TranslateQuery>,
    body: Bytes,
) -> Response {
    let request = match query.to_request() {
        Ok(request) => request,
        Err(e) => return error_response(&e),
    };

    let translator = BatchTranslator::azure(state.translator.clone());
    match translate_workbook(&body, &request, &translator).await {
        Ok(result) => {
            tracing::info!(
                sheets = result.sheets.len(),
                created = result.created_sheets(),
                "workbook translated"
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", OUTPUT_FILE_NAME),
                    ),
                ],
                result.bytes,
            )
                .into_response()
        }
        Err(e) => error_response(&e),
    }
}
