//! Shared fixtures: scripted translation provider, local HTTP stub, workbook builders

#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{body::Bytes, extract::RawQuery, http::HeaderMap, http::StatusCode, routing::post, Router};
use rust_xlsxwriter::{Format, Workbook};
use serde_json::{json, Value};
use xlsx_translator::translator::{
    BatchRequest, ProviderSession, RawResponse, RetryPolicy, TranslationProvider,
};
use xlsx_translator::TranslatorResult;

// ═══════════════════════════════════════════════════════════════════════════
// SCRIPTED PROVIDER
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct StubState {
    scripted: VecDeque<Result<RawResponse, String>>,
    requests: Vec<BatchRequest>,
    sessions: usize,
}

/// Provider that replays scripted responses, then echoes `<text>_<lang>`
#[derive(Clone, Default)]
pub struct StubProvider {
    state: Arc<Mutex<StubState>>,
}

impl StubProvider {
    pub fn echo() -> Self {
        Self::default()
    }

    /// Queue a status response returned before echoing starts
    pub fn then_status(self, status: u16, body: &str) -> Self {
        self.state.lock().unwrap().scripted.push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    /// Queue a transport failure
    pub fn then_transport_error(self, cause: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .scripted
            .push_back(Err(cause.to_string()));
        self
    }

    pub fn requests(&self) -> Vec<BatchRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn sessions_opened(&self) -> usize {
        self.state.lock().unwrap().sessions
    }
}

pub struct StubSession {
    state: Arc<Mutex<StubState>>,
}

impl TranslationProvider for StubProvider {
    type Session = StubSession;

    fn open_session(&self) -> TranslatorResult<StubSession> {
        self.state.lock().unwrap().sessions += 1;
        Ok(StubSession {
            state: Arc::clone(&self.state),
        })
    }
}

#[async_trait]
impl ProviderSession for StubSession {
    async fn post_batch(&self, request: &BatchRequest) -> Result<RawResponse, String> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        if let Some(scripted) = state.scripted.pop_front() {
            return scripted;
        }
        Ok(RawResponse {
            status: 200,
            body: echo_body(&request.texts, &request.targets).to_string(),
        })
    }
}

/// Azure-shaped response translating each text as `<text>_<lang>`
pub fn echo_body(texts: &[String], targets: &[String]) -> Value {
    Value::Array(
        texts
            .iter()
            .map(|text| {
                json!({
                    "translations": targets
                        .iter()
                        .map(|lang| json!({"to": lang, "text": format!("{}_{}", text, lang)}))
                        .collect::<Vec<_>>()
                })
            })
            .collect(),
    )
}

/// Retry policy with millisecond waits for real-time tests
pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_backoff: std::time::Duration::from_millis(5),
        max_backoff: std::time::Duration::from_millis(20),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// LOCAL HTTP STUB
// ═══════════════════════════════════════════════════════════════════════════

/// What the HTTP stub saw for one request
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub query: String,
    pub headers: HeaderMap,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct HttpStub {
    pub recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    /// Statuses returned (with body "stub failure") before echoing
    pub failures: Arc<Mutex<VecDeque<u16>>>,
}

impl HttpStub {
    pub fn with_failures(statuses: &[u16]) -> Self {
        let stub = Self::default();
        stub.failures.lock().unwrap().extend(statuses.iter().copied());
        stub
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }

    /// Serve `/translate` on an ephemeral port; returns the endpoint URL
    pub async fn spawn(&self) -> String {
        let stub = self.clone();
        let app = Router::new().route(
            "/translate",
            post(move |RawQuery(query): RawQuery, headers: HeaderMap, body: Bytes| {
                let stub = stub.clone();
                async move { stub.handle(query.unwrap_or_default(), headers, body) }
            }),
        );

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{}", addr)
    }

    fn handle(&self, query: String, headers: HeaderMap, body: Bytes) -> (StatusCode, String) {
        let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        self.recorded.lock().unwrap().push(RecordedRequest {
            query: query.clone(),
            headers,
            body: body.clone(),
        });

        if let Some(status) = self.failures.lock().unwrap().pop_front() {
            return (StatusCode::from_u16(status).unwrap(), "stub failure".to_string());
        }

        let targets: Vec<String> = query
            .split('&')
            .filter_map(|pair| pair.strip_prefix("to="))
            .map(str::to_string)
            .collect();
        let texts: Vec<String> = body
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .map(|item| item["Text"].as_str().unwrap_or_default().to_string())
                    .collect()
            })
            .unwrap_or_default();

        (StatusCode::OK, echo_body(&texts, &targets).to_string())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// WORKBOOK FIXTURES
// ═══════════════════════════════════════════════════════════════════════════

/// Two sheets:
/// - `Data`: A1 "Hello" merged over A1:B1 (B1 holds a stray "World"),
///   C1 = 42, A2 "Second row", B3 = TRUE
/// - `Numbers`: A1 = 1, A2 = 2
pub fn sample_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();

    let data = workbook.add_worksheet();
    data.set_name("Data").unwrap();
    data.merge_range(0, 0, 0, 1, "Hello", &Format::new()).unwrap();
    data.write_string(0, 1, "World").unwrap();
    data.write_number(0, 2, 42).unwrap();
    data.write_string(1, 0, "Second row").unwrap();
    data.write_boolean(2, 1, true).unwrap();

    let numbers = workbook.add_worksheet();
    numbers.set_name("Numbers").unwrap();
    numbers.write_number(0, 0, 1).unwrap();
    numbers.write_number(1, 0, 2).unwrap();

    workbook.save_to_buffer().unwrap()
}

/// Single sheet with the given name and one text cell in A1
pub fn single_sheet_workbook(name: &str, text: &str) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(name).unwrap();
    sheet.write_string(0, 0, text).unwrap();
    workbook.save_to_buffer().unwrap()
}

/// `Report` sheet with formatting to carry through translation:
/// A1 "Revenue" in bold, B1 = 0.125 as `0.00%`, column A 20 wide
pub fn styled_workbook() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Report").unwrap();
    sheet
        .write_string_with_format(0, 0, "Revenue", &Format::new().set_bold())
        .unwrap();
    sheet
        .write_number_with_format(0, 1, 0.125, &Format::new().set_num_format("0.00%"))
        .unwrap();
    sheet.set_column_width(0, 20).unwrap();
    workbook.save_to_buffer().unwrap()
}
