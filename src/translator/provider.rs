//! Translation provider seam and the Azure Translator implementation

use super::protocol::BatchRequest;
use crate::config::{Credentials, TranslatorConfig};
use crate::error::{TranslatorError, TranslatorResult};
use async_trait::async_trait;
use std::error::Error as StdError;
use tracing::debug;

/// Status and body of an HTTP response, before classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Connection scope for one `translate` call
#[async_trait]
pub trait ProviderSession: Send + Sync {
    /// Send one batch. `Err` carries a transport-level failure description.
    async fn post_batch(&self, request: &BatchRequest) -> Result<RawResponse, String>;
}

/// Opens sessions; a session lives exactly as long as one `translate` call
pub trait TranslationProvider: Send + Sync {
    type Session: ProviderSession;

    fn open_session(&self) -> TranslatorResult<Self::Session>;
}

/// Azure Translator (Cognitive Services) v3
#[derive(Debug, Clone)]
pub struct AzureProvider {
    config: TranslatorConfig,
}

impl AzureProvider {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }
}

impl TranslationProvider for AzureProvider {
    type Session = AzureSession;

    fn open_session(&self) -> TranslatorResult<AzureSession> {
        let credentials = self.config.credentials()?;
        let client = reqwest::Client::builder()
            .timeout(self.config.timeout())
            .build()
            .map_err(|e| TranslatorError::Network(error_chain(&e)))?;

        Ok(AzureSession {
            client,
            url: self.config.translate_url(),
            credentials,
        })
    }
}

/// Pooled HTTP client plus resolved credentials
#[derive(Debug)]
pub struct AzureSession {
    client: reqwest::Client,
    url: String,
    credentials: Credentials,
}

#[async_trait]
impl ProviderSession for AzureSession {
    async fn post_batch(&self, request: &BatchRequest) -> Result<RawResponse, String> {
        debug!(
            url = %self.url,
            texts = request.texts.len(),
            targets = ?request.targets,
            "posting translation batch"
        );

        let response = self
            .client
            .post(&self.url)
            .query(&request.query_params())
            .header("Ocp-Apim-Subscription-Key", &self.credentials.subscription_key)
            .header("Ocp-Apim-Subscription-Region", &self.credentials.region)
            .json(&request.body())
            .send()
            .await
            .map_err(|e| error_chain(&e))?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| error_chain(&e))?;
        Ok(RawResponse { status, body })
    }
}

/// Render an error with its sources (`outer: inner: root`)
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
