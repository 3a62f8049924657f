//! Batch translator
//!
//! Texts are sent in chunks of [`CHUNK_SIZE`]; each chunk is posted once for
//! all target languages and retried with exponential backoff on transient
//! failures. Chunks are processed strictly one after another.

pub mod protocol;
pub mod provider;
pub mod retry;

pub use protocol::{BatchRequest, TranslationItem};
pub use provider::{AzureProvider, AzureSession, ProviderSession, RawResponse, TranslationProvider};
pub use retry::{AttemptOutcome, RetryPolicy, RetryReason, MAX_RETRIES};

use crate::error::{TranslatorError, TranslatorResult};
use crate::types::TranslateOptions;
use tracing::{info, warn};

/// Texts per request
pub const CHUNK_SIZE: usize = 80;

/// Per-language translations aligned with the input texts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    columns: Vec<(String, Vec<String>)>,
}

impl TranslationTable {
    /// Every language starts with `len` empty strings
    pub fn new(targets: &[String], len: usize) -> Self {
        Self {
            columns: targets
                .iter()
                .map(|t| (t.clone(), vec![String::new(); len]))
                .collect(),
        }
    }

    pub fn get(&self, lang: &str) -> Option<&[String]> {
        self.columns
            .iter()
            .find(|(l, _)| l == lang)
            .map(|(_, texts)| texts.as_slice())
    }

    /// Languages in request order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(l, _)| l.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.columns.iter().map(|(l, t)| (l.as_str(), t.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Write one request's results; item `i` lands at `positions[i]`.
    ///
    /// Every item must carry a translation for every column. Languages are
    /// matched ignoring ASCII case; unknown ones are dropped and counted.
    fn scatter(
        &mut self,
        positions: &[usize],
        items: Vec<TranslationItem>,
    ) -> TranslatorResult<usize> {
        if items.len() != positions.len() {
            return Err(TranslatorError::MalformedResponse(format!(
                "expected {} results, got {}",
                positions.len(),
                items.len()
            )));
        }

        let mut dropped = 0;
        for (&position, item) in positions.iter().zip(items) {
            let mut seen = vec![false; self.columns.len()];
            for translation in item.translations {
                let column = self
                    .columns
                    .iter()
                    .position(|(lang, _)| lang.eq_ignore_ascii_case(&translation.to));
                match column {
                    Some(index) => {
                        if let Some(slot) = self.columns[index].1.get_mut(position) {
                            *slot = translation.text;
                        }
                        seen[index] = true;
                    }
                    None => dropped += 1,
                }
            }
            if let Some(missing) = seen.iter().position(|found| !found) {
                return Err(TranslatorError::MalformedResponse(format!(
                    "no '{}' translation for text {}",
                    self.columns[missing].0,
                    position + 1
                )));
            }
        }
        Ok(dropped)
    }
}

/// Chunked, retrying batch translator over a [`TranslationProvider`]
#[derive(Debug, Clone)]
pub struct BatchTranslator<P> {
    provider: P,
    retry: RetryPolicy,
    chunk_size: usize,
}

impl<P: TranslationProvider> BatchTranslator<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            retry: RetryPolicy::default(),
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate `texts` into every target of `options`.
    ///
    /// The result has one entry per distinct target, each exactly
    /// `texts.len()` long. Empty strings stay empty and are never sent.
    pub async fn translate<S: AsRef<str>>(
        &self,
        texts: &[S],
        options: &TranslateOptions,
    ) -> TranslatorResult<TranslationTable> {
        let texts: Vec<String> = texts.iter().map(|t| t.as_ref().to_string()).collect();
        self.translate_owned(texts, options).await
    }

    /// Like [`translate`](Self::translate); missing texts are treated as empty
    pub async fn translate_optional<S: AsRef<str>>(
        &self,
        texts: &[Option<S>],
        options: &TranslateOptions,
    ) -> TranslatorResult<TranslationTable> {
        let texts: Vec<String> = texts
            .iter()
            .map(|t| t.as_ref().map(|s| s.as_ref().to_string()).unwrap_or_default())
            .collect();
        self.translate_owned(texts, options).await
    }

    async fn translate_owned(
        &self,
        texts: Vec<String>,
        options: &TranslateOptions,
    ) -> TranslatorResult<TranslationTable> {
        let targets = options.unique_targets();
        let mut table = TranslationTable::new(&targets, texts.len());
        if targets.is_empty() {
            return Ok(table);
        }

        // Empty strings are never sent; each request remembers where its texts came from
        let pending: Vec<(Vec<usize>, Vec<String>)> = texts
            .chunks(self.chunk_size)
            .enumerate()
            .map(|(index, chunk)| -> (Vec<usize>, Vec<String>) {
                let start = index * self.chunk_size;
                chunk
                    .iter()
                    .enumerate()
                    .filter(|(_, text)| !text.is_empty())
                    .map(|(offset, text)| (start + offset, text.clone()))
                    .unzip()
            })
            .filter(|(positions, _)| !positions.is_empty())
            .collect();
        if pending.is_empty() {
            return Ok(table);
        }

        let session = self.provider.open_session()?;
        let total = pending.len();

        for (number, (positions, chunk)) in pending.into_iter().enumerate() {
            let sent = chunk.len();
            let request = BatchRequest::new(chunk, &targets, options);
            let items = self.send_with_retry(&session, &request).await?;
            let dropped = table.scatter(&positions, items)?;
            if dropped > 0 {
                warn!(chunk = number + 1, dropped, "ignored unexpected translation entries");
            }
            info!(chunk = number + 1, of = total, texts = sent, "translated chunk");
        }

        Ok(table)
    }

    async fn send_with_retry(
        &self,
        session: &P::Session,
        request: &BatchRequest,
    ) -> TranslatorResult<Vec<TranslationItem>> {
        let max_attempts = self.retry.max_attempts.max(1);
        let mut backoff = self.retry.initial_backoff.min(self.retry.max_backoff);
        let mut attempt = 1;

        loop {
            let result = session.post_batch(request).await;
            match retry::classify_attempt(result) {
                AttemptOutcome::Success(body) => return protocol::parse_response(&body),
                AttemptOutcome::Fatal(err) => return Err(err),
                AttemptOutcome::Retriable(reason) if attempt >= max_attempts => {
                    warn!(attempt, %reason, "giving up on translation batch");
                    return Err(reason.into_error());
                }
                AttemptOutcome::Retriable(reason) => {
                    warn!(
                        attempt,
                        %reason,
                        backoff_secs = backoff.as_secs_f64(),
                        "translation batch failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    backoff = self.retry.next_backoff(backoff);
                    attempt += 1;
                }
            }
        }
    }
}

impl BatchTranslator<AzureProvider> {
    /// Translator for the Azure resource described by `config`
    pub fn azure(config: crate::config::TranslatorConfig) -> Self {
        Self::new(AzureProvider::new(config))
    }
}
