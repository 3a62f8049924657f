//! Retry policy and per-attempt outcome classification

use super::provider::RawResponse;
use crate::error::TranslatorError;
use std::time::Duration;

/// Attempts per chunk, first try included
pub const MAX_RETRIES: u32 = 6;
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
pub const MAX_BACKOFF: Duration = Duration::from_secs(32);

/// HTTP statuses worth retrying
pub const RETRIABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_RETRIES,
            initial_backoff: INITIAL_BACKOFF,
            max_backoff: MAX_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn next_backoff(&self, current: Duration) -> Duration {
        current.saturating_mul(2).min(self.max_backoff)
    }

    /// Waits between consecutive attempts, in order
    pub fn backoff_schedule(&self) -> Vec<Duration> {
        let mut waits = Vec::new();
        let mut backoff = self.initial_backoff.min(self.max_backoff);
        for _ in 1..self.max_attempts.max(1) {
            waits.push(backoff);
            backoff = self.next_backoff(backoff);
        }
        waits
    }
}

/// Why an attempt may be retried
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    Status { status: u16, body: String },
    Transport(String),
}

impl RetryReason {
    /// Error surfaced once the retry budget is spent
    pub fn into_error(self) -> TranslatorError {
        match self {
            RetryReason::Status { status, body } => TranslatorError::Provider { status, body },
            RetryReason::Transport(cause) => TranslatorError::Network(cause),
        }
    }
}

impl std::fmt::Display for RetryReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryReason::Status { status, .. } => write!(f, "HTTP {}", status),
            RetryReason::Transport(cause) => write!(f, "transport error: {}", cause),
        }
    }
}

/// Outcome of one request attempt
#[derive(Debug)]
pub enum AttemptOutcome {
    /// Status 200, carrying the response body
    Success(String),
    Retriable(RetryReason),
    Fatal(TranslatorError),
}

pub fn is_retriable_status(status: u16) -> bool {
    RETRIABLE_STATUSES.contains(&status)
}

pub fn classify_attempt(result: Result<RawResponse, String>) -> AttemptOutcome {
    match result {
        Ok(RawResponse { status: 200, body }) => AttemptOutcome::Success(body),
        Ok(RawResponse { status, body }) if is_retriable_status(status) => {
            AttemptOutcome::Retriable(RetryReason::Status { status, body })
        }
        Ok(RawResponse { status, body }) => {
            AttemptOutcome::Fatal(TranslatorError::Provider { status, body })
        }
        Err(cause) => AttemptOutcome::Retriable(RetryReason::Transport(cause)),
    }
}
