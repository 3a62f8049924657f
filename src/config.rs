//! Translation provider configuration
//!
//! Values are supplied by the caller (the binaries read them from flags or
//! `TRANSLATOR_*` environment variables); nothing here touches the environment.

use crate::error::{TranslatorError, TranslatorResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Public Azure Translator endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com";

/// Per-attempt request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for the Azure Translator resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatorConfig {
    pub endpoint: String,
    #[serde(default)]
    pub subscription_key: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            subscription_key: None,
            region: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Credentials that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub subscription_key: String,
    pub region: String,
}

impl TranslatorConfig {
    pub fn new(
        endpoint: impl Into<String>,
        subscription_key: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            subscription_key: Some(subscription_key.into()),
            region: Some(region.into()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Check that key and region are present and non-blank
    pub fn credentials(&self) -> TranslatorResult<Credentials> {
        let subscription_key = non_blank(&self.subscription_key)
            .ok_or(TranslatorError::MissingCredential("subscription key"))?;
        let region =
            non_blank(&self.region).ok_or(TranslatorError::MissingCredential("subscription region"))?;
        if self.endpoint.trim().is_empty() {
            return Err(TranslatorError::MissingCredential("endpoint"));
        }

        Ok(Credentials {
            subscription_key,
            region,
        })
    }

    /// `{endpoint}/translate`
    pub fn translate_url(&self) -> String {
        format!("{}/translate", self.endpoint.trim().trim_end_matches('/'))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
