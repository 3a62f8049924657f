//! Command-line arguments shared by both binaries

use crate::config::{TranslatorConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};
use clap::Args;

/// Azure Translator connection flags (with `TRANSLATOR_*` environment fallback)
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ProviderArgs {
    /// Translator endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT, env = "TRANSLATOR_ENDPOINT")]
    pub endpoint: String,

    /// Subscription key of the Translator resource
    #[arg(long = "key", env = "TRANSLATOR_KEY", hide_env_values = true)]
    pub subscription_key: Option<String>,

    /// Region of the Translator resource (e.g. japaneast)
    #[arg(long, env = "TRANSLATOR_REGION")]
    pub region: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, env = "TRANSLATOR_TIMEOUT")]
    pub timeout: u64,
}

impl ProviderArgs {
    pub fn to_config(&self) -> TranslatorConfig {
        TranslatorConfig {
            endpoint: self.endpoint.clone(),
            subscription_key: self.subscription_key.clone(),
            region: self.region.clone(),
            timeout_secs: self.timeout,
        }
    }
}
