//! Translation clients
//!
//! The lesson app sends the English transcript to a remote language-model
//! service and gets the Thai translation back. This crate provides the HTTP
//! client plus a pass-through implementation for offline runs.

mod http;
mod noop;

pub use http::{HttpTranslator, HttpTranslatorConfig};
pub use noop::NoopTranslator;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thai_echo_core::Translator;

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Which provider to use
    pub provider: TranslationProvider,
    /// Service endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_endpoint() -> String {
    thai_echo_config::constants::endpoints::TRANSLATION_DEFAULT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

/// Translation providers
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// HTTP/JSON translation service
    Http,
    /// Disabled (pass-through)
    #[default]
    Disabled,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::Disabled,
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Create translator based on config
pub fn create_translator(config: &TranslationConfig) -> Arc<dyn Translator> {
    match config.provider {
        TranslationProvider::Http => {
            tracing::info!(endpoint = %config.endpoint, "using HTTP translator");
            Arc::new(HttpTranslator::new(HttpTranslatorConfig {
                endpoint: config.endpoint.clone(),
                timeout: std::time::Duration::from_secs(config.timeout_secs),
                ..Default::default()
            }))
        }
        TranslationProvider::Disabled => Arc::new(NoopTranslator::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thai_echo_core::Language;

    #[test]
    fn test_default_config() {
        let config = TranslationConfig::default();
        assert!(matches!(config.provider, TranslationProvider::Disabled));
    }

    #[test]
    fn test_factory_disabled_is_noop() {
        let translator = create_translator(&TranslationConfig::default());
        let rt = tokio::runtime::Runtime::new().unwrap();
        let out = rt
            .block_on(translator.translate("hello", Language::English, Language::Thai))
            .unwrap();
        assert_eq!(out, "hello");
    }
}
