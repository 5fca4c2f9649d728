//! HTTP/JSON translation client
//!
//! API format:
//! POST {endpoint}
//! Request: { "text": "...", "from": "en", "to": "th" }
//! Response: { "translation": "..." }

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::RwLock;

use thai_echo_core::{CoreError, Language, Result, Translator};

/// HTTP translator configuration
#[derive(Debug, Clone)]
pub struct HttpTranslatorConfig {
    /// Endpoint URL
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
    /// Enable caching
    pub cache_enabled: bool,
    /// Max cache entries
    pub cache_size: usize,
}

impl Default for HttpTranslatorConfig {
    fn default() -> Self {
        Self {
            endpoint: thai_echo_config::constants::endpoints::TRANSLATION_DEFAULT.to_string(),
            timeout: Duration::from_secs(15),
            cache_enabled: true,
            cache_size: thai_echo_config::constants::cache::MAX_ENTRIES,
        }
    }
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    from: &'a str,
    to: &'a str,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translation: String,
}

/// Bounded translation cache
struct TranslationCache {
    entries: std::collections::HashMap<String, String>,
    max_size: usize,
}

impl TranslationCache {
    fn new(max_size: usize) -> Self {
        Self {
            entries: std::collections::HashMap::new(),
            max_size,
        }
    }

    fn make_key(text: &str, from: Language, to: Language) -> String {
        format!("{}:{}:{}", from, to, text)
    }

    fn get(&self, text: &str, from: Language, to: Language) -> Option<String> {
        self.entries
            .get(&Self::make_key(text, from, to))
            .cloned()
    }

    fn insert(&mut self, text: &str, from: Language, to: Language, translation: String) {
        // Simple eviction: clear half when full
        if self.entries.len() >= self.max_size {
            let keys_to_remove: Vec<_> = self
                .entries
                .keys()
                .take(self.max_size / 2)
                .cloned()
                .collect();
            for key in keys_to_remove {
                self.entries.remove(&key);
            }
        }
        self.entries.insert(Self::make_key(text, from, to), translation);
    }
}

/// Translation service client using HTTP/JSON
pub struct HttpTranslator {
    config: HttpTranslatorConfig,
    client: reqwest::Client,
    cache: RwLock<TranslationCache>,
}

impl HttpTranslator {
    /// Create a new HTTP translator
    pub fn new(config: HttpTranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();
        let cache = RwLock::new(TranslationCache::new(config.cache_size));

        Self {
            config,
            client,
            cache,
        }
    }

    async fn call_service(&self, text: &str, from: Language, to: Language) -> Result<String> {
        let request = TranslateRequest {
            text,
            from: from.code(),
            to: to.code(),
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| CoreError::Translation(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(CoreError::Translation(format!(
                "service returned {}",
                response.status()
            )));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Translation(format!("bad response body: {}", e)))?;

        Ok(body.translation)
    }
}

#[async_trait::async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }

        if self.config.cache_enabled {
            if let Some(hit) = self.cache.read().await.get(text, from, to) {
                tracing::debug!(from = %from, to = %to, "translation cache hit");
                return Ok(hit);
            }
        }

        let translation = self.call_service(text, from, to).await?;

        tracing::debug!(
            from = %from,
            to = %to,
            text_len = text.len(),
            "translated via service"
        );

        if self.config.cache_enabled {
            self.cache
                .write()
                .await
                .insert(text, from, to, translation.clone());
        }

        Ok(translation)
    }
}
