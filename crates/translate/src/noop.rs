//! Pass-through translator for offline runs

use thai_echo_core::{Language, Result, Translator};

/// Returns input text unchanged. Used when no translation service is
/// configured, so the rest of the lesson cycle still runs end to end.
#[derive(Debug, Default)]
pub struct NoopTranslator;

impl NoopTranslator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _from: Language, _to: Language) -> Result<String> {
        Ok(text.to_string())
    }
}
