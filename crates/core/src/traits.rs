//! Trait seams for the external model collaborators
//!
//! Speech-to-text and translation are delegated to external models/services.
//! The session controller only ever sees these traits; concrete backends
//! live in their own crates (or in test code).

use crate::{AudioClip, Language, Result};

/// Speech-to-text seam.
#[async_trait::async_trait]
pub trait Transcriber: Send + Sync {
    /// Transcribe a finished recording into text.
    async fn transcribe(&self, audio: &AudioClip) -> Result<String>;

    /// Language the backend transcribes.
    fn language(&self) -> Language {
        Language::English
    }
}

/// Translation seam.
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` between the given languages.
    async fn translate(&self, text: &str, from: Language, to: Language) -> Result<String>;
}
