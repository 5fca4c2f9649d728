//! Lesson session controller
//!
//! Owns the lesson state machine and drives a full turn: recording finishes,
//! the audio is transcribed, the transcript translated to Thai, and the
//! playback cycle replays the recording followed by highlighted Thai speech.

mod lesson;

pub use lesson::{LessonEvent, LessonSession, LessonSessionConfig, LessonState};

use std::sync::Arc;

use thai_echo_core::{CoreError, Translator};
use thai_echo_translate::{create_translator, TranslationConfig, TranslationProvider};
use thiserror::Error;

/// Translator wired from workspace settings.
pub fn translator_from_settings(settings: &thai_echo_config::Settings) -> Arc<dyn Translator> {
    create_translator(&TranslationConfig {
        provider: TranslationProvider::Http,
        endpoint: settings.translation.endpoint.clone(),
        timeout_secs: settings.translation.timeout_secs,
    })
}

/// Session-level errors
#[derive(Debug, Error)]
pub enum SessionError {
    /// Operation rejected in the current state (e.g. a new recording while
    /// the previous cycle is still processing)
    #[error("lesson is busy: {0:?}")]
    Busy(LessonState),

    /// Transcription or translation seam failed
    #[error(transparent)]
    Core(#[from] CoreError),
}
