//! Core error types

use thiserror::Error;

/// Errors surfaced by the core trait seams.
///
/// The playback path deliberately swallows its own failures (best effort,
/// never block the lesson cycle); these variants cover the seams that *do*
/// propagate — transcription, translation, and audio decoding — where the
/// session controller decides how to react.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Speech-to-text failed or produced nothing usable
    #[error("transcription failed: {0}")]
    Transcription(String),

    /// Translation service failed
    #[error("translation failed: {0}")]
    Translation(String),

    /// Recorded audio could not be decoded
    #[error("audio decode failed: {0}")]
    AudioDecode(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
