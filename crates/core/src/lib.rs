//! Core domain types for the Thai echo lesson pipeline
//!
//! One lesson turn: the user records an English utterance, it is transcribed
//! and translated to Thai, then the original recording is replayed followed by
//! synthesized Thai speech with word-level highlighting. This crate holds the
//! types and trait seams shared by the pipeline, translation, and session
//! crates; it has no knowledge of any speech model or rendering technology.

mod audio;
mod error;
mod traits;
mod utterance;

pub use audio::AudioClip;
pub use error::{CoreError, Result};
pub use traits::{Transcriber, Translator};
pub use utterance::{word_spans, TextChunk, Utterance, WordSpan};

use serde::{Deserialize, Serialize};

/// Languages the lesson app deals with.
///
/// The recording side is always English and the synthesis side always Thai,
/// but the translation and synthesis seams take the pair explicitly so the
/// direction is visible at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Thai,
}

impl Language {
    /// BCP-47 primary language subtag, as used by synthesis endpoints
    /// and voice metadata.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Thai => "th",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
