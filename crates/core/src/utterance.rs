//! One recorded-and-translated lesson turn

use std::ops::Range;

use crate::AudioClip;

/// A single user turn: the recording plus both sides of the translation.
///
/// Owned by the session controller; replaced wholesale on the next recording
/// cycle and dropped on reset, never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Utterance {
    /// Transcript of the recorded English speech
    pub english_text: String,
    /// Thai translation of the transcript
    pub thai_text: String,
    /// The original recording, played back before the Thai synthesis
    pub audio: AudioClip,
}

impl Utterance {
    pub fn new(english_text: impl Into<String>, thai_text: impl Into<String>, audio: AudioClip) -> Self {
        Self {
            english_text: english_text.into(),
            thai_text: thai_text.into(),
            audio,
        }
    }
}

/// A displayed word unit, one per whitespace-delimited token of the
/// translated text. `index` is stable for the lifetime of the display and
/// matches the token's position in the tokenized sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpan {
    pub index: usize,
    pub text: String,
}

/// Tokenize display text into word spans.
pub fn word_spans(text: &str) -> Vec<WordSpan> {
    text.split_whitespace()
        .enumerate()
        .map(|(index, token)| WordSpan {
            index,
            text: token.to_string(),
        })
        .collect()
}

/// A bounded-length substring of the translation paired with the contiguous
/// word-index range it covers. Derived per playback, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    pub text: String,
    /// Half-open range of word indices into the displayed word spans
    pub words: Range<usize>,
}
