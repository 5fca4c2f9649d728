//! Chunk-by-chunk playback with word highlighting
//!
//! The sequencer walks the translation's chunks strictly in order: synthesize
//! one chunk, highlight exactly the words it covers, play it to the end,
//! advance. Highlight state is a pure set of word indices published over a
//! watch channel — the rendering layer subscribes and re-scans its word
//! elements on every change; nothing here knows how words are drawn.
//!
//! Any chunk failure abandons the remaining chunks and re-speaks the
//! complete original text through the on-device fallback voice.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use tokio::sync::watch;

use thai_echo_core::Language;

use crate::chunker::chunk_with_ranges;
use crate::playback::AudioPlayer;
use crate::synth::{FallbackSpeaker, SynthBackend};

/// The word indices highlighted while a given chunk plays.
///
/// Pure function of the chunk index and the precomputed word ranges; an
/// out-of-range chunk index highlights nothing.
pub fn highlight_set(chunk_index: usize, ranges: &[Range<usize>]) -> HashSet<usize> {
    ranges
        .get(chunk_index)
        .map(|r| r.clone().collect())
        .unwrap_or_default()
}

/// Sequencer tuning.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Speed factor for synthesized chunks (the lesson uses half speed)
    pub speech_rate: f32,
    /// Per-chunk character limit for the synthesis endpoint
    pub max_chunk_chars: usize,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            speech_rate: thai_echo_config::constants::playback::SPEECH_RATE,
            max_chunk_chars: thai_echo_config::constants::chunking::MAX_CHUNK_CHARS,
        }
    }
}

/// Drives synthesized chunk playback and the matching highlight state.
pub struct HighlightSequencer {
    synth: Arc<dyn SynthBackend>,
    player: Arc<dyn AudioPlayer>,
    fallback: Arc<FallbackSpeaker>,
    config: SequencerConfig,
    highlight_tx: watch::Sender<HashSet<usize>>,
}

impl HighlightSequencer {
    pub fn new(
        synth: Arc<dyn SynthBackend>,
        player: Arc<dyn AudioPlayer>,
        fallback: Arc<FallbackSpeaker>,
        config: SequencerConfig,
    ) -> Self {
        let (highlight_tx, _) = watch::channel(HashSet::new());
        Self {
            synth,
            player,
            fallback,
            config,
            highlight_tx,
        }
    }

    /// Subscribe to highlight changes. The value is the complete set of
    /// highlighted word indices; renderers re-scan on every change.
    pub fn highlights(&self) -> watch::Receiver<HashSet<usize>> {
        self.highlight_tx.subscribe()
    }

    /// Play `text` chunk by chunk with word highlighting, resolving when the
    /// whole sequence (or its fallback) has finished. Never returns an
    /// error: every failure degrades to the fallback voice and, past that,
    /// to silence.
    ///
    /// Empty or whitespace-only text resolves immediately with no synthesis
    /// call and no highlighting.
    pub async fn run(&self, text: &str, language: Language) {
        let chunks = chunk_with_ranges(text, self.config.max_chunk_chars);
        if chunks.is_empty() || text.trim().is_empty() {
            return;
        }
        let ranges: Vec<_> = chunks.iter().map(|c| c.words.clone()).collect();

        tracing::debug!(chunks = chunks.len(), "starting highlighted playback");

        for (i, chunk) in chunks.iter().enumerate() {
            match self.synth.synthesize(&chunk.text, language).await {
                Ok(clip) => {
                    // send_replace keeps the value even with no subscribers yet
                    self.highlight_tx.send_replace(highlight_set(i, &ranges));

                    if let Err(e) = self.player.play(&clip, self.config.speech_rate).await {
                        tracing::warn!(chunk = i, error = %e, "chunk playback failed, switching to fallback voice");
                        self.clear_highlights();
                        // Documented contract: the fallback re-speaks the
                        // complete text, not just the remaining chunks
                        self.fallback.speak(text, language).await;
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(chunk = i, error = %e, "chunk synthesis failed, switching to fallback voice");
                    self.clear_highlights();
                    self.fallback.speak(text, language).await;
                    break;
                }
            }
        }

        self.clear_highlights();
    }

    fn clear_highlights(&self) {
        self.highlight_tx.send_replace(HashSet::new());
    }
}
