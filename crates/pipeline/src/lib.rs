//! Playback and highlighting pipeline
//!
//! The Thai side of a lesson cycle: the translated text is split into
//! endpoint-sized chunks, each chunk is synthesized remotely and played at
//! half speed while the matching word indices are highlighted, and repeated
//! synthesis/playback failure degrades to an on-device fallback voice.
//!
//! Everything here follows a best-effort policy: failures inside the
//! playback path are logged and degrade to the next tier, they never stall
//! or abort the lesson cycle.

mod chunker;
mod highlight;
mod orchestrator;
mod playback;
pub mod synth;

pub use chunker::{chunk, chunk_with_ranges, word_ranges};
pub use highlight::{highlight_set, HighlightSequencer, SequencerConfig};
pub use orchestrator::{PlaybackCycle, PlaybackCycleConfig};
pub use playback::{play_best_effort, AudioPlayer, NullPlayer};
pub use synth::{FallbackSpeaker, LocalSynth, RemoteSynthesizer, RemoteSynthesizerConfig, SynthBackend};

#[cfg(feature = "playback")]
pub use playback::RodioPlayer;

use thiserror::Error;

/// Pipeline error taxonomy.
///
/// These never escape the playback path; they exist so each tier can log
/// what it degraded from.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Synthesis endpoint unreachable or returned a non-audio response
    #[error("synthesis unavailable: {0}")]
    SynthesisUnavailable(String),

    /// Host refused to play audio (no device, stream rejected)
    #[error("playback rejected: {0}")]
    PlaybackRejected(String),

    /// Audio bytes could not be decoded
    #[error("audio decode failed: {0}")]
    AudioDecode(String),
}
