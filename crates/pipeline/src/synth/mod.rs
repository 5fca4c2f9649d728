//! Speech synthesis backends
//!
//! Two tiers: the remote HTTP endpoint used for normal chunk playback, and
//! the on-device fallback voice used when the endpoint fails.

mod fallback;
mod remote;

pub use fallback::{FallbackSpeaker, LocalSynth};
pub use remote::{RemoteSynthesizer, RemoteSynthesizerConfig};

#[cfg(feature = "piper")]
pub use fallback::PiperSpeaker;

use thai_echo_core::{AudioClip, Language};

use crate::PipelineError;

/// Remote synthesis seam.
#[async_trait::async_trait]
pub trait SynthBackend: Send + Sync {
    /// Synthesize speech for one text chunk.
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, PipelineError>;
}
