//! On-device fallback speech
//!
//! When the remote endpoint fails, the remaining lesson audio comes from a
//! local voice. At most one fallback utterance is active system-wide: a new
//! `speak` (or an explicit `cancel`) retires whatever was in flight.

use std::sync::Arc;

use tokio::sync::watch;

use thai_echo_core::{AudioClip, Language};

use crate::playback::AudioPlayer;
use crate::PipelineError;

/// On-device synthesis seam.
#[async_trait::async_trait]
pub trait LocalSynth: Send + Sync {
    /// Synthesize with the voice matching `language`, or the default voice
    /// when none matches (logged, non-fatal).
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, PipelineError>;
}

/// Speaks whole-text fallback audio at the configured rate.
///
/// The generation counter is published over a watch channel so a running
/// `speak` can observe being retired mid-playback, not just between
/// synthesis and playback.
pub struct FallbackSpeaker {
    synth: Arc<dyn LocalSynth>,
    player: Arc<dyn AudioPlayer>,
    rate: f32,
    generation: watch::Sender<u64>,
}

impl FallbackSpeaker {
    /// `rate` is the playback speed factor (the lesson uses half rate).
    pub fn new(synth: Arc<dyn LocalSynth>, player: Arc<dyn AudioPlayer>, rate: f32) -> Self {
        let (generation, _) = watch::channel(0);
        Self {
            synth,
            player,
            rate,
            generation,
        }
    }

    /// Cancel any in-flight fallback utterance, including one whose audio is
    /// already playing.
    pub fn cancel(&self) {
        self.generation.send_modify(|g| *g += 1);
    }

    /// Speak `text` with the on-device voice.
    ///
    /// Cancels any in-flight utterance first, so at most one fallback
    /// utterance is ever audible. Resolves on completion, cancellation, or
    /// error; failures are logged and swallowed — if the fallback voice also
    /// fails, the lesson cycle simply ends without audio.
    pub async fn speak(&self, text: &str, language: Language) {
        let mut my_generation = 0;
        self.generation.send_modify(|g| {
            *g += 1;
            my_generation = *g;
        });
        // Subscribed after the bump: changed() only wakes for later bumps
        let mut rx = self.generation.subscribe();

        if text.trim().is_empty() {
            return;
        }

        let clip = match self.synth.synthesize(text, language).await {
            Ok(clip) => clip,
            Err(e) => {
                tracing::warn!(error = %e, "fallback synthesis failed, ending without audio");
                return;
            }
        };

        // A newer utterance (or a reset) retired this one while synthesizing
        if *rx.borrow() != my_generation {
            tracing::debug!("fallback utterance cancelled before playback");
            return;
        }

        let retired = async {
            loop {
                if rx.changed().await.is_err() {
                    // Sender lives as long as self; unreachable while playing
                    std::future::pending::<()>().await;
                }
                if *rx.borrow() != my_generation {
                    return;
                }
            }
        };

        tokio::select! {
            result = self.player.play(&clip, self.rate) => {
                if let Err(e) = result {
                    tracing::warn!(error = %e, "fallback playback failed, ending without audio");
                }
            }
            _ = retired => {
                tracing::debug!("fallback playback cancelled mid-clip");
            }
        }
    }
}

/// Piper-backed local voices, one model per language plus an optional
/// `default` voice, loaded from `<voices_dir>/<key>.onnx.json` configs.
#[cfg(feature = "piper")]
pub struct PiperSpeaker {
    voices: std::collections::HashMap<String, Arc<piper_rs::synth::PiperSpeechSynthesizer>>,
    sample_rate: u32,
}

#[cfg(feature = "piper")]
impl PiperSpeaker {
    /// Load every `*.onnx.json` voice config in `voices_dir`, keyed by the
    /// file stem (`th.onnx.json` → the Thai voice, `default.onnx.json` → the
    /// default voice).
    pub fn load(voices_dir: impl AsRef<std::path::Path>) -> Result<Self, PipelineError> {
        let mut voices = std::collections::HashMap::new();

        let entries = std::fs::read_dir(voices_dir.as_ref())
            .map_err(|e| PipelineError::SynthesisUnavailable(format!("voices dir: {}", e)))?;

        for entry in entries.flatten() {
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(key) = name.strip_suffix(".onnx.json") else {
                continue;
            };

            let model = piper_rs::from_config_path(&path).map_err(|e| {
                PipelineError::SynthesisUnavailable(format!("voice {}: {}", key, e))
            })?;
            let synth = piper_rs::synth::PiperSpeechSynthesizer::new(model).map_err(|e| {
                PipelineError::SynthesisUnavailable(format!("voice {}: {}", key, e))
            })?;

            tracing::info!(voice = key, "loaded fallback voice");
            voices.insert(key.to_string(), Arc::new(synth));
        }

        if voices.is_empty() {
            return Err(PipelineError::SynthesisUnavailable(
                "no fallback voices found".to_string(),
            ));
        }

        Ok(Self {
            voices,
            sample_rate: 22050, // Piper default
        })
    }

    fn pick_voice(&self, language: Language) -> Option<Arc<piper_rs::synth::PiperSpeechSynthesizer>> {
        if let Some(voice) = self.voices.get(language.code()) {
            return Some(voice.clone());
        }

        // NoFallbackVoice is non-fatal: fall through to the default voice
        tracing::warn!(language = %language, "no fallback voice for language, using default");

        self.voices
            .get("default")
            .or_else(|| self.voices.values().next())
            .cloned()
    }
}

#[cfg(feature = "piper")]
#[async_trait::async_trait]
impl LocalSynth for PiperSpeaker {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, PipelineError> {
        let voice = self.pick_voice(language).ok_or_else(|| {
            PipelineError::SynthesisUnavailable("no fallback voice loaded".to_string())
        })?;

        let text = text.to_string();
        let sample_rate = self.sample_rate;

        // Piper synthesis is CPU-bound
        let samples = tokio::task::spawn_blocking(move || -> Result<Vec<f32>, PipelineError> {
            let results = voice
                .synthesize_parallel(text, None)
                .map_err(|e| PipelineError::SynthesisUnavailable(e.to_string()))?;

            let mut samples = Vec::new();
            for result in results {
                let audio =
                    result.map_err(|e| PipelineError::SynthesisUnavailable(e.to_string()))?;
                samples.extend(audio.into_vec());
            }
            Ok(samples)
        })
        .await
        .map_err(|e| PipelineError::SynthesisUnavailable(format!("synthesis task: {}", e)))??;

        Ok(AudioClip::mono(samples, sample_rate))
    }
}
