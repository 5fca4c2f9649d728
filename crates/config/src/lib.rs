//! Settings for the Thai echo lesson app
//!
//! Layered loading: compiled defaults, then an optional TOML file, then
//! `THAI_ECHO_*` environment overrides (double underscore separates nesting,
//! e.g. `THAI_ECHO_SYNTHESIS__ENDPOINT`).

pub mod constants;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),
}

/// Remote speech-synthesis endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// Base URL of the synthesis endpoint
    #[serde(default = "default_synthesis_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_synthesis_timeout_secs")]
    pub timeout_secs: u64,
    /// Safe per-request character limit; longer text is chunked
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            endpoint: default_synthesis_endpoint(),
            timeout_secs: default_synthesis_timeout_secs(),
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

/// Translation service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationSettings {
    /// Endpoint URL of the translation service
    #[serde(default = "default_translation_endpoint")]
    pub endpoint: String,
    /// Request timeout in seconds
    #[serde(default = "default_translation_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            endpoint: default_translation_endpoint(),
            timeout_secs: default_translation_timeout_secs(),
        }
    }
}

/// Playback pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackSettings {
    /// Speed factor for synthesized Thai speech (1.0 = normal)
    #[serde(default = "default_speech_rate")]
    pub speech_rate: f32,
    /// Pause between the original recording and the Thai playback (ms)
    #[serde(default = "default_cycle_gap_ms")]
    pub cycle_gap_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            speech_rate: default_speech_rate(),
            cycle_gap_ms: default_cycle_gap_ms(),
        }
    }
}

/// On-device fallback voice settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FallbackSettings {
    /// Directory holding Piper voice configs (`<lang>.onnx.json` per voice)
    #[serde(default)]
    pub voices_dir: Option<PathBuf>,
}

/// Top-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub synthesis: SynthesisSettings,
    #[serde(default)]
    pub translation: TranslationSettings,
    #[serde(default)]
    pub playback: PlaybackSettings,
    #[serde(default)]
    pub fallback: FallbackSettings,
}

impl Settings {
    /// Load settings from an optional TOML file plus environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let cfg = builder
            .add_source(
                config::Environment::with_prefix("THAI_ECHO")
                    // Single underscore after the prefix, double between
                    // nesting levels: THAI_ECHO_SYNTHESIS__ENDPOINT
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(cfg.try_deserialize()?)
    }
}

fn default_synthesis_endpoint() -> String {
    constants::endpoints::SYNTHESIS_DEFAULT.to_string()
}

fn default_synthesis_timeout_secs() -> u64 {
    10
}

fn default_max_chunk_chars() -> usize {
    constants::chunking::MAX_CHUNK_CHARS
}

fn default_translation_endpoint() -> String {
    constants::endpoints::TRANSLATION_DEFAULT.to_string()
}

fn default_translation_timeout_secs() -> u64 {
    15
}

fn default_speech_rate() -> f32 {
    constants::playback::SPEECH_RATE
}

fn default_cycle_gap_ms() -> u64 {
    constants::playback::CYCLE_GAP_MS
}
