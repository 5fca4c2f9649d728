//! Remote synthesis endpoint client
//!
//! HTTP GET keyed by `(text, lang)` query parameters, returning playable
//! audio bytes. Requests are kept under the endpoint's safe size limit by
//! the chunker; this client just fetches and decodes one chunk's audio.

use std::time::Duration;

use thai_echo_core::{AudioClip, Language};

use crate::PipelineError;

use super::SynthBackend;

/// Remote synthesizer configuration
#[derive(Debug, Clone)]
pub struct RemoteSynthesizerConfig {
    /// Base URL of the synthesis endpoint
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RemoteSynthesizerConfig {
    fn default() -> Self {
        Self {
            endpoint: thai_echo_config::constants::endpoints::SYNTHESIS_DEFAULT.to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client for the remote synthesis endpoint.
pub struct RemoteSynthesizer {
    config: RemoteSynthesizerConfig,
    client: reqwest::Client,
}

impl RemoteSynthesizer {
    pub fn new(config: RemoteSynthesizerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        Self { config, client }
    }

    /// Decode response bytes into PCM.
    ///
    /// WAV decodes directly; with the `playback` feature, compressed formats
    /// (mp3, ogg, flac) go through rodio's decoder.
    fn decode_audio(bytes: &[u8]) -> Result<AudioClip, PipelineError> {
        if let Ok(clip) = AudioClip::from_wav_bytes(bytes) {
            return Ok(clip);
        }

        #[cfg(feature = "playback")]
        {
            use rodio::Source;

            let decoder = rodio::Decoder::new(std::io::Cursor::new(bytes.to_vec()))
                .map_err(|e| PipelineError::AudioDecode(e.to_string()))?;
            let sample_rate = decoder.sample_rate();
            let channels = decoder.channels();
            let samples: Vec<f32> = decoder.convert_samples().collect();

            return Ok(AudioClip {
                samples,
                sample_rate,
                channels,
            });
        }

        #[cfg(not(feature = "playback"))]
        Err(PipelineError::AudioDecode(
            "response is not WAV and compressed decode is disabled".to_string(),
        ))
    }
}

#[async_trait::async_trait]
impl SynthBackend for RemoteSynthesizer {
    async fn synthesize(&self, text: &str, language: Language) -> Result<AudioClip, PipelineError> {
        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[("text", text), ("lang", language.code())])
            .send()
            .await
            .map_err(|e| PipelineError::SynthesisUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(PipelineError::SynthesisUnavailable(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::SynthesisUnavailable(e.to_string()))?;

        // A non-audio body (e.g. an HTML error page) counts as unavailable
        Self::decode_audio(&bytes)
            .map_err(|e| PipelineError::SynthesisUnavailable(format!("non-audio response: {}", e)))
    }
}
