//! Decoded audio clips
//!
//! The recording subsystem hands the session a finished clip; the playback
//! step consumes it unmodified. Samples are mono or interleaved f32 PCM.

use crate::{CoreError, Result};

/// A playable chunk of decoded audio.
#[derive(Debug, Clone, Default)]
pub struct AudioClip {
    /// PCM samples in [-1.0, 1.0], interleaved if `channels > 1`
    pub samples: Vec<f32>,
    /// Samples per second per channel
    pub sample_rate: u32,
    /// Channel count (1 = mono)
    pub channels: u16,
}

impl AudioClip {
    /// Create a mono clip from raw samples.
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
            channels: 1,
        }
    }

    /// Decode a WAV file (any hound-supported sample format) into a clip.
    pub fn from_wav_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = hound::WavReader::new(std::io::Cursor::new(bytes))
            .map_err(|e| CoreError::AudioDecode(e.to_string()))?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| CoreError::AudioDecode(e.to_string()))?,
            hound::SampleFormat::Int => {
                let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 / scale))
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| CoreError::AudioDecode(e.to_string()))?
            }
        };

        Ok(Self {
            samples,
            sample_rate: spec.sample_rate,
            channels: spec.channels,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration at normal speed.
    pub fn duration(&self) -> std::time::Duration {
        if self.sample_rate == 0 || self.channels == 0 {
            return std::time::Duration::ZERO;
        }
        let frames = self.samples.len() as u64 / self.channels as u64;
        std::time::Duration::from_secs_f64(frames as f64 / self.sample_rate as f64)
    }
}
