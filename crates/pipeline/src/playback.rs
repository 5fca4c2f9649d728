//! Audio output seam
//!
//! A player turns a decoded clip into sound and suspends the caller until
//! playback finishes. The rodio implementation needs a host output device
//! and sits behind the `playback` feature; `NullPlayer` keeps everything
//! testable headless.

use thai_echo_core::AudioClip;

use crate::PipelineError;

/// Plays a single clip to completion.
#[async_trait::async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Play `clip` at `speed` (1.0 = normal), resolving when playback ends.
    ///
    /// Returns an error if the host refuses to play; callers on the chunk
    /// path use it to trigger fallback, everyone else swallows it via
    /// [`play_best_effort`].
    async fn play(&self, clip: &AudioClip, speed: f32) -> Result<(), PipelineError>;
}

/// Play a clip and swallow any failure.
///
/// This is the "resolve on end or error" playback step: a failed playback
/// is logged and forward progress continues.
pub async fn play_best_effort(player: &dyn AudioPlayer, clip: &AudioClip, speed: f32) {
    if let Err(e) = player.play(clip, speed).await {
        tracing::warn!(error = %e, "playback failed, continuing");
    }
}

/// Discards audio and resolves after the clip's (speed-adjusted) duration
/// would have elapsed. Used in tests and headless runs.
#[derive(Debug, Default)]
pub struct NullPlayer {
    /// When false, resolve immediately instead of sleeping out the duration
    pub realtime: bool,
}

impl NullPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AudioPlayer for NullPlayer {
    async fn play(&self, clip: &AudioClip, speed: f32) -> Result<(), PipelineError> {
        if self.realtime && speed > 0.0 {
            tokio::time::sleep(clip.duration().div_f32(speed)).await;
        }
        Ok(())
    }
}

/// Rodio-backed player using the default output device.
#[cfg(feature = "playback")]
#[derive(Debug, Default)]
pub struct RodioPlayer;

#[cfg(feature = "playback")]
impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "playback")]
#[async_trait::async_trait]
impl AudioPlayer for RodioPlayer {
    async fn play(&self, clip: &AudioClip, speed: f32) -> Result<(), PipelineError> {
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;

        if clip.is_empty() {
            return Ok(());
        }

        let samples = clip.samples.clone();
        let sample_rate = clip.sample_rate;
        let channels = clip.channels.max(1);

        // Dropping this future (a cancelled fallback utterance) must stop
        // the sink instead of letting the clip play out on the blocking pool.
        let stop = Arc::new(AtomicBool::new(false));

        struct StopGuard {
            flag: Arc<AtomicBool>,
            armed: bool,
        }
        impl Drop for StopGuard {
            fn drop(&mut self) {
                if self.armed {
                    self.flag.store(true, Ordering::Relaxed);
                }
            }
        }
        let mut guard = StopGuard {
            flag: stop.clone(),
            armed: true,
        };

        // Opening the stream and waiting out the sink both block, so the
        // whole playback runs on the blocking pool.
        let task = tokio::task::spawn_blocking(move || {
            let (_stream, handle) = rodio::OutputStream::try_default()
                .map_err(|e| PipelineError::PlaybackRejected(e.to_string()))?;
            let sink = rodio::Sink::try_new(&handle)
                .map_err(|e| PipelineError::PlaybackRejected(e.to_string()))?;

            sink.set_speed(speed);
            sink.append(rodio::buffer::SamplesBuffer::new(channels, sample_rate, samples));
            while !sink.empty() {
                if stop.load(Ordering::Relaxed) {
                    sink.stop();
                    break;
                }
                std::thread::sleep(std::time::Duration::from_millis(20));
            }
            Ok(())
        });

        let result = task
            .await
            .map_err(|e| PipelineError::PlaybackRejected(format!("playback task failed: {}", e)))?;
        guard.armed = false;
        result
    }
}
