//! Playback cycle orchestration
//!
//! One lesson cycle on the output side: replay the user's recording, pause
//! briefly, then run the highlighted Thai playback. Best effort throughout —
//! a failed step is logged and the cycle still resolves.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use thai_echo_core::{Language, Utterance};

use crate::highlight::HighlightSequencer;
use crate::playback::{play_best_effort, AudioPlayer};

/// Cycle pacing.
#[derive(Debug, Clone)]
pub struct PlaybackCycleConfig {
    /// Pause between the original recording and the Thai playback
    pub gap: Duration,
}

impl Default for PlaybackCycleConfig {
    fn default() -> Self {
        Self {
            gap: Duration::from_millis(thai_echo_config::constants::playback::CYCLE_GAP_MS),
        }
    }
}

/// Sequences "play original recording" → gap → highlighted Thai playback.
pub struct PlaybackCycle {
    player: Arc<dyn AudioPlayer>,
    sequencer: HighlightSequencer,
    config: PlaybackCycleConfig,
}

impl PlaybackCycle {
    pub fn new(
        player: Arc<dyn AudioPlayer>,
        sequencer: HighlightSequencer,
        config: PlaybackCycleConfig,
    ) -> Self {
        Self {
            player,
            sequencer,
            config,
        }
    }

    /// Highlight state for the rendering layer.
    pub fn highlights(&self) -> watch::Receiver<HashSet<usize>> {
        self.sequencer.highlights()
    }

    /// Run one playback cycle to completion. Each step suspends until the
    /// previous one finishes; nothing overlaps. Never returns an error.
    pub async fn run(&self, utterance: &Utterance) {
        // Original recording at normal speed, failures swallowed
        play_best_effort(&*self.player, &utterance.audio, 1.0).await;

        tokio::time::sleep(self.config.gap).await;

        self.sequencer
            .run(&utterance.thai_text, Language::Thai)
            .await;

        tracing::debug!("playback cycle complete");
    }
}
