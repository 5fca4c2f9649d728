//! Lesson session: state machine, event stream, and cycle driver

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{broadcast, watch, RwLock};

use thai_echo_config::Settings;
use thai_echo_core::{
    word_spans, AudioClip, Language, Transcriber, Translator, Utterance, WordSpan,
};
use thai_echo_pipeline::{
    AudioPlayer, FallbackSpeaker, HighlightSequencer, LocalSynth, PlaybackCycle,
    PlaybackCycleConfig, SequencerConfig, SynthBackend,
};

use crate::SessionError;

/// Lesson session configuration
#[derive(Debug, Clone, Default)]
pub struct LessonSessionConfig {
    /// Workspace settings (chunk limit, rates, pacing)
    pub settings: Settings,
}

/// Explicit lesson state.
///
/// Replaces ambient recording/processing booleans: there is exactly one
/// state value, owned by the session, and every transition goes through
/// `set_state` so subscribers see each change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonState {
    /// Waiting for the user
    Idle,
    /// Capturing microphone audio
    Recording,
    /// Transcribing, translating, or playing back
    Processing,
}

/// Lesson session events
#[derive(Debug, Clone)]
pub enum LessonEvent {
    /// State changed
    StateChanged { old: LessonState, new: LessonState },
    /// Recording started
    RecordingStarted,
    /// English transcript available
    Transcript { text: String },
    /// Thai translation available, with its displayable word spans
    Translation { text: String, words: Vec<WordSpan> },
    /// Playback cycle finished (including any fallback speech)
    CycleComplete,
    /// Transcription or translation failed
    Error(String),
    /// Session reset, utterance cleared
    Reset,
}

/// One user's lesson session.
pub struct LessonSession {
    session_id: String,
    state: Arc<RwLock<LessonState>>,
    utterance: Arc<RwLock<Option<Utterance>>>,
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    cycle: PlaybackCycle,
    fallback: Arc<FallbackSpeaker>,
    event_tx: broadcast::Sender<LessonEvent>,
}

impl LessonSession {
    /// Wire up a session from its collaborator seams.
    pub fn new(
        session_id: impl Into<String>,
        config: LessonSessionConfig,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        synth: Arc<dyn SynthBackend>,
        local_synth: Arc<dyn LocalSynth>,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        let settings = &config.settings;

        let fallback = Arc::new(FallbackSpeaker::new(
            local_synth,
            player.clone(),
            settings.playback.speech_rate,
        ));

        let sequencer = HighlightSequencer::new(
            synth,
            player.clone(),
            fallback.clone(),
            SequencerConfig {
                speech_rate: settings.playback.speech_rate,
                max_chunk_chars: settings.synthesis.max_chunk_chars,
            },
        );

        let cycle = PlaybackCycle::new(
            player,
            sequencer,
            PlaybackCycleConfig {
                gap: std::time::Duration::from_millis(settings.playback.cycle_gap_ms),
            },
        );

        Self {
            session_id: session_id.into(),
            state: Arc::new(RwLock::new(LessonState::Idle)),
            utterance: Arc::new(RwLock::new(None)),
            transcriber,
            translator,
            cycle,
            fallback,
            event_tx,
        }
    }

    /// Wire up a session with a generated id.
    pub fn with_generated_id(
        config: LessonSessionConfig,
        transcriber: Arc<dyn Transcriber>,
        translator: Arc<dyn Translator>,
        synth: Arc<dyn SynthBackend>,
        local_synth: Arc<dyn LocalSynth>,
        player: Arc<dyn AudioPlayer>,
    ) -> Self {
        Self::new(
            uuid::Uuid::new_v4().to_string(),
            config,
            transcriber,
            translator,
            synth,
            local_synth,
            player,
        )
    }

    /// Begin a recording. Rejected unless the session is idle, so a fresh
    /// recording can never overlap a running playback cycle.
    pub async fn start_recording(&self) -> Result<(), SessionError> {
        {
            let state = *self.state.read().await;
            if state != LessonState::Idle {
                return Err(SessionError::Busy(state));
            }
        }
        self.set_state(LessonState::Recording).await;
        let _ = self.event_tx.send(LessonEvent::RecordingStarted);
        Ok(())
    }

    /// Finish the recording and run the full lesson turn: transcribe,
    /// translate, replace the current utterance, and play the cycle.
    ///
    /// Transcription/translation failures propagate (and put the session
    /// back to idle); playback failures do not — the cycle is best-effort.
    pub async fn finish_recording(&self, audio: AudioClip) -> Result<(), SessionError> {
        {
            let state = *self.state.read().await;
            if state != LessonState::Recording {
                return Err(SessionError::Busy(state));
            }
        }
        self.set_state(LessonState::Processing).await;

        let result = self.process_turn(audio).await;
        self.set_state(LessonState::Idle).await;

        if let Err(e) = &result {
            let _ = self.event_tx.send(LessonEvent::Error(e.to_string()));
        }
        result
    }

    async fn process_turn(&self, audio: AudioClip) -> Result<(), SessionError> {
        let english_text = self.transcriber.transcribe(&audio).await?;

        if english_text.trim().is_empty() {
            // Nothing was said; no cycle to run
            tracing::debug!(session_id = %self.session_id, "empty transcript, skipping turn");
            return Ok(());
        }

        let _ = self.event_tx.send(LessonEvent::Transcript {
            text: english_text.clone(),
        });

        let thai_text = self
            .translator
            .translate(&english_text, self.transcriber.language(), Language::Thai)
            .await?;

        let _ = self.event_tx.send(LessonEvent::Translation {
            text: thai_text.clone(),
            words: word_spans(&thai_text),
        });

        let utterance = Utterance::new(english_text, thai_text, audio);

        // Replace, never mutate: the previous turn's utterance is dropped
        *self.utterance.write().await = Some(utterance.clone());

        self.cycle.run(&utterance).await;
        let _ = self.event_tx.send(LessonEvent::CycleComplete);

        Ok(())
    }

    /// Clear the session: cancel any fallback speech still playing, drop the
    /// current utterance, return to idle.
    pub async fn reset(&self) {
        self.fallback.cancel();
        *self.utterance.write().await = None;
        self.set_state(LessonState::Idle).await;
        let _ = self.event_tx.send(LessonEvent::Reset);
    }

    /// Subscribe to session events
    pub fn subscribe(&self) -> broadcast::Receiver<LessonEvent> {
        self.event_tx.subscribe()
    }

    /// Highlight state for the rendering layer
    pub fn highlights(&self) -> watch::Receiver<HashSet<usize>> {
        self.cycle.highlights()
    }

    /// Get current state
    pub async fn state(&self) -> LessonState {
        *self.state.read().await
    }

    /// The current turn's utterance, if any
    pub async fn utterance(&self) -> Option<Utterance> {
        self.utterance.read().await.clone()
    }

    /// Get session ID
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Set state and emit event
    async fn set_state(&self, new_state: LessonState) {
        let old_state = {
            let mut state = self.state.write().await;
            let old = *state;
            *state = new_state;
            old
        };

        if old_state != new_state {
            let _ = self.event_tx.send(LessonEvent::StateChanged {
                old: old_state,
                new: new_state,
            });
        }
    }
}
