//! Integration tests for the lesson cycle (record -> transcribe -> translate
//! -> playback with highlighting)
//!
//! These use scripted seams throughout: no network, no audio device.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::timeout;

use thai_echo_core::{AudioClip, CoreError, Language, Result, Transcriber, Translator};
use thai_echo_pipeline::{
    AudioPlayer, LocalSynth, NullPlayer, PipelineError, SynthBackend,
};
use thai_echo_session::{LessonEvent, LessonSession, LessonSessionConfig, LessonState, SessionError};

struct FixedTranscriber {
    text: &'static str,
}

#[async_trait::async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _: &AudioClip) -> Result<String> {
        Ok(self.text.to_string())
    }
}

struct FailingTranscriber;

#[async_trait::async_trait]
impl Transcriber for FailingTranscriber {
    async fn transcribe(&self, _: &AudioClip) -> Result<String> {
        Err(CoreError::Transcription("model not loaded".into()))
    }
}

struct FixedTranslator {
    text: &'static str,
    calls: Mutex<usize>,
}

impl FixedTranslator {
    fn new(text: &'static str) -> Arc<Self> {
        Arc::new(Self {
            text,
            calls: Mutex::new(0),
        })
    }
}

#[async_trait::async_trait]
impl Translator for FixedTranslator {
    async fn translate(&self, _: &str, _: Language, _: Language) -> Result<String> {
        *self.calls.lock() += 1;
        Ok(self.text.to_string())
    }
}

/// Records the language pair of every translation request.
struct PairRecordingTranslator {
    pairs: Mutex<Vec<(Language, Language)>>,
}

impl PairRecordingTranslator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            pairs: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl Translator for PairRecordingTranslator {
    async fn translate(&self, _: &str, from: Language, to: Language) -> Result<String> {
        self.pairs.lock().push((from, to));
        Ok("สวัสดี".to_string())
    }
}

/// Records synthesized chunk texts; optionally fails every call.
struct ScriptedSynth {
    requests: Mutex<Vec<String>>,
    fail: bool,
}

impl ScriptedSynth {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            fail,
        })
    }
}

#[async_trait::async_trait]
impl SynthBackend for ScriptedSynth {
    async fn synthesize(
        &self,
        text: &str,
        _: Language,
    ) -> std::result::Result<AudioClip, PipelineError> {
        self.requests.lock().push(text.to_string());
        if self.fail {
            Err(PipelineError::SynthesisUnavailable("scripted outage".into()))
        } else {
            Ok(AudioClip::mono(vec![0.0; 220], 22050))
        }
    }
}

/// Records texts spoken through the on-device fallback voice.
struct RecordingLocalSynth {
    spoken: Mutex<Vec<String>>,
}

impl RecordingLocalSynth {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            spoken: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait::async_trait]
impl LocalSynth for RecordingLocalSynth {
    async fn synthesize(
        &self,
        text: &str,
        _: Language,
    ) -> std::result::Result<AudioClip, PipelineError> {
        self.spoken.lock().push(text.to_string());
        Ok(AudioClip::mono(vec![0.0; 220], 22050))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .try_init();
}

fn fast_config() -> LessonSessionConfig {
    let mut config = LessonSessionConfig::default();
    config.settings.playback.cycle_gap_ms = 1;
    config
}

fn session_with(
    transcriber: Arc<dyn Transcriber>,
    translator: Arc<dyn Translator>,
    synth: Arc<dyn SynthBackend>,
    local: Arc<dyn LocalSynth>,
) -> LessonSession {
    init_tracing();
    let player: Arc<dyn AudioPlayer> = Arc::new(NullPlayer::new());
    LessonSession::new(
        "test-session",
        fast_config(),
        transcriber,
        translator,
        synth,
        local,
        player,
    )
}

fn recording() -> AudioClip {
    AudioClip::mono(vec![0.1; 1600], 16000)
}

#[tokio::test]
async fn test_lesson_lifecycle() {
    let session = session_with(
        Arc::new(FixedTranscriber { text: "hello world" }),
        FixedTranslator::new("สวัสดี ชาว โลก"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    assert_eq!(session.state().await, LessonState::Idle);
    assert_eq!(session.session_id(), "test-session");

    session.start_recording().await.unwrap();
    assert_eq!(session.state().await, LessonState::Recording);

    session.finish_recording(recording()).await.unwrap();
    assert_eq!(session.state().await, LessonState::Idle);

    let utterance = session.utterance().await.expect("utterance stored");
    assert_eq!(utterance.english_text, "hello world");
    assert_eq!(utterance.thai_text, "สวัสดี ชาว โลก");
}

#[tokio::test]
async fn test_translation_pair_follows_transcriber_language() {
    let translator = PairRecordingTranslator::new();
    let session = session_with(
        Arc::new(FixedTranscriber { text: "hello" }),
        translator.clone(),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();

    // Source language comes from the transcriber seam, target is Thai
    assert_eq!(*translator.pairs.lock(), vec![(Language::English, Language::Thai)]);
}

#[tokio::test]
async fn test_busy_rejection() {
    let session = session_with(
        Arc::new(FixedTranscriber { text: "hi" }),
        FixedTranslator::new("สวัสดี"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    session.start_recording().await.unwrap();

    // A second recording cannot start while one is active
    let err = session.start_recording().await.unwrap_err();
    assert!(matches!(err, SessionError::Busy(LessonState::Recording)));

    // Finishing without a recording in progress is rejected too
    session.finish_recording(recording()).await.unwrap();
    let err = session.finish_recording(recording()).await.unwrap_err();
    assert!(matches!(err, SessionError::Busy(LessonState::Idle)));
}

#[tokio::test]
async fn test_event_stream() {
    let session = session_with(
        Arc::new(FixedTranscriber { text: "good morning" }),
        FixedTranslator::new("อรุณ สวัสดิ์"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    let mut event_rx = session.subscribe();

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();

    let mut saw_transcript = false;
    let mut saw_translation = false;
    let mut saw_complete = false;

    while let Ok(Ok(event)) = timeout(Duration::from_millis(100), event_rx.recv()).await {
        match event {
            LessonEvent::Transcript { text } => {
                assert_eq!(text, "good morning");
                saw_transcript = true;
            }
            LessonEvent::Translation { text, words } => {
                assert_eq!(text, "อรุณ สวัสดิ์");
                assert_eq!(words.len(), 2);
                assert_eq!(words[1].index, 1);
                saw_translation = true;
            }
            LessonEvent::CycleComplete => {
                saw_complete = true;
                break;
            }
            _ => {}
        }
    }

    assert!(saw_transcript && saw_translation && saw_complete);
}

#[tokio::test]
async fn test_synthesis_outage_speaks_full_text_via_fallback() {
    let synth = ScriptedSynth::new(true);
    let local = RecordingLocalSynth::new();

    let session = session_with(
        Arc::new(FixedTranscriber { text: "hello" }),
        FixedTranslator::new("สวัสดี ครับ ทุก คน"),
        synth.clone(),
        local.clone(),
    );

    session.start_recording().await.unwrap();
    // Playback failures never surface as session errors
    session.finish_recording(recording()).await.unwrap();

    // Only the first chunk was attempted remotely
    assert_eq!(synth.requests.lock().len(), 1);
    // Fallback spoke the complete translation, not the remaining chunks
    assert_eq!(*local.spoken.lock(), vec!["สวัสดี ครับ ทุก คน"]);
    // Highlighting ends cleared
    assert!(session.highlights().borrow().is_empty());
}

#[tokio::test]
async fn test_empty_transcript_skips_translation_and_cycle() {
    let translator = FixedTranslator::new("ไม่ ควร เกิด");
    let synth = ScriptedSynth::new(false);

    let session = session_with(
        Arc::new(FixedTranscriber { text: "   " }),
        translator.clone(),
        synth.clone(),
        RecordingLocalSynth::new(),
    );

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();

    assert_eq!(*translator.calls.lock(), 0);
    assert!(synth.requests.lock().is_empty());
    assert!(session.utterance().await.is_none());
    assert_eq!(session.state().await, LessonState::Idle);
}

#[tokio::test]
async fn test_empty_translation_resolves_without_synthesis() {
    let synth = ScriptedSynth::new(false);

    let session = session_with(
        Arc::new(FixedTranscriber { text: "hmm" }),
        FixedTranslator::new(""),
        synth.clone(),
        RecordingLocalSynth::new(),
    );

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();

    assert!(synth.requests.lock().is_empty());
    assert_eq!(session.state().await, LessonState::Idle);
}

#[tokio::test]
async fn test_transcription_failure_returns_to_idle() {
    let session = session_with(
        Arc::new(FailingTranscriber),
        FixedTranslator::new("สวัสดี"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    let mut event_rx = session.subscribe();

    session.start_recording().await.unwrap();
    let err = session.finish_recording(recording()).await.unwrap_err();
    assert!(matches!(err, SessionError::Core(_)));
    assert_eq!(session.state().await, LessonState::Idle);

    // An Error event is emitted for the UI
    let mut saw_error = false;
    while let Ok(Ok(event)) = timeout(Duration::from_millis(100), event_rx.recv()).await {
        if let LessonEvent::Error(_) = event {
            saw_error = true;
            break;
        }
    }
    assert!(saw_error);
}

#[tokio::test]
async fn test_utterance_replaced_each_cycle_and_cleared_on_reset() {
    let session = session_with(
        Arc::new(FixedTranscriber { text: "again" }),
        FixedTranslator::new("อีก ครั้ง"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
    );

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();
    let first = session.utterance().await.unwrap();

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();
    let second = session.utterance().await.unwrap();

    assert_eq!(first.thai_text, second.thai_text);

    session.reset().await;
    assert!(session.utterance().await.is_none());
    assert_eq!(session.state().await, LessonState::Idle);
}

#[tokio::test]
async fn test_highlights_observed_during_playback() {
    // Player that snapshots highlight state on every play call
    struct Snapshotter {
        highlights: Mutex<Option<tokio::sync::watch::Receiver<std::collections::HashSet<usize>>>>,
        seen: Mutex<Vec<std::collections::HashSet<usize>>>,
    }

    #[async_trait::async_trait]
    impl AudioPlayer for Snapshotter {
        async fn play(
            &self,
            _: &AudioClip,
            _: f32,
        ) -> std::result::Result<(), PipelineError> {
            let current = self
                .highlights
                .lock()
                .as_ref()
                .map(|rx| rx.borrow().clone())
                .unwrap_or_default();
            self.seen.lock().push(current);
            Ok(())
        }
    }

    let snapshotter = Arc::new(Snapshotter {
        highlights: Mutex::new(None),
        seen: Mutex::new(Vec::new()),
    });

    let session = LessonSession::new(
        "highlight-session",
        fast_config(),
        Arc::new(FixedTranscriber { text: "hi" }),
        FixedTranslator::new("สวัสดี ครับ"),
        ScriptedSynth::new(false),
        RecordingLocalSynth::new(),
        snapshotter.clone(),
    );
    *snapshotter.highlights.lock() = Some(session.highlights());

    session.start_recording().await.unwrap();
    session.finish_recording(recording()).await.unwrap();

    let seen = snapshotter.seen.lock();
    // Play 1 is the original recording (no highlights), play 2 the single
    // Thai chunk covering both words
    assert_eq!(seen.len(), 2);
    assert!(seen[0].is_empty());
    assert_eq!(seen[1], std::collections::HashSet::from([0, 1]));
}
