//! Centralized constants for the lesson app
//!
//! Single source of truth for endpoint defaults and tuning values used
//! across the workspace. Prefer these over hardcoding values at call sites.

/// Service endpoints (defaults for local development)
pub mod endpoints {
    /// Remote speech-synthesis endpoint
    pub const SYNTHESIS_DEFAULT: &str = "http://localhost:5002/api/tts";

    /// Translation service endpoint
    pub const TRANSLATION_DEFAULT: &str = "http://localhost:8080/translate";
}

/// Text chunking for the synthesis endpoint
pub mod chunking {
    /// Safe per-request character limit for the synthesis endpoint.
    /// Requests longer than this are split on word boundaries.
    pub const MAX_CHUNK_CHARS: usize = 200;
}

/// Playback pacing
pub mod playback {
    /// Thai speech is played at half speed so learners can follow
    /// the highlighted words.
    pub const SPEECH_RATE: f32 = 0.5;

    /// Gap between the original recording and the Thai playback (ms)
    pub const CYCLE_GAP_MS: u64 = 500;
}

/// Translation cache sizing
pub mod cache {
    /// Max cached translations before eviction kicks in
    pub const MAX_ENTRIES: usize = 1000;
}
