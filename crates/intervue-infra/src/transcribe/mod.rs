//! Voice transcription backends.
//!
//! Real speech-to-text is not wired in yet; the shipped implementation is
//! a stub that satisfies the `Transcriber` port with a fixed placeholder.

use tracing::debug;

use intervue_core::interview::transcriber::{Transcriber, PLACEHOLDER_TRANSCRIPT};
use intervue_types::error::TranscriptionError;

/// No-op transcriber.
///
/// Ignores the audio payload and returns [`PLACEHOLDER_TRANSCRIPT`]. Swap
/// in a real backend (e.g. Azure Speech) by implementing `Transcriber` and
/// wiring it into the app state; the orchestrator is agnostic.
#[derive(Debug, Default)]
pub struct StubTranscriber;

impl StubTranscriber {
    pub fn new() -> Self {
        Self
    }
}

impl Transcriber for StubTranscriber {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        debug!(audio_bytes = audio.len(), "Stub transcription requested");
        Ok(PLACEHOLDER_TRANSCRIPT.to_string())
    }
}
