//! Transcriber trait definition.
//!
//! Voice transcription is a pluggable capability: the orchestrator only
//! needs audio bytes in, text out. The shipped implementation is a stub
//! (see `intervue-infra`); a real speech-to-text backend slots in without
//! changing the orchestrator.

use intervue_types::error::TranscriptionError;

/// Transcript substituted when no real transcription backend is wired in,
/// or when the configured backend fails.
pub const PLACEHOLDER_TRANSCRIPT: &str =
    "[Voice message processed - transcription not yet implemented]";

/// Trait for speech-to-text backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in intervue-infra (e.g., `StubTranscriber`).
pub trait Transcriber: Send + Sync {
    /// Transcribe an audio clip to text.
    fn transcribe(
        &self,
        audio: &[u8],
    ) -> impl std::future::Future<Output = Result<String, TranscriptionError>> + Send;
}
