use thiserror::Error;

/// Errors related to session lookup.
///
/// Store mutations never raise on an unknown id (they no-op and report it
/// via a `bool`); this error exists for the boundary operations that must
/// surface a missing session to the caller.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found")]
    NotFound,
}

/// Errors raised during service configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("OpenAI API key not configured")]
    MissingApiKey,
}

/// Errors from voice transcription backends.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("transcription backend unavailable: {0}")]
    Unavailable(String),

    #[error("invalid audio payload: {0}")]
    InvalidPayload(String),
}
