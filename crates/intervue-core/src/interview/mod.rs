//! Interview conversation orchestration.
//!
//! - `InterviewService`: resolves sessions, assembles prompts, calls the
//!   LLM provider, and records both sides of each exchange
//! - `InterviewPromptBuilder`: synthesizes the interviewer prompt sequence
//! - `Transcriber`: pluggable speech-to-text seam for the voice path

pub mod prompt;
pub mod service;
pub mod transcriber;

pub use prompt::InterviewPromptBuilder;
pub use service::InterviewService;
pub use transcriber::{Transcriber, PLACEHOLDER_TRANSCRIPT};
