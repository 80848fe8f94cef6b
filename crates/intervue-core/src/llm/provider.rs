//! LlmProvider trait definition.
//!
//! The single external dependency of the orchestrator: a chat-completion
//! API that takes an ordered list of role-tagged turns and returns one
//! completion.

use intervue_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). For dynamic
/// dispatch, wrap implementations in
/// [`BoxLlmProvider`](super::BoxLlmProvider).
///
/// Implementations live in intervue-infra (e.g., `OpenAiProvider`).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
