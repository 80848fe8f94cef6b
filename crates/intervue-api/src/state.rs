//! Application state wiring the orchestrator to its infrastructure.
//!
//! `AppState` pins the generic `InterviewService` to the concrete infra
//! implementations: the OpenAI provider (type-erased behind
//! `BoxLlmProvider` so tests can inject mocks) and the stub transcriber.

use std::sync::Arc;

use intervue_core::interview::InterviewService;
use intervue_core::llm::BoxLlmProvider;
use intervue_infra::config::Settings;
use intervue_infra::llm::OpenAiProvider;
use intervue_infra::transcribe::StubTranscriber;

/// Concrete service type used by the HTTP layer.
pub type ApiInterviewService = InterviewService<BoxLlmProvider, StubTranscriber>;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub interview: Arc<ApiInterviewService>,
}

impl AppState {
    /// Initialize from the process environment.
    ///
    /// Fails fast when the OpenAI API key is absent: the process refuses to
    /// start rather than discovering the missing credential on the first
    /// chat request.
    pub fn init() -> anyhow::Result<Self> {
        Self::with_settings(&Settings::from_env())
    }

    /// Initialize from explicit settings.
    pub fn with_settings(settings: &Settings) -> anyhow::Result<Self> {
        let provider = OpenAiProvider::new(&settings.openai_api_key, settings.model.clone())?;
        let service = InterviewService::new(
            BoxLlmProvider::new(provider),
            StubTranscriber::new(),
            settings.model.clone(),
        );
        Ok(Self {
            interview: Arc::new(service),
        })
    }

    /// Wrap an already-built service. Used by integration tests to inject a
    /// mock provider through `BoxLlmProvider`.
    pub fn with_service(service: ApiInterviewService) -> Self {
        Self {
            interview: Arc::new(service),
        }
    }
}
