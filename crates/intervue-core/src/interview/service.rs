//! Interview orchestrator: session resolution, prompt assembly, provider
//! calls, and message recording.
//!
//! `InterviewService` coordinates the `SessionStore`, the
//! `InterviewPromptBuilder`, and the `LlmProvider` to run one exchange of
//! the mock interview. Generation never fails from the caller's point of
//! view: any provider error is logged and replaced by a fixed fallback
//! reply, which is recorded in the session like any other assistant turn.

use std::time::Duration;

use tracing::{info, warn};
use uuid::Uuid;

use intervue_types::chat::{
    ChatMessage, ContextUpdate, ConversationHistory, QuestionContext, Session,
};
use intervue_types::error::SessionError;
use intervue_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use crate::interview::prompt::InterviewPromptBuilder;
use crate::interview::transcriber::{Transcriber, PLACEHOLDER_TRANSCRIPT};
use crate::llm::provider::LlmProvider;
use crate::session::store::SessionStore;

/// Sampling temperature for every generation request.
const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens per reply.
const MAX_OUTPUT_TOKENS: u32 = 500;

/// Presence penalty, kept slightly positive to reduce repetition.
const PRESENCE_PENALTY: f32 = 0.1;

/// Frequency penalty, kept slightly positive to reduce repetition.
const FREQUENCY_PENALTY: f32 = 0.1;

/// Bound on the single provider attempt. A timeout follows the same
/// fallback path as any other provider failure.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reply substituted whenever generation fails.
pub const FALLBACK_RESPONSE: &str = "I apologize, but I'm having trouble processing your \
     message right now. Could you please try again?";

/// Orchestrates mock-interview exchanges against an LLM provider.
///
/// Generic over the provider and transcriber so infrastructure backends
/// (and test mocks) plug in without the orchestrator knowing about them.
/// Owns the session store; all access goes through this service.
pub struct InterviewService<P: LlmProvider, T: Transcriber> {
    store: SessionStore,
    provider: P,
    transcriber: T,
    model: String,
}

impl<P: LlmProvider, T: Transcriber> InterviewService<P, T> {
    /// Create a new interview service with an empty session store.
    pub fn new(provider: P, transcriber: T, model: impl Into<String>) -> Self {
        Self {
            store: SessionStore::new(),
            provider,
            transcriber,
            model: model.into(),
        }
    }

    /// Access the session store.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Model identifier used for every generation request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Create a fresh session and return its id.
    pub fn create_session(&self) -> Uuid {
        self.store.get_or_create(None)
    }

    /// Conversation history for a session.
    pub fn history(&self, session_id: &Uuid) -> Result<ConversationHistory, SessionError> {
        let session = self.store.get(session_id).ok_or(SessionError::NotFound)?;
        Ok(ConversationHistory {
            session_id: session.id,
            message_count: session.messages.len(),
            messages: session.messages,
            context: session.context,
        })
    }

    /// Merge a partial context update into a session.
    ///
    /// Unlike the store-level operation, a missing session is surfaced to
    /// the caller as `NotFound`.
    pub fn update_context(
        &self,
        session_id: &Uuid,
        update: ContextUpdate,
    ) -> Result<(), SessionError> {
        if self.store.update_context(session_id, update) {
            Ok(())
        } else {
            Err(SessionError::NotFound)
        }
    }

    /// Run one chat exchange: record the user turn, generate the
    /// interviewer's reply, record it, and return it.
    ///
    /// The session grows by exactly two messages on every path; on provider
    /// failure the recorded reply is [`FALLBACK_RESPONSE`].
    pub async fn generate_response(
        &self,
        user_text: &str,
        session_id: Option<Uuid>,
        question_context: Option<QuestionContext>,
        code_context: Option<String>,
    ) -> ChatMessage {
        let session_id = self.store.get_or_create(session_id);

        if let Some(question) = question_context.clone() {
            self.store
                .update_context(&session_id, ContextUpdate::question(question));
        }
        if let Some(code) = code_context.clone() {
            self.store
                .update_context(&session_id, ContextUpdate::code(code));
        }

        // Snapshot before appending the user turn so the prompt sees each
        // message exactly once, and so no store guard is held while the
        // provider call is in flight.
        let snapshot = self
            .store
            .get(&session_id)
            .unwrap_or_else(|| Session::new(session_id));

        let user_message = ChatMessage::user(session_id, user_text);
        self.store.append_message(&session_id, user_message);

        let prompt = InterviewPromptBuilder::build(
            &snapshot.context,
            &snapshot.messages,
            user_text,
            question_context.as_ref(),
            code_context.as_deref(),
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: prompt,
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
            presence_penalty: PRESENCE_PENALTY,
            frequency_penalty: FREQUENCY_PENALTY,
        };

        let reply = match self.complete_with_timeout(&request).await {
            Ok(response) => {
                info!(
                    session_id = %session_id,
                    model = %response.model,
                    output_tokens = response.usage.output_tokens,
                    "Generated interviewer response"
                );
                ChatMessage::assistant(session_id, response.content)
            }
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Generation failed, substituting fallback reply");
                ChatMessage::assistant(session_id, FALLBACK_RESPONSE)
            }
        };

        self.store.append_message(&session_id, reply.clone());
        reply
    }

    /// Run one voice exchange: transcribe the audio, then forward the
    /// transcript through [`generate_response`](Self::generate_response).
    ///
    /// Returns the transcript alongside the interviewer's reply. A failed
    /// transcription degrades to [`PLACEHOLDER_TRANSCRIPT`] rather than
    /// erroring, matching the chat fallback policy.
    pub async fn process_voice(
        &self,
        audio: &[u8],
        session_id: Option<Uuid>,
    ) -> (String, ChatMessage) {
        let session_id = self.store.get_or_create(session_id);

        let transcript = match self.transcriber.transcribe(audio).await {
            Ok(text) => text,
            Err(err) => {
                warn!(session_id = %session_id, error = %err, "Transcription failed, using placeholder transcript");
                PLACEHOLDER_TRANSCRIPT.to_string()
            }
        };

        let reply = self
            .generate_response(&transcript, Some(session_id), None, None)
            .await;

        (transcript, reply)
    }

    /// Single bounded provider attempt. No retries: one request per
    /// exchange is the contract.
    async fn complete_with_timeout(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        let timeout = Duration::from_secs(REQUEST_TIMEOUT_SECS);
        match tokio::time::timeout(timeout, self.provider.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(LlmError::Timeout(REQUEST_TIMEOUT_SECS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intervue_types::chat::{MessageRole, ProblemExample};
    use intervue_types::error::TranscriptionError;
    use intervue_types::llm::Usage;

    /// Provider that either echoes a canned reply or fails, recording the
    /// last request it saw.
    struct MockProvider {
        reply: Result<String, ()>,
        seen: std::sync::Mutex<Vec<CompletionRequest>>,
    }

    impl MockProvider {
        fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                reply: Err(()),
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    impl LlmProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Ok(text) => Ok(CompletionResponse {
                    id: "mock-1".to_string(),
                    content: text.clone(),
                    model: request.model.clone(),
                    usage: Usage::default(),
                }),
                Err(()) => Err(LlmError::Provider {
                    message: "mock outage".to_string(),
                }),
            }
        }
    }

    struct OkTranscriber;

    impl Transcriber for OkTranscriber {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
            Ok(PLACEHOLDER_TRANSCRIPT.to_string())
        }
    }

    struct BrokenTranscriber;

    impl Transcriber for BrokenTranscriber {
        async fn transcribe(&self, _audio: &[u8]) -> Result<String, TranscriptionError> {
            Err(TranscriptionError::Unavailable("no backend".to_string()))
        }
    }

    fn service_with(provider: MockProvider) -> InterviewService<MockProvider, OkTranscriber> {
        InterviewService::new(provider, OkTranscriber, "test-model")
    }

    fn sample_question() -> QuestionContext {
        QuestionContext {
            id: "q-1".to_string(),
            number: 1,
            question_type: "coding".to_string(),
            difficulty: "easy".to_string(),
            title: "Reverse String".to_string(),
            description: "Reverse a string in place.".to_string(),
            category: None,
            examples: Some(vec![ProblemExample {
                input: "\"abc\"".to_string(),
                output: "\"cba\"".to_string(),
                explanation: None,
            }]),
            constraints: Some(vec!["1 <= n <= 10^5".to_string()]),
            hints: None,
        }
    }

    #[tokio::test]
    async fn test_success_appends_user_and_assistant() {
        let service = service_with(MockProvider::replying("Sounds good, walk me through it."));

        let reply = service.generate_response("I'd use two pointers", None, None, None).await;
        assert_eq!(reply.role, MessageRole::Assistant);
        assert_eq!(reply.content, "Sounds good, walk me through it.");

        let session_id = reply.session_id.expect("reply must carry session id");
        let history = service.history(&session_id).unwrap();
        assert_eq!(history.message_count, 2);
        assert_eq!(history.messages[0].role, MessageRole::User);
        assert_eq!(history.messages[0].content, "I'd use two pointers");
        assert_eq!(history.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_failure_still_appends_two_messages() {
        let service = service_with(MockProvider::failing());

        let reply = service.generate_response("hello?", None, None, None).await;
        assert_eq!(reply.content, FALLBACK_RESPONSE);

        let session_id = reply.session_id.unwrap();
        let history = service.history(&session_id).unwrap();
        // Fallback is recorded like a normal assistant turn
        assert_eq!(history.message_count, 2);
        assert_eq!(history.messages[1].content, FALLBACK_RESPONSE);
    }

    #[tokio::test]
    async fn test_existing_session_accumulates_history() {
        let service = service_with(MockProvider::replying("ok"));
        let session_id = service.create_session();

        service
            .generate_response("first", Some(session_id), None, None)
            .await;
        service
            .generate_response("second", Some(session_id), None, None)
            .await;

        let history = service.history(&session_id).unwrap();
        assert_eq!(history.message_count, 4);
        assert_eq!(history.messages[0].content, "first");
        assert_eq!(history.messages[2].content, "second");
        assert_eq!(service.store().len(), 1);
    }

    #[tokio::test]
    async fn test_contexts_are_folded_into_session() {
        let service = service_with(MockProvider::replying("ok"));

        let reply = service
            .generate_response(
                "here's my attempt",
                None,
                Some(sample_question()),
                Some("def reverse(s): return s[::-1]".to_string()),
            )
            .await;

        let session = service.store().get(&reply.session_id.unwrap()).unwrap();
        let question = session.context.current_question.as_ref().unwrap();
        assert_eq!(question.title, "Reverse String");
        assert_eq!(
            session.context.user_code.as_deref(),
            Some("def reverse(s): return s[::-1]")
        );
    }

    #[tokio::test]
    async fn test_prompt_carries_problem_and_code_turns() {
        let service = service_with(MockProvider::replying("ok"));

        service
            .generate_response(
                "review please",
                None,
                Some(sample_question()),
                Some("x = 1".to_string()),
            )
            .await;

        let seen = service.provider.seen.lock().unwrap();
        let request = seen.last().unwrap();
        assert_eq!(request.model, "test-model");
        assert_eq!(request.max_tokens, 500);
        assert!((request.temperature - 0.7).abs() < f32::EPSILON);

        // system + user + problem context + code context
        assert_eq!(request.messages.len(), 4);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert!(request.messages[2].content.starts_with("Problem context:"));
        assert!(request.messages[3].content.contains("```python"));
    }

    #[tokio::test]
    async fn test_voice_uses_placeholder_transcript() {
        let service = service_with(MockProvider::replying("Tell me more."));

        let (transcript, reply) = service.process_voice(b"fake-audio", None).await;
        assert_eq!(transcript, PLACEHOLDER_TRANSCRIPT);

        let history = service.history(&reply.session_id.unwrap()).unwrap();
        assert_eq!(history.message_count, 2);
        assert_eq!(history.messages[0].content, PLACEHOLDER_TRANSCRIPT);
    }

    #[tokio::test]
    async fn test_voice_transcription_failure_degrades_to_placeholder() {
        let service: InterviewService<MockProvider, BrokenTranscriber> =
            InterviewService::new(MockProvider::replying("ok"), BrokenTranscriber, "test-model");

        let (transcript, reply) = service.process_voice(b"fake-audio", None).await;
        assert_eq!(transcript, PLACEHOLDER_TRANSCRIPT);
        assert!(reply.session_id.is_some());
    }

    #[tokio::test]
    async fn test_history_unknown_session_is_not_found() {
        let service = service_with(MockProvider::replying("ok"));
        let err = service.history(&Uuid::now_v7()).unwrap_err();
        assert!(matches!(err, SessionError::NotFound));
    }

    #[tokio::test]
    async fn test_update_context_unknown_session_is_not_found() {
        let service = service_with(MockProvider::replying("ok"));
        let err = service
            .update_context(&Uuid::now_v7(), ContextUpdate::code("x"))
            .unwrap_err();
        assert!(matches!(err, SessionError::NotFound));
        assert!(service.store().is_empty());
    }

    #[tokio::test]
    async fn test_create_then_message_scenario() {
        let service = service_with(MockProvider::replying("O(n) with a hash map."));
        let session_id = service.create_session();

        let reply = service
            .generate_response("What is the time complexity?", Some(session_id), None, None)
            .await;

        assert_eq!(reply.session_id, Some(session_id));
        let history = service.history(&session_id).unwrap();
        assert_eq!(history.message_count, 2);
    }
}
