//! Interview session, message, and context types for Intervue.
//!
//! These types model a mock-interview conversation: the session holding the
//! message history, the per-session interview context, and the
//! caller-supplied description of the problem currently under discussion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export MessageRole from the llm module (stored messages and prompt
// turns share the same role vocabulary).
pub use crate::llm::MessageRole;

/// A single message within an interview session.
///
/// Messages are append-only and immutable once created; ordering within a
/// session is insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Reference to an uploaded audio clip, when the message arrived by voice.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Owning session, set once the message is appended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
}

impl ChatMessage {
    /// Create a user message bound to a session.
    pub fn user(session_id: Uuid, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::User, content)
    }

    /// Create an assistant message bound to a session.
    pub fn assistant(session_id: Uuid, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::Assistant, content)
    }

    fn new(session_id: Uuid, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            role,
            content: content.into(),
            created_at: Utc::now(),
            audio_url: None,
            session_id: Some(session_id),
        }
    }
}

/// One worked example attached to an interview problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemExample {
    pub input: String,
    pub output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Caller-supplied description of the interview problem currently being
/// discussed. Supplied per request and folded into the session context;
/// never persisted on its own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionContext {
    pub id: String,
    pub number: u32,
    #[serde(rename = "type")]
    pub question_type: String,
    pub difficulty: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<ProblemExample>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<String>>,
}

/// Per-session interview state: which question the candidate is on, what
/// language they are working in, and their latest code snapshot.
///
/// The field set is a closed schema -- context updates may only touch the
/// fields below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_question: Option<QuestionContext>,
    #[serde(default = "default_question_number")]
    pub question_number: u32,
    #[serde(default = "default_total_questions")]
    pub total_questions: u32,
    #[serde(default = "default_interview_type")]
    pub interview_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_code: Option<String>,
    #[serde(default = "default_programming_language")]
    pub programming_language: String,
}

fn default_question_number() -> u32 {
    1
}

fn default_total_questions() -> u32 {
    5
}

fn default_interview_type() -> String {
    "mock_interview".to_string()
}

fn default_programming_language() -> String {
    "python".to_string()
}

impl Default for InterviewContext {
    fn default() -> Self {
        Self {
            current_question: None,
            question_number: default_question_number(),
            total_questions: default_total_questions(),
            interview_type: default_interview_type(),
            user_code: None,
            programming_language: default_programming_language(),
        }
    }
}

/// Partial update to an [`InterviewContext`].
///
/// Every field is optional; `None` leaves the corresponding context field
/// unchanged. Unknown keys in an incoming JSON body are silently ignored by
/// serde, which is the documented policy for context updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub current_question: Option<QuestionContext>,
    pub question_number: Option<u32>,
    pub total_questions: Option<u32>,
    pub interview_type: Option<String>,
    pub user_code: Option<String>,
    pub programming_language: Option<String>,
}

impl ContextUpdate {
    /// Update that folds a question context into the session.
    pub fn question(question: QuestionContext) -> Self {
        Self {
            current_question: Some(question),
            ..Self::default()
        }
    }

    /// Update that folds a candidate code snapshot into the session.
    pub fn code(code: impl Into<String>) -> Self {
        Self {
            user_code: Some(code.into()),
            ..Self::default()
        }
    }

    /// Whether this update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.current_question.is_none()
            && self.question_number.is_none()
            && self.total_questions.is_none()
            && self.interview_type.is_none()
            && self.user_code.is_none()
            && self.programming_language.is_none()
    }
}

impl InterviewContext {
    /// Apply a partial update, overwriting only the fields that are set.
    pub fn apply(&mut self, update: ContextUpdate) {
        if let Some(question) = update.current_question {
            self.current_question = Some(question);
        }
        if let Some(number) = update.question_number {
            self.question_number = number;
        }
        if let Some(total) = update.total_questions {
            self.total_questions = total;
        }
        if let Some(kind) = update.interview_type {
            self.interview_type = kind;
        }
        if let Some(code) = update.user_code {
            self.user_code = Some(code);
        }
        if let Some(language) = update.programming_language {
            self.programming_language = language;
        }
    }
}

/// A single ongoing interview conversation.
///
/// Lives for the process lifetime; sessions are never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub context: InterviewContext,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create an empty session with default context and current timestamps.
    pub fn new(id: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id,
            messages: Vec::new(),
            context: InterviewContext::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Conversation history returned to the boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub session_id: Uuid,
    pub messages: Vec<ChatMessage>,
    pub context: InterviewContext,
    pub message_count: usize,
}
