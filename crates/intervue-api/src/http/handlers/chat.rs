//! Chat HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/message - Send a message and get the interviewer's reply
//! - POST /api/v1/chat/voice   - Send base64 audio and get transcript + reply

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use intervue_types::chat::{ChatMessage, QuestionContext};

use crate::http::error::AppError;
use crate::state::AppState;

/// Request body for POST /chat/message.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub content: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
    #[serde(default)]
    pub question_context: Option<QuestionContext>,
    #[serde(default)]
    pub code_context: Option<String>,
}

/// Response body for POST /chat/message.
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub message: ChatMessage,
    pub session_id: Uuid,
}

/// Request body for POST /chat/voice. `audio_data` is base64-encoded.
#[derive(Debug, Deserialize)]
pub struct VoiceMessageRequest {
    pub audio_data: String,
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Response body for POST /chat/voice.
#[derive(Debug, Serialize)]
pub struct VoiceMessageResponse {
    pub transcribed_text: String,
    pub ai_response: ChatMessage,
    pub session_id: Uuid,
}

/// POST /api/v1/chat/message - Send a message and get the AI response.
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<ChatMessageRequest>,
) -> Result<Json<ChatMessageResponse>, AppError> {
    let message = state
        .interview
        .generate_response(
            &request.content,
            request.session_id,
            request.question_context,
            request.code_context,
        )
        .await;

    let session_id = message
        .session_id
        .ok_or_else(|| AppError::Internal("generated message carries no session id".to_string()))?;

    Ok(Json(ChatMessageResponse {
        message,
        session_id,
    }))
}

/// POST /api/v1/chat/voice - Process a voice message and get the AI response.
pub async fn send_voice(
    State(state): State<AppState>,
    Json(request): Json<VoiceMessageRequest>,
) -> Result<Json<VoiceMessageResponse>, AppError> {
    let audio = BASE64
        .decode(request.audio_data.as_bytes())
        .map_err(|_| AppError::Validation("audio_data is not valid base64".to_string()))?;

    let (transcribed_text, ai_response) = state
        .interview
        .process_voice(&audio, request.session_id)
        .await;

    let session_id = ai_response
        .session_id
        .ok_or_else(|| AppError::Internal("generated message carries no session id".to_string()))?;

    Ok(Json(VoiceMessageResponse {
        transcribed_text,
        ai_response,
        session_id,
    }))
}
