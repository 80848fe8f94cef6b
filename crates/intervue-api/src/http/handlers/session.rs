//! Session HTTP handlers.
//!
//! Endpoints:
//! - POST /api/v1/chat/session                        - Create a new session
//! - GET  /api/v1/chat/conversation/{session_id}      - Conversation history
//! - PUT  /api/v1/chat/session/{session_id}/context   - Partial context update

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use intervue_types::chat::{ContextUpdate, ConversationHistory};

use crate::http::error::AppError;
use crate::state::AppState;

/// Response body for POST /chat/session.
#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
}

/// Acknowledgement body for PUT /chat/session/{id}/context.
#[derive(Debug, Serialize)]
pub struct UpdateContextResponse {
    pub message: String,
}

/// POST /api/v1/chat/session - Create a new conversation session.
pub async fn create_session(State(state): State<AppState>) -> Json<CreateSessionResponse> {
    let session_id = state.interview.create_session();
    Json(CreateSessionResponse { session_id })
}

/// GET /api/v1/chat/conversation/{session_id} - Get conversation history.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ConversationHistory>, AppError> {
    let history = state.interview.history(&session_id)?;
    Ok(Json(history))
}

/// PUT /api/v1/chat/session/{session_id}/context - Update session context.
///
/// The body is a partial [`ContextUpdate`]; unknown fields are silently
/// ignored, absent fields left untouched.
pub async fn update_context(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(update): Json<ContextUpdate>,
) -> Result<Json<UpdateContextResponse>, AppError> {
    state.interview.update_context(&session_id, update)?;
    Ok(Json(UpdateContextResponse {
        message: "Context updated successfully".to_string(),
    }))
}
