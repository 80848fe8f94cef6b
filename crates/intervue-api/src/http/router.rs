//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, plus `/health` at the root.
//! Middleware: CORS, request tracing.

use axum::http::HeaderValue;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
///
/// `allowed_origins` feeds the CORS layer; an empty list falls back to
/// allowing any origin (development posture).
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api_routes = Router::new()
        // Chat
        .route("/chat/message", post(handlers::chat::send_message))
        .route("/chat/voice", post(handlers::chat::send_voice))
        // Sessions
        .route("/chat/session", post(handlers::session::create_session))
        .route(
            "/chat/conversation/{session_id}",
            get(handlers::session::get_conversation),
        )
        .route(
            "/chat/session/{session_id}/context",
            put(handlers::session::update_context),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
