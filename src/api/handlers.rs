//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse};
use super::AppState;
use crate::alexa::{RequestEnvelope, ResponseEnvelope};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::TraceLayer;

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Skill endpoint
        .route("/alexa", post(handle_alexa))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================
// Skill Endpoint
// ============================================================

async fn handle_alexa(
    State(state): State<AppState>,
    Json(envelope): Json<RequestEnvelope>,
) -> Result<Json<ResponseEnvelope>, AppError> {
    if let Some(expected) = state.skill_id.as_deref() {
        let actual = envelope.application_id();
        if actual != Some(expected) {
            tracing::warn!(application_id = ?actual, "Rejecting request for another skill");
            return Err(AppError::BadRequest(
                "Request is not addressed to this skill".to_string(),
            ));
        }
    }

    Ok(Json(state.runtime.handle(&envelope).await))
}

// ============================================================
// Health & Version
// ============================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn get_version() -> &'static str {
    concat!("noodle-timer ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
