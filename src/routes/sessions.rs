use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_session;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub quiz: String,
    pub flashcards: String,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

/// POST /api/sessions
async fn create_session(State(state): State<AppState>) -> Result<(StatusCode, Json<SessionResponse>)> {
    let id = state.sessions.create().await;
    let response = session_response(&state, id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/sessions/:id
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>> {
    Ok(Json(session_response(&state, id).await?))
}

/// DELETE /api/sessions/:id
async fn delete_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    if !state.sessions.remove(id).await {
        return Err(AppError::SessionNotFound(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn session_response(state: &AppState, id: Uuid) -> Result<SessionResponse> {
    let context = require_session(state, id).await?;
    Ok(SessionResponse {
        session_id: id,
        quiz: context.quiz.state_name().to_string(),
        flashcards: context.flashcards.state_name().to_string(),
        created_at: context.created_at,
        last_active: context.last_active,
    })
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions", post(create_session))
        .route("/sessions/:id", axum::routing::get(get_session).delete(delete_session))
}
