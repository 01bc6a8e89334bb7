pub mod flashcards;
pub mod health;
pub mod quiz;
pub mod sessions;
pub mod study;

use axum::Router;
use tower_http::services::ServeDir;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::session::SessionContext;
use crate::state::AppState;

/// Creates the main router: JSON API under `/api`, static front end otherwise.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .nest("/api", api_routes(state))
        .fallback_service(static_files)
}

fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(study::routes(state.config.server.max_upload_bytes))
        .merge(sessions::routes())
        .merge(quiz::routes())
        .merge(flashcards::routes())
        .with_state(state)
}

/// Runs a synchronous transition against one session context.
async fn with_session<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut SessionContext) -> Result<T>,
) -> Result<T> {
    state
        .sessions
        .update(id, f)
        .await
        .ok_or(AppError::SessionNotFound(id))?
}

/// Like [`with_session`], for results of a generation that may have outlived
/// its session.
async fn store_generated<T>(
    state: &AppState,
    id: Uuid,
    f: impl FnOnce(&mut SessionContext) -> Result<T>,
) -> Result<T> {
    match state.sessions.update(id, f).await {
        Some(result) => result,
        None => {
            tracing::info!(session_id = %id, "Session ended during generation, discarding result");
            Err(AppError::SessionNotFound(id))
        }
    }
}

/// Copy of the session for read-only views. Reading counts as activity.
async fn require_session(state: &AppState, id: Uuid) -> Result<SessionContext> {
    state
        .sessions
        .update(id, |context| context.clone())
        .await
        .ok_or(AppError::SessionNotFound(id))
}
