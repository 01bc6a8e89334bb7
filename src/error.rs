use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::gateway::GatewayError;
use crate::parser::ParseError;
use crate::session::TransitionError;

/// Application result type
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("generation failed: {0}")]
    Gateway(#[from] GatewayError),
    #[error("could not read the generated {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: ParseError,
    },
    #[error("generation produced no usable {0}")]
    EmptyGeneration(&'static str),
    #[error("illegal transition: {0}")]
    IllegalTransition(#[from] TransitionError),
    #[error("session {0} not found")]
    SessionNotFound(Uuid),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Gateway(e) => {
                tracing::error!("Model gateway error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "Generation failed. Please try again.".to_string(),
                )
            }
            AppError::Parse { what, source } => {
                tracing::warn!("Discarding unparseable {}: {}", what, source);
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    format!("Could not read the generated {}. Please try generating again.", what),
                )
            }
            AppError::EmptyGeneration(what) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("No {} were generated. Please try again with more detail.", what),
            ),
            AppError::IllegalTransition(e) => {
                tracing::debug!("Rejected transition: {}", e);
                (StatusCode::CONFLICT, e.to_string())
            }
            AppError::SessionNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
