//! Stateless workflows: concept explanation and note summarization.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::SummaryLength;
use crate::state::AppState;

const ALLOWED_EXTENSIONS: [&str; 2] = ["txt", "md"];

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub concept: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    #[serde(default)]
    pub length: SummaryLength,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
    pub length: SummaryLength,
}

/// POST /api/explain
async fn explain(
    State(state): State<AppState>,
    Json(payload): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>> {
    let explanation = state.assistant.explain(&payload.concept).await?;
    Ok(Json(ExplainResponse { explanation }))
}

/// POST /api/summarize
async fn summarize(
    State(state): State<AppState>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummaryResponse>> {
    let summary = state.assistant.summarize(&payload.text, payload.length).await?;
    Ok(Json(SummaryResponse {
        summary,
        length: payload.length,
    }))
}

fn has_allowed_extension(file_name: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large.".to_string())
    } else {
        AppError::BadRequest(format!("Invalid upload: {}", err))
    }
}

/// POST /api/summarize/upload
///
/// Multipart form with a `file` part (`.txt` or `.md`, UTF-8) and an
/// optional `length` part.
async fn summarize_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummaryResponse>> {
    let mut text = None;
    let mut length = SummaryLength::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                if !has_allowed_extension(&file_name) {
                    return Err(AppError::BadRequest(
                        "Only .txt and .md files are supported.".to_string(),
                    ));
                }
                let bytes = field
                    .bytes()
                    .await
                    .map_err(upload_error)?;
                let content = String::from_utf8(bytes.to_vec()).map_err(|_| {
                    AppError::BadRequest("Uploaded file is not valid UTF-8 text.".to_string())
                })?;
                tracing::debug!("Received {} ({} bytes)", file_name, content.len());
                text = Some(content);
            }
            Some("length") => {
                let value = field
                    .text()
                    .await
                    .map_err(upload_error)?;
                length = value.parse().map_err(AppError::BadRequest)?;
            }
            _ => {}
        }
    }

    let text = text.ok_or_else(|| AppError::BadRequest("Please upload a file to summarize.".to_string()))?;
    let summary = state.assistant.summarize(&text, length).await?;
    Ok(Json(SummaryResponse { summary, length }))
}

pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/explain", post(explain))
        .route("/summarize", post(summarize))
        .route(
            "/summarize/upload",
            post(summarize_upload).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
