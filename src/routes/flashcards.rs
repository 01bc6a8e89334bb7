use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require_session, store_generated, with_session};
use crate::error::Result;
use crate::prompts::DEFAULT_FLASHCARDS;
use crate::session::{FlashcardDeck, FlashcardSession, TransitionError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateFlashcardsRequest {
    pub text: String,
    pub num_cards: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FlashcardView {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardView>,
}

/// Only the visible side of the current card.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CardView {
    pub number: usize,
    pub total: usize,
    pub show_back: bool,
    pub text: String,
    pub has_previous: bool,
    pub has_next: bool,
}

impl From<&FlashcardDeck> for CardView {
    fn from(deck: &FlashcardDeck) -> Self {
        let card = deck.current_card();
        CardView {
            number: deck.current_index + 1,
            total: deck.cards.len(),
            show_back: deck.show_back,
            text: if deck.show_back {
                card.back.clone()
            } else {
                card.front.clone()
            },
            has_previous: deck.has_previous(),
            has_next: deck.has_next(),
        }
    }
}

impl From<&FlashcardSession> for FlashcardView {
    fn from(session: &FlashcardSession) -> Self {
        FlashcardView {
            status: session.state_name().to_string(),
            card: match session {
                FlashcardSession::Browsing(deck) => Some(CardView::from(deck)),
                FlashcardSession::Idle => None,
            },
        }
    }
}

/// GET /api/sessions/:id/flashcards
async fn get_flashcards(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FlashcardView>> {
    let context = require_session(&state, id).await?;
    Ok(Json(FlashcardView::from(&context.flashcards)))
}

/// POST /api/sessions/:id/flashcards
async fn generate_flashcards(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateFlashcardsRequest>,
) -> Result<Json<FlashcardView>> {
    require_session(&state, id).await?;

    let num_cards = payload.num_cards.unwrap_or(DEFAULT_FLASHCARDS);
    let cards = state.assistant.generate_flashcards(&payload.text, num_cards).await?;
    tracing::info!(session_id = %id, "Starting flashcard deck with {} cards", cards.len());

    let view = store_generated(&state, id, |context| {
        context.flashcards.start(cards)?;
        Ok(FlashcardView::from(&context.flashcards))
    })
    .await?;
    Ok(Json(view))
}

async fn transition(
    state: &AppState,
    id: Uuid,
    step: fn(&mut FlashcardSession) -> std::result::Result<(), TransitionError>,
) -> Result<Json<FlashcardView>> {
    let view = with_session(state, id, |context| {
        step(&mut context.flashcards)?;
        Ok(FlashcardView::from(&context.flashcards))
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/flashcards/flip
async fn flip(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FlashcardView>> {
    transition(&state, id, |session| session.flip().map(|_| ())).await
}

/// POST /api/sessions/:id/flashcards/next
async fn next(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FlashcardView>> {
    transition(&state, id, FlashcardSession::next).await
}

/// POST /api/sessions/:id/flashcards/previous
async fn previous(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FlashcardView>> {
    transition(&state, id, FlashcardSession::previous).await
}

/// POST /api/sessions/:id/flashcards/reset
async fn reset(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<FlashcardView>> {
    transition(&state, id, |session| {
        session.reset();
        Ok(())
    })
    .await
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/:id/flashcards", get(get_flashcards).post(generate_flashcards))
        .route("/sessions/:id/flashcards/flip", post(flip))
        .route("/sessions/:id/flashcards/next", post(next))
        .route("/sessions/:id/flashcards/previous", post(previous))
        .route("/sessions/:id/flashcards/reset", post(reset))
}
