use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{require_session, store_generated, with_session};
use crate::error::Result;
use crate::prompts::DEFAULT_QUIZ_QUESTIONS;
use crate::session::{ActiveQuiz, QuizSession, ScoreBand};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub text: String,
    pub num_questions: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub option_index: usize,
}

/// What the client sees of a quiz. The answer to the current question stays
/// hidden until it has been answered.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QuizView {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResultView>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct QuestionView {
    pub number: usize, // 1-based
    pub total: usize,
    pub score: usize,
    pub question: String,
    pub options: Vec<String>,
    pub answered: bool,
    pub is_last: bool,
    pub selected_answer: Option<usize>,
    pub correct_answer: Option<usize>,
    pub is_correct: Option<bool>,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ResultView {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub band: ScoreBand,
    pub message: String,
}

impl From<&ActiveQuiz> for QuestionView {
    fn from(quiz: &ActiveQuiz) -> Self {
        let current = quiz.current_question();
        let answered = quiz.answered();
        QuestionView {
            number: quiz.current_index + 1,
            total: quiz.questions.len(),
            score: quiz.score,
            question: current.question.clone(),
            options: current.options.clone(),
            answered,
            is_last: quiz.is_last_question(),
            selected_answer: quiz.selected_answer,
            correct_answer: answered.then_some(current.correct_answer),
            is_correct: quiz.selected_answer.map(|index| current.is_correct(index)),
            explanation: answered.then(|| current.explanation.clone()),
        }
    }
}

impl From<&QuizSession> for QuizView {
    fn from(session: &QuizSession) -> Self {
        QuizView {
            status: session.state_name().to_string(),
            question: match session {
                QuizSession::Active(quiz) => Some(QuestionView::from(quiz)),
                _ => None,
            },
            result: session.result().map(|result| ResultView {
                score: result.score,
                total: result.total,
                percentage: result.percentage,
                band: result.band,
                message: result.band.message().to_string(),
            }),
        }
    }
}

/// GET /api/sessions/:id/quiz
async fn get_quiz(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let context = require_session(&state, id).await?;
    Ok(Json(QuizView::from(&context.quiz)))
}

/// POST /api/sessions/:id/quiz
///
/// Generates questions and starts a quiz with them. Checked up front so no
/// model call is spent on a session that can't start a quiz.
async fn generate_quiz(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<Json<QuizView>> {
    require_session(&state, id).await?.quiz.ensure_can_start()?;

    let num_questions = payload.num_questions.unwrap_or(DEFAULT_QUIZ_QUESTIONS);
    let questions = state.assistant.generate_quiz(&payload.text, num_questions).await?;
    tracing::info!(session_id = %id, "Starting quiz with {} questions", questions.len());

    let view = store_generated(&state, id, |context| {
        context.quiz.start(questions)?;
        Ok(QuizView::from(&context.quiz))
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/quiz/answer
async fn submit_answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<QuizView>> {
    let view = with_session(&state, id, |context| {
        context.quiz.submit_answer(payload.option_index)?;
        Ok(QuizView::from(&context.quiz))
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/quiz/next
async fn next_question(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let view = with_session(&state, id, |context| {
        context.quiz.advance()?;
        Ok(QuizView::from(&context.quiz))
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/quiz/finish
async fn finish_quiz(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let view = with_session(&state, id, |context| {
        let result = context.quiz.finish()?;
        tracing::info!(
            session_id = %id,
            "Quiz complete: {}/{} ({:.1}%)",
            result.score,
            result.total,
            result.percentage
        );
        Ok(QuizView::from(&context.quiz))
    })
    .await?;
    Ok(Json(view))
}

/// POST /api/sessions/:id/quiz/reset
async fn reset_quiz(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<QuizView>> {
    let view = with_session(&state, id, |context| {
        context.quiz.reset()?;
        Ok(QuizView::from(&context.quiz))
    })
    .await?;
    Ok(Json(view))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sessions/:id/quiz", get(get_quiz).post(generate_quiz))
        .route("/sessions/:id/quiz/answer", post(submit_answer))
        .route("/sessions/:id/quiz/next", post(next_question))
        .route("/sessions/:id/quiz/finish", post(finish_quiz))
        .route("/sessions/:id/quiz/reset", post(reset_quiz))
}
