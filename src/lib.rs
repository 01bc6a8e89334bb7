//! Study Spark: an LLM-backed study assistant.
//!
//! Four workflows sit behind a JSON API: concept explanation, note
//! summarization, quiz generation and flashcard study. Quizzes and flashcard
//! decks are driven through explicit per-session state machines
//! ([`session`]) held in an in-memory [`session::SessionStore`].

pub mod assistant;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod parser;
pub mod prompts;
pub mod routes;
pub mod session;
pub mod state;

pub use assistant::StudyAssistant;
pub use config::Config;
pub use error::AppError;
pub use gateway::{GatewayError, GeminiClient, TextGenerator};
pub use models::{Flashcard, QuizQuestion, SummaryLength};
pub use parser::{parse_records, ParseError};
pub use state::AppState;
