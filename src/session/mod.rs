//! Per-user study sessions.
//!
//! Every user action is an explicit transition on a plain, serializable state
//! value. A rejected transition returns [`TransitionError`] and leaves the
//! state exactly as it was.

pub mod flashcards;
pub mod quiz;
pub mod store;

use thiserror::Error;

pub use flashcards::{FlashcardDeck, FlashcardSession};
pub use quiz::{ActiveQuiz, CompletedQuiz, QuizResult, QuizSession, ScoreBand};
pub use store::{SessionContext, SessionStore};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },
    #[error("cannot start a session with no items")]
    Empty,
    #[error("the current question has already been answered")]
    AlreadyAnswered,
    #[error("the current question has not been answered yet")]
    NotAnswered,
    #[error("option {index} is out of range for {options} options")]
    OptionOutOfRange { index: usize, options: usize },
    #[error("already at the last item")]
    AtLastItem,
    #[error("already at the first item")]
    AtFirstItem,
    #[error("the quiz still has unanswered questions")]
    NotOnLastQuestion,
}
