use serde::{Deserialize, Serialize};

use super::TransitionError;
use crate::models::QuizQuestion;

// ---- Quiz States ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuizSession {
    #[default]
    Idle,
    Active(ActiveQuiz),
    Complete(CompletedQuiz),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActiveQuiz {
    pub questions: Vec<QuizQuestion>,
    pub current_index: usize,
    pub score: usize,
    pub selected_answer: Option<usize>, // Some once the current question is answered
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CompletedQuiz {
    pub questions: Vec<QuizQuestion>,
    pub score: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Excellent,    // 80% and above
    Good,         // 60% up to 80%
    KeepStudying, // below 60%
}

impl ScoreBand {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ScoreBand::Excellent
        } else if percentage >= 60.0 {
            ScoreBand::Good
        } else {
            ScoreBand::KeepStudying
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent work! You've mastered this material!",
            ScoreBand::Good => "Good job! Review the material to improve further.",
            ScoreBand::KeepStudying => "Keep studying! Review the material and try again.",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub band: ScoreBand,
}

// ---- Implementation ----

impl ActiveQuiz {
    pub fn answered(&self) -> bool {
        self.selected_answer.is_some()
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.questions[self.current_index]
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }
}

impl CompletedQuiz {
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn percentage(&self) -> f64 {
        100.0 * self.score as f64 / self.total() as f64
    }

    pub fn result(&self) -> QuizResult {
        let percentage = self.percentage();
        QuizResult {
            score: self.score,
            total: self.total(),
            // One decimal place, as displayed
            percentage: (percentage * 10.0).round() / 10.0,
            band: ScoreBand::from_percentage(percentage),
        }
    }
}

impl QuizSession {
    pub fn state_name(&self) -> &'static str {
        match self {
            QuizSession::Idle => "idle",
            QuizSession::Active(_) => "active",
            QuizSession::Complete(_) => "complete",
        }
    }

    fn invalid(&self, action: &'static str) -> TransitionError {
        TransitionError::InvalidState {
            action,
            state: self.state_name(),
        }
    }

    /// A new quiz may only replace an idle or finished one.
    pub fn ensure_can_start(&self) -> Result<(), TransitionError> {
        match self {
            QuizSession::Active(_) => Err(self.invalid("start a quiz")),
            _ => Ok(()),
        }
    }

    pub fn start(&mut self, questions: Vec<QuizQuestion>) -> Result<(), TransitionError> {
        self.ensure_can_start()?;
        if questions.is_empty() {
            return Err(TransitionError::Empty);
        }

        *self = QuizSession::Active(ActiveQuiz {
            questions,
            current_index: 0,
            score: 0,
            selected_answer: None,
        });
        Ok(())
    }

    /// Records the answer to the current question and returns whether it was
    /// correct. Scoring happens here and nowhere else.
    pub fn submit_answer(&mut self, option_index: usize) -> Result<bool, TransitionError> {
        let QuizSession::Active(quiz) = self else {
            return Err(self.invalid("submit an answer"));
        };
        if quiz.answered() {
            return Err(TransitionError::AlreadyAnswered);
        }

        let question = quiz.current_question();
        if option_index >= question.options.len() {
            return Err(TransitionError::OptionOutOfRange {
                index: option_index,
                options: question.options.len(),
            });
        }

        let correct = question.is_correct(option_index);
        quiz.selected_answer = Some(option_index);
        if correct {
            quiz.score += 1;
        }
        Ok(correct)
    }

    pub fn advance(&mut self) -> Result<(), TransitionError> {
        let QuizSession::Active(quiz) = self else {
            return Err(self.invalid("advance"));
        };
        if !quiz.answered() {
            return Err(TransitionError::NotAnswered);
        }
        if quiz.is_last_question() {
            return Err(TransitionError::AtLastItem);
        }

        quiz.current_index += 1;
        quiz.selected_answer = None;
        Ok(())
    }

    pub fn finish(&mut self) -> Result<QuizResult, TransitionError> {
        let QuizSession::Active(quiz) = self else {
            return Err(self.invalid("finish"));
        };
        if !quiz.answered() {
            return Err(TransitionError::NotAnswered);
        }
        if !quiz.is_last_question() {
            return Err(TransitionError::NotOnLastQuestion);
        }

        let completed = CompletedQuiz {
            questions: std::mem::take(&mut quiz.questions),
            score: quiz.score,
        };
        let result = completed.result();
        *self = QuizSession::Complete(completed);
        Ok(result)
    }

    pub fn reset(&mut self) -> Result<(), TransitionError> {
        if !matches!(self, QuizSession::Complete(_)) {
            return Err(self.invalid("reset"));
        }
        *self = QuizSession::Idle;
        Ok(())
    }

    /// Final result, only available once the quiz is complete.
    pub fn result(&self) -> Option<QuizResult> {
        match self {
            QuizSession::Complete(completed) => Some(completed.result()),
            _ => None,
        }
    }
}
