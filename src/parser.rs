//! Decoding of structured model output.
//!
//! Models are asked for a bare JSON array but routinely wrap it in prose or
//! code fences, so the array is recovered by slicing from the first `[` to
//! the last `]` before decoding. Decoding is all-or-nothing: one bad element
//! rejects the whole batch.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{Flashcard, QuizQuestion};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("model output is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("model output is not a JSON array")]
    NotAnArray,
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// A record type the model can be asked to produce as a JSON array.
pub trait Record: DeserializeOwned {
    /// Cross-field checks that the type system can't express.
    fn validate(&self) -> Result<(), String> {
        Ok(())
    }
}

/// Any number of options is accepted as long as `correct_answer` points at
/// one of them; the prompt asks for four but models don't always comply.
impl Record for QuizQuestion {
    fn validate(&self) -> Result<(), String> {
        if self.correct_answer >= self.options.len() {
            return Err(format!(
                "correct_answer {} is out of range for {} options",
                self.correct_answer,
                self.options.len()
            ));
        }
        Ok(())
    }
}

impl Record for Flashcard {}

/// Returns the slice between the first `[` and the last `]`, inclusive, or the
/// whole text when either bracket is missing.
fn json_array_slice(raw: &str) -> &str {
    match (raw.find('['), raw.rfind(']')) {
        (Some(start), Some(end)) if end >= start => &raw[start..=end],
        // A `]` before the first `[` can't enclose an array.
        (Some(_), Some(_)) => "",
        _ => raw,
    }
}

pub fn parse_records<R: Record>(raw: &str) -> Result<Vec<R>, ParseError> {
    let value: Value = serde_json::from_str(json_array_slice(raw).trim())?;

    let Value::Array(items) = value else {
        return Err(ParseError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let record: R = serde_json::from_value(item).map_err(|e| ParseError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
            record
                .validate()
                .map_err(|reason| ParseError::InvalidRecord { index, reason })?;
            Ok(record)
        })
        .collect()
}

pub fn parse_quiz(raw: &str) -> Result<Vec<QuizQuestion>, ParseError> {
    parse_records(raw)
}

pub fn parse_flashcards(raw: &str) -> Result<Vec<Flashcard>, ParseError> {
    parse_records(raw)
}
