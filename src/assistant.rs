use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::gateway::TextGenerator;
use crate::models::{Flashcard, QuizQuestion, SummaryLength};
use crate::parser;
use crate::prompts;

/// The four study workflows: build a prompt, call the model, decode the reply.
#[derive(Clone)]
pub struct StudyAssistant {
    generator: Arc<dyn TextGenerator>,
}

fn require_text<'a>(text: &'a str, message: &str) -> Result<&'a str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::BadRequest(message.to_string()));
    }
    Ok(text)
}

fn require_count(count: usize, range: RangeInclusive<usize>, what: &str) -> Result<usize> {
    if !range.contains(&count) {
        return Err(AppError::BadRequest(format!(
            "Number of {} must be between {} and {}",
            what,
            range.start(),
            range.end()
        )));
    }
    Ok(count)
}

impl StudyAssistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub async fn explain(&self, concept: &str) -> Result<String> {
        let concept = require_text(concept, "Please enter a concept or question to explain.")?;
        tracing::info!("Explaining concept ({} chars)", concept.len());
        Ok(self.generator.generate(&prompts::explain_concept(concept)).await?)
    }

    pub async fn summarize(&self, text: &str, length: SummaryLength) -> Result<String> {
        let text = require_text(text, "Please provide text to summarize.")?;
        tracing::info!(?length, "Summarizing {} chars of notes", text.len());
        Ok(self
            .generator
            .generate(&prompts::summarize_notes(text, length))
            .await?)
    }

    pub async fn generate_quiz(&self, text: &str, num_questions: usize) -> Result<Vec<QuizQuestion>> {
        let text = require_text(text, "Please provide text or a topic for the quiz.")?;
        let requested = require_count(num_questions, prompts::QUIZ_QUESTION_RANGE, "questions")?;

        let response = self.generator.generate(&prompts::quiz(text, requested)).await?;
        let questions = parser::parse_quiz(&response).map_err(|source| AppError::Parse {
            what: "quiz",
            source,
        })?;

        if questions.is_empty() {
            return Err(AppError::EmptyGeneration("questions"));
        }
        if questions.len() != requested {
            tracing::info!("Requested {} questions, model returned {}", requested, questions.len());
        }
        Ok(questions)
    }

    pub async fn generate_flashcards(&self, text: &str, num_cards: usize) -> Result<Vec<Flashcard>> {
        let text = require_text(text, "Please provide text or a topic for the flashcards.")?;
        let requested = require_count(num_cards, prompts::FLASHCARD_RANGE, "flashcards")?;

        let response = self
            .generator
            .generate(&prompts::flashcards(text, requested))
            .await?;
        let cards = parser::parse_flashcards(&response).map_err(|source| AppError::Parse {
            what: "flashcards",
            source,
        })?;

        if cards.is_empty() {
            return Err(AppError::EmptyGeneration("flashcards"));
        }
        if cards.len() != requested {
            tracing::info!("Requested {} flashcards, model returned {}", requested, cards.len());
        }
        Ok(cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replies with a fixed response and remembers the last prompt.
    struct FixedGenerator {
        reply: std::result::Result<String, ()>,
        last_prompt: Mutex<Option<String>>,
    }

    impl FixedGenerator {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                last_prompt: Mutex::new(None),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(()),
                last_prompt: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(&self, prompt: &str) -> std::result::Result<String, GatewayError> {
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply.clone().map_err(|_| GatewayError::RateLimited)
        }
    }

    #[tokio::test]
    async fn test_short_quiz_is_accepted_as_is() {
        let generator = FixedGenerator::replying(
            r#"[{"question": "q", "options": ["a", "b", "c", "d"], "correct_answer": 3, "explanation": "e"}]"#,
        );
        let assistant = StudyAssistant::new(generator.clone());
        let questions = assistant.generate_quiz("photosynthesis", 5).await.unwrap();
        assert_eq!(questions.len(), 1);

        let prompt = generator.last_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.contains("exactly 5 multiple-choice questions"));
    }

    #[tokio::test]
    async fn test_empty_generation_is_an_error() {
        let assistant = StudyAssistant::new(FixedGenerator::replying("[]"));
        let err = assistant.generate_flashcards("cells", 10).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyGeneration("flashcards")));
    }

    #[tokio::test]
    async fn test_parse_failure_is_reported() {
        let assistant = StudyAssistant::new(FixedGenerator::replying("I cannot do that."));
        let err = assistant.generate_quiz("topic", 3).await.unwrap_err();
        assert!(matches!(err, AppError::Parse { what: "quiz", .. }));
    }

    #[tokio::test]
    async fn test_gateway_failure_is_reported() {
        let assistant = StudyAssistant::new(FixedGenerator::failing());
        let err = assistant.explain("gravity").await.unwrap_err();
        assert!(matches!(err, AppError::Gateway(GatewayError::RateLimited)));
    }

    #[tokio::test]
    async fn test_blank_input_never_reaches_the_model() {
        let generator = FixedGenerator::replying("unused");
        let assistant = StudyAssistant::new(generator.clone());
        assert!(matches!(
            assistant.summarize("   ", SummaryLength::Short).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(generator.last_prompt.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_counts_outside_bounds_are_rejected() {
        let assistant = StudyAssistant::new(FixedGenerator::replying("[]"));
        assert!(matches!(
            assistant.generate_quiz("topic", 2).await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            assistant.generate_flashcards("topic", 16).await,
            Err(AppError::BadRequest(_))
        ));
    }
}
