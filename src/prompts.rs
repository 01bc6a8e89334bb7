//! Prompt templates for each study workflow.
//!
//! The quiz and flashcard prompts embed the exact JSON schema that
//! [`crate::parser`] decodes and pin the number of records requested.

use std::ops::RangeInclusive;

use crate::models::SummaryLength;

pub const QUIZ_QUESTION_RANGE: RangeInclusive<usize> = 3..=10;
pub const DEFAULT_QUIZ_QUESTIONS: usize = 5;

pub const FLASHCARD_RANGE: RangeInclusive<usize> = 5..=15;
pub const DEFAULT_FLASHCARDS: usize = 10;

pub fn explain_concept(concept: &str) -> String {
    format!(
        "You are a helpful study assistant for high school and college students.
Explain the following concept in a clear, easy-to-understand way.
Use simple language, analogies, and examples where appropriate.

Concept: {concept}

Provide a comprehensive but concise explanation that a student can understand."
    )
}

pub fn summarize_notes(text: &str, length: SummaryLength) -> String {
    format!(
        "You are a study assistant helping students understand their notes and materials.
Summarize the following text {instruction}.
Focus on the main ideas and key concepts that students need to know.

Text to summarize:
{text}

Summary:",
        instruction = length.instruction()
    )
}

pub fn quiz(text: &str, num_questions: usize) -> String {
    format!(
        r#"You are a study assistant creating quiz questions for students.
Based on the following text, generate exactly {num_questions} multiple-choice questions.

Text:
{text}

Format your response as a JSON array with this exact structure:
[
    {{
        "question": "Question text here?",
        "options": ["Option A", "Option B", "Option C", "Option D"],
        "correct_answer": 0,
        "explanation": "Brief explanation of why this is correct"
    }}
]

Make sure:
- There are exactly {num_questions} questions
- Every question has exactly 4 options
- Questions test understanding, not just memorization
- All options are plausible
- correct_answer is the index (0-3) of the correct option
- Include a brief explanation for each answer

Return ONLY the JSON array, no additional text."#
    )
}

pub fn flashcards(text: &str, num_cards: usize) -> String {
    format!(
        r#"You are a study assistant creating flashcards for students.
Based on the following text, identify the {num_cards} most important terms, concepts, or ideas
and create exactly {num_cards} flashcards for them.

Text:
{text}

Format your response as a JSON array with this exact structure:
[
    {{
        "front": "Term or Question",
        "back": "Definition or Answer"
    }}
]

Make sure:
- The front is concise (a term, concept, or question)
- The back provides a clear, complete explanation or answer
- Focus on the most important concepts for studying

Return ONLY the JSON array, no additional text."#
    )
}
