use serde::{Deserialize, Serialize};

// ---- Generated Records ----

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize, // Index into `options`
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, option_index: usize) -> bool {
        option_index == self.correct_answer
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Flashcard {
    pub front: String, // Term, concept or question
    pub back: String,  // Definition or answer
}

// ---- Generation Options ----

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryLength {
    Short,
    #[default]
    Medium,
    Detailed,
}

impl SummaryLength {
    pub fn instruction(self) -> &'static str {
        match self {
            SummaryLength::Short => "in 3-5 bullet points",
            SummaryLength::Medium => "in 7-10 bullet points",
            SummaryLength::Detailed => "in detailed paragraphs with key points highlighted",
        }
    }
}

impl std::str::FromStr for SummaryLength {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "short" => Ok(SummaryLength::Short),
            "medium" => Ok(SummaryLength::Medium),
            "detailed" => Ok(SummaryLength::Detailed),
            other => Err(format!("Unknown summary length: {}", other)),
        }
    }
}
