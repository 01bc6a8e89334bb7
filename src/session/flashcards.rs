use serde::{Deserialize, Serialize};

use super::TransitionError;
use crate::models::Flashcard;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FlashcardSession {
    #[default]
    Idle,
    Browsing(FlashcardDeck),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashcardDeck {
    pub cards: Vec<Flashcard>,
    pub current_index: usize,
    pub show_back: bool,
}

impl FlashcardDeck {
    pub fn current_card(&self) -> &Flashcard {
        &self.cards[self.current_index]
    }

    pub fn has_next(&self) -> bool {
        self.current_index + 1 < self.cards.len()
    }

    pub fn has_previous(&self) -> bool {
        self.current_index > 0
    }
}

impl FlashcardSession {
    pub fn state_name(&self) -> &'static str {
        match self {
            FlashcardSession::Idle => "idle",
            FlashcardSession::Browsing(_) => "browsing",
        }
    }

    fn deck_mut(&mut self, action: &'static str) -> Result<&mut FlashcardDeck, TransitionError> {
        match self {
            FlashcardSession::Browsing(deck) => Ok(deck),
            FlashcardSession::Idle => Err(TransitionError::InvalidState {
                action,
                state: "idle",
            }),
        }
    }

    /// Replaces any current deck.
    pub fn start(&mut self, cards: Vec<Flashcard>) -> Result<(), TransitionError> {
        if cards.is_empty() {
            return Err(TransitionError::Empty);
        }
        *self = FlashcardSession::Browsing(FlashcardDeck {
            cards,
            current_index: 0,
            show_back: false,
        });
        Ok(())
    }

    pub fn flip(&mut self) -> Result<bool, TransitionError> {
        let deck = self.deck_mut("flip a card")?;
        deck.show_back = !deck.show_back;
        Ok(deck.show_back)
    }

    pub fn next(&mut self) -> Result<(), TransitionError> {
        let deck = self.deck_mut("move to the next card")?;
        if !deck.has_next() {
            return Err(TransitionError::AtLastItem);
        }
        deck.current_index += 1;
        deck.show_back = false;
        Ok(())
    }

    pub fn previous(&mut self) -> Result<(), TransitionError> {
        let deck = self.deck_mut("move to the previous card")?;
        if !deck.has_previous() {
            return Err(TransitionError::AtFirstItem);
        }
        deck.current_index -= 1;
        deck.show_back = false;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = FlashcardSession::Idle;
    }
}
