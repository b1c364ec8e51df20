//! Presentation navigation state and its transitions.
//!
//! [`PresentationState`] is a plain value. Every transition takes the current
//! state and the deck and returns the next state, leaving rendering and host
//! effects to the controller.

use crate::deck::SlideDeck;
use crate::error::{Error, Result};
use crate::types::Slide;
use serde::{Deserialize, Serialize};

/// A navigation request against a slide deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Advance,
    Retreat,
    JumpToRound(u32),
    ReviewRound(u32),
}

/// Cursor, review mode and answer visibility of a running presentation.
///
/// Invariants, given the deck the state was produced against:
/// - `current_slide` is a valid slide index;
/// - `reviewing_round`, when set, is a number from the deck's round index;
/// - `answer_revealed` is only true on a question slide of `reviewing_round`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationState {
    pub current_slide: usize,
    pub reviewing_round: Option<u32>,
    pub answer_revealed: bool,
}

impl PresentationState {
    /// The cover slide, not reviewing, answer hidden.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Apply a navigation request.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownRound`] when a round number is not in the deck's round
    /// index, and [`Error::EmptyRound`] when reviewing a round without
    /// questions.
    pub fn apply(self, deck: &SlideDeck, navigation: Navigation) -> Result<Self> {
        match navigation {
            Navigation::Advance => Ok(self.advance(deck)),
            Navigation::Retreat => Ok(self.retreat()),
            Navigation::JumpToRound(number) => self.jump_to_round(deck, number),
            Navigation::ReviewRound(number) => self.review_round(deck, number),
        }
    }

    /// Reveal the answer of a reviewed question, otherwise move forward.
    ///
    /// Moving onto a slide outside the reviewed round ends review mode. At
    /// the last slide nothing changes.
    pub fn advance(self, deck: &SlideDeck) -> Self {
        if let Some(round) = self.reviewing_round {
            let on_reviewed_question = deck
                .get(self.current_slide)
                .is_some_and(|slide| slide.is_question_of(round));
            if on_reviewed_question && !self.answer_revealed {
                return Self {
                    answer_revealed: true,
                    ..self
                };
            }
        }

        if self.current_slide >= deck.last_index() {
            return self;
        }

        let next = self.current_slide + 1;
        let next_round = deck.get(next).and_then(Slide::round_number);
        Self {
            current_slide: next,
            reviewing_round: self.reviewing_round.filter(|&round| next_round == Some(round)),
            answer_revealed: false,
        }
    }

    /// Move back one slide and hide the answer.
    ///
    /// Review mode is kept even when this leaves the reviewed round.
    pub fn retreat(self) -> Self {
        if self.current_slide == 0 {
            return self;
        }
        Self {
            current_slide: self.current_slide - 1,
            answer_revealed: false,
            ..self
        }
    }

    /// Go to a round's intro slide, leaving review mode.
    pub fn jump_to_round(self, deck: &SlideDeck, number: u32) -> Result<Self> {
        let round = deck.round(number).ok_or(Error::UnknownRound(number))?;
        Ok(Self {
            current_slide: round.start_index,
            reviewing_round: None,
            answer_revealed: false,
        })
    }

    /// Go to a round's first question in review mode, answer hidden.
    pub fn review_round(self, deck: &SlideDeck, number: u32) -> Result<Self> {
        let round = deck.round(number).ok_or(Error::UnknownRound(number))?;
        let first_question = round
            .first_question_index()
            .ok_or(Error::EmptyRound(number))?;
        Ok(Self {
            current_slide: first_question,
            reviewing_round: Some(number),
            answer_revealed: false,
        })
    }
}
