//! Slide deck construction.
//!
//! Flattens an event's rounds and questions into the linear slide sequence
//! the presentation walks through, plus an index of where each round starts.

use crate::types::{Event, RoundInfo, Slide};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Default display format for the cover date, e.g. `Saturday, March 1, 2025`.
pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d, %Y";

/// An immutable slide sequence with its round index.
///
/// Built once per presentation session. Only the controller's cursor into it
/// changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideDeck {
    slides: Vec<Slide>,
    rounds: Vec<RoundInfo>,
}

impl SlideDeck {
    /// All slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Round index in presentation order.
    pub fn rounds(&self) -> &[RoundInfo] {
        &self.rounds
    }

    /// Look up a round by its number.
    pub fn round(&self, number: u32) -> Option<&RoundInfo> {
        self.rounds.iter().find(|r| r.number == number)
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the final slide. A built deck always has its cover slide.
    pub fn last_index(&self) -> usize {
        self.slides.len().saturating_sub(1)
    }
}

/// Builds slide decks from events.
#[derive(Debug, Clone)]
pub struct SlideDeckBuilder {
    /// `chrono` format string for the cover date.
    date_format: String,
}

impl Default for SlideDeckBuilder {
    fn default() -> Self {
        Self {
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }
}

impl SlideDeckBuilder {
    /// Create a builder with the default cover date format.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom `chrono` format string for the cover date.
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Render the cover date, falling back to the default format when the
    /// configured one is not a valid `chrono` format string.
    fn cover_date(&self, date: NaiveDate) -> String {
        let mut rendered = String::new();
        if write!(rendered, "{}", date.format(&self.date_format)).is_err() {
            log::warn!(
                "invalid cover date format {:?}, using {:?}",
                self.date_format,
                DEFAULT_DATE_FORMAT
            );
            rendered = date.format(DEFAULT_DATE_FORMAT).to_string();
        }
        rendered
    }

    /// Build the deck for an event.
    ///
    /// Rounds and questions are taken in the order given; the data repository
    /// guarantees they are already sorted by position. Produces one cover
    /// slide, then per round an intro slide followed by its question slides.
    pub fn build(&self, event: &Event) -> SlideDeck {
        let mut slides = Vec::with_capacity(1 + event.rounds.len() + event.question_count());
        let mut rounds = Vec::with_capacity(event.rounds.len());

        slides.push(Slide::Cover {
            title: event.title.clone(),
            date: self.cover_date(event.date),
        });

        for round in &event.rounds {
            let start_index = slides.len();

            slides.push(Slide::RoundIntro {
                round_number: round.position,
                round_title: round.title.clone(),
            });

            for question in &round.questions {
                slides.push(Slide::Question {
                    round_number: round.position,
                    question_number: question.position,
                    question_text: question.text.clone(),
                    answer: question.answer.clone(),
                });
            }

            rounds.push(RoundInfo {
                number: round.position,
                title: round.title.clone(),
                start_index,
                question_count: round.questions.len(),
            });
        }

        log::debug!(
            "built deck for {:?}: {} slides in {} rounds",
            event.title,
            slides.len(),
            rounds.len()
        );

        SlideDeck { slides, rounds }
    }
}
