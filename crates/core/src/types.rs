//! Domain types for trivia events and their presentation slides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A trivia event as delivered by the data repository.
///
/// Rounds are expected in ascending position order, and so are the
/// questions inside each round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Event title, shown on the cover slide.
    pub title: String,

    /// Calendar date the event takes place.
    pub date: NaiveDate,

    /// Rounds in presentation order.
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Event {
    /// Create a new event with no rounds.
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            date,
            rounds: Vec::new(),
        }
    }

    /// Add a round, builder style.
    pub fn with_round(mut self, round: Round) -> Self {
        self.rounds.push(round);
        self
    }

    /// Total number of questions across all rounds.
    pub fn question_count(&self) -> usize {
        self.rounds.iter().map(|r| r.questions.len()).sum()
    }
}

/// A titled, ordered group of questions within an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    /// 1-based position within the event.
    pub position: u32,

    pub title: String,

    /// Questions in ascending position order.
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl Round {
    /// Create a new round with no questions.
    pub fn new(position: u32, title: impl Into<String>) -> Self {
        Self {
            position,
            title: title.into(),
            questions: Vec::new(),
        }
    }

    /// Append a question, numbering it after the existing ones.
    pub fn with_question(mut self, text: impl Into<String>, answer: impl Into<String>) -> Self {
        let position = self.questions.len() as u32 + 1;
        self.questions.push(Question::new(position, text, answer));
        self
    }
}

/// A single question placed in a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 1-based position within the round.
    pub position: u32,

    /// Question text. May span several lines and carry inline options.
    pub text: String,

    pub answer: String,
}

impl Question {
    pub fn new(position: u32, text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
            answer: answer.into(),
        }
    }
}

/// A question/answer pair that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    /// Persistence identity, assigned by the data repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub text: String,

    pub answer: String,

    /// True until the data repository has stored this draft.
    #[serde(default)]
    pub is_new: bool,
}

impl QuestionDraft {
    /// Create an unsaved draft.
    pub fn new(text: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            answer: answer.into(),
            is_new: true,
        }
    }

    /// Create a draft for a question that already exists in the repository.
    pub fn existing(
        id: impl Into<String>,
        text: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            text: text.into(),
            answer: answer.into(),
            is_new: false,
        }
    }

    /// Whether both text and answer carry non-whitespace content.
    pub fn is_complete(&self) -> bool {
        !self.text.trim().is_empty() && !self.answer.trim().is_empty()
    }
}

/// One presentable unit of a slide deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Slide {
    /// Opening slide with the event title and display date.
    Cover { title: String, date: String },

    /// Announces the start of a round.
    RoundIntro { round_number: u32, round_title: String },

    /// A single question, with its answer for review mode.
    Question {
        round_number: u32,
        question_number: u32,
        question_text: String,
        answer: String,
    },
}

impl Slide {
    /// The round this slide belongs to. The cover belongs to none.
    pub fn round_number(&self) -> Option<u32> {
        match self {
            Slide::Cover { .. } => None,
            Slide::RoundIntro { round_number, .. } | Slide::Question { round_number, .. } => {
                Some(*round_number)
            }
        }
    }

    /// Whether this is a question slide of the given round.
    pub fn is_question_of(&self, round: u32) -> bool {
        matches!(self, Slide::Question { round_number, .. } if *round_number == round)
    }
}

/// Navigation metadata for one round of a slide deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundInfo {
    /// The round's position, used as its number.
    pub number: u32,

    pub title: String,

    /// Index of the round-intro slide in the deck.
    pub start_index: usize,

    pub question_count: usize,
}

impl RoundInfo {
    /// Index of the round's first question slide, if it has any.
    pub fn first_question_index(&self) -> Option<usize> {
        (self.question_count > 0).then(|| self.start_index + 1)
    }
}
