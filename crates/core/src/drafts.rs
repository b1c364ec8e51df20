//! Round authoring session.
//!
//! Holds the question drafts of one round while it is being written, with the
//! editing operations of the round editor. Drafts only live for the session;
//! saving them is the data repository's job.

use crate::error::{Error, Result};
use crate::parser::QuestionTextParser;
use crate::types::QuestionDraft;
use serde::{Deserialize, Serialize};

/// Which half of a draft to edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Text,
    Answer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// A round being authored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDraft {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,

    #[serde(default)]
    questions: Vec<QuestionDraft>,
}

impl RoundDraft {
    /// Start an empty round.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topic: None,
            questions: Vec::new(),
        }
    }

    /// Open an existing round for editing.
    pub fn with_questions(title: impl Into<String>, questions: Vec<QuestionDraft>) -> Self {
        Self {
            title: title.into(),
            topic: None,
            questions,
        }
    }

    /// Set the optional topic. Blank input clears it.
    pub fn set_topic(&mut self, topic: &str) {
        let topic = topic.trim();
        self.topic = (!topic.is_empty()).then(|| topic.to_string());
    }

    pub fn questions(&self) -> &[QuestionDraft] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Append a blank draft and return its index.
    pub fn add_question(&mut self) -> usize {
        self.questions.push(QuestionDraft::new("", ""));
        self.questions.len() - 1
    }

    /// Append drafts parsed from authored text. Returns how many were added.
    pub fn import_text(&mut self, text: &str) -> usize {
        let parsed = QuestionTextParser::new().parse(text);
        let added = parsed.len();
        self.questions.extend(parsed);
        added
    }

    /// The drafts as canonical authored text.
    pub fn to_text(&self) -> String {
        QuestionTextParser::new().serialize(&self.questions)
    }

    pub fn update_question(&mut self, index: usize, field: DraftField, value: &str) -> Result<()> {
        let draft = self.draft_mut(index)?;
        match field {
            DraftField::Text => draft.text = value.to_string(),
            DraftField::Answer => draft.answer = value.to_string(),
        }
        Ok(())
    }

    pub fn remove_question(&mut self, index: usize) -> Result<QuestionDraft> {
        self.check_index(index)?;
        Ok(self.questions.remove(index))
    }

    /// Swap a draft with its neighbour and return its new index.
    ///
    /// Moving the first draft up or the last draft down leaves the order as
    /// it is.
    pub fn move_question(&mut self, index: usize, direction: MoveDirection) -> Result<usize> {
        self.check_index(index)?;
        let target = match direction {
            MoveDirection::Up if index > 0 => index - 1,
            MoveDirection::Down if index + 1 < self.questions.len() => index + 1,
            _ => return Ok(index),
        };
        self.questions.swap(index, target);
        Ok(target)
    }

    /// Check the round is complete enough to save.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when the title is blank, there are no
    /// questions, or a question lacks text or an answer.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::Validation("Round title is required".into()));
        }
        if self.questions.is_empty() {
            return Err(Error::Validation("Add at least one question".into()));
        }
        if let Some(n) = self.questions.iter().position(|q| !q.is_complete()) {
            return Err(Error::Validation(format!(
                "Question {} needs both text and an answer",
                n + 1
            )));
        }
        Ok(())
    }

    /// Drafts paired with the 1-based position they are saved at.
    pub fn positioned(&self) -> impl Iterator<Item = (u32, &QuestionDraft)> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, draft)| (i as u32 + 1, draft))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.questions.len() {
            Ok(())
        } else {
            Err(Error::DraftIndexOutOfRange {
                index,
                len: self.questions.len(),
            })
        }
    }

    fn draft_mut(&mut self, index: usize) -> Result<&mut QuestionDraft> {
        let len = self.questions.len();
        self.questions
            .get_mut(index)
            .ok_or(Error::DraftIndexOutOfRange { index, len })
    }
}
