//! Error types for trivia authoring and presentation.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while authoring or presenting trivia content.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A round number that is not in the deck's round index.
    #[error("Unknown round: {0}")]
    UnknownRound(u32),

    /// A round with no questions cannot be reviewed.
    #[error("Round {0} has no questions to review")]
    EmptyRound(u32),

    /// The requested event does not exist in the data repository.
    #[error("Event not found: {0}")]
    EventNotFound(String),

    /// A draft index outside the authoring session's question list.
    #[error("Draft index {index} out of range (have {len} questions)")]
    DraftIndexOutOfRange { index: usize, len: usize },

    /// Authored content is not complete enough to be saved.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The presentation host refused a request.
    #[error("Presentation host error: {0}")]
    Host(String),

    /// The data repository failed for a reason other than a missing event.
    #[error("Repository error: {0}")]
    Repository(String),
}
