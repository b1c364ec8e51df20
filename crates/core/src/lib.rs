//! Core of the trivia deck: question text parsing, multiple-choice option
//! splitting, slide deck building, and presentation navigation.

pub mod controller;
pub mod deck;
pub mod drafts;
pub mod error;
pub mod host;
pub mod options;
pub mod parser;
pub mod repository;
pub mod state;
pub mod types;

pub use controller::{PresentationController, SlideView};
pub use deck::{SlideDeck, SlideDeckBuilder, DEFAULT_DATE_FORMAT};
pub use drafts::{DraftField, MoveDirection, RoundDraft};
pub use error::{Error, Result};
pub use host::{Command, InputEvent, Key, PresentationHost};
pub use options::{split_options, SplitQuestion};
pub use parser::QuestionTextParser;
pub use repository::{EventRepository, InMemoryEventRepository};
pub use state::{Navigation, PresentationState};
pub use types::{Event, Question, QuestionDraft, Round, RoundInfo, Slide};
