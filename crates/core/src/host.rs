//! The presentation host: the display surface and input source a
//! presentation runs inside.
//!
//! The host owns exclusive (fullscreen) display and application navigation.
//! It feeds the controller [`InputEvent`]s one at a time from its event loop,
//! including [`InputEvent::ExclusiveDisplayEnded`] when the user leaves
//! exclusive display by other means.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Display and navigation capabilities the controller needs from its host.
pub trait PresentationHost {
    /// Ask for exclusive display. Best-effort: the controller ignores failure.
    fn request_exclusive_display(&mut self) -> Result<()>;

    /// Whether exclusive display is currently held.
    fn holds_exclusive_display(&self) -> bool;

    /// Give up exclusive display.
    fn release_exclusive_display(&mut self);

    /// Leave the presentation and return to the rest of the application.
    fn leave_presentation(&mut self);
}

/// Keys the presentation reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    Space,
    Enter,
    Escape,
    /// Any key without a binding.
    Other,
}

/// Input delivered by the host's event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(Key),
    /// Pointer click anywhere on the slide.
    Click,
    /// Exclusive display ended without the controller asking for it.
    ExclusiveDisplayEnded,
}

/// Logical commands the controller understands from raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    Exit,
}

impl Command {
    /// Map host input to a command. Unbound keys map to nothing.
    pub fn from_input(event: InputEvent) -> Option<Self> {
        match event {
            InputEvent::Key(Key::ArrowRight | Key::Space | Key::Enter) | InputEvent::Click => {
                Some(Self::Advance)
            }
            InputEvent::Key(Key::ArrowLeft) => Some(Self::Retreat),
            InputEvent::Key(Key::Escape) | InputEvent::ExclusiveDisplayEnded => Some(Self::Exit),
            InputEvent::Key(Key::Other) => None,
        }
    }
}

/// A host that records every call, for controller tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingHost {
    pub refuse_display: bool,
    pub holding: bool,
    pub display_requests: usize,
    pub releases: usize,
    pub leaves: usize,
}

#[cfg(test)]
impl RecordingHost {
    pub fn refusing() -> Self {
        Self {
            refuse_display: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl PresentationHost for RecordingHost {
    fn request_exclusive_display(&mut self) -> Result<()> {
        self.display_requests += 1;
        if self.refuse_display {
            return Err(crate::Error::Host("fullscreen not allowed".into()));
        }
        self.holding = true;
        Ok(())
    }

    fn holds_exclusive_display(&self) -> bool {
        self.holding
    }

    fn release_exclusive_display(&mut self) {
        self.releases += 1;
        self.holding = false;
    }

    fn leave_presentation(&mut self) {
        self.leaves += 1;
    }
}
