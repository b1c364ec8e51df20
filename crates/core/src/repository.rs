//! Data repository contract for presentation input.

use crate::error::{Error, Result};
use crate::types::Event;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Source of events to present.
pub trait EventRepository {
    /// Fetch an event with its rounds and questions sorted by position.
    ///
    /// # Errors
    ///
    /// [`Error::EventNotFound`] when no event has this id. Other failures
    /// are reported as [`Error::Repository`].
    fn fetch_presentation_input(&self, event_id: &str) -> Result<Event>;
}

/// An event repository held in memory, keyed by event id.
///
/// Serializes as a plain JSON object mapping ids to events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemoryEventRepository {
    events: BTreeMap<String, Event>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event, builder style.
    pub fn with_event(mut self, id: impl Into<String>, event: Event) -> Self {
        self.insert(id, event);
        self
    }

    /// Add or replace an event.
    pub fn insert(&mut self, id: impl Into<String>, event: Event) {
        self.events.insert(id.into(), event);
    }

    /// Event ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.events.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventRepository for InMemoryEventRepository {
    fn fetch_presentation_input(&self, event_id: &str) -> Result<Event> {
        let mut event = self
            .events
            .get(event_id)
            .cloned()
            .ok_or_else(|| Error::EventNotFound(event_id.to_string()))?;

        // Stored content may have been written in any order.
        event.rounds.sort_by_key(|round| round.position);
        for round in &mut event.rounds {
            round.questions.sort_by_key(|question| question.position);
        }

        log::debug!(
            "fetched event {:?} with {} rounds",
            event_id,
            event.rounds.len()
        );
        Ok(event)
    }
}
