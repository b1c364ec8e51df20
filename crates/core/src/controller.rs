//! Presentation controller.
//!
//! Owns the slide deck, the navigation state and the presentation host for
//! one presentation session. Input arrives serialized from the host's event
//! loop, so transitions never overlap.

use crate::deck::SlideDeck;
use crate::error::Result;
use crate::host::{Command, InputEvent, PresentationHost};
use crate::options::{split_options, SplitQuestion};
use crate::state::{Navigation, PresentationState};
use crate::types::Slide;

/// What the renderer needs to draw the current slide and its navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideView<'a> {
    pub slide: &'a Slide,

    /// 1-based position of the slide in the deck.
    pub position: usize,

    pub total: usize,

    /// Reviewing, and the slide belongs to the reviewed round.
    pub in_review_mode: bool,

    pub show_answer: bool,

    /// Stem and options of a question slide.
    pub question: Option<SplitQuestion>,

    /// Round to highlight in the round bar. None while reviewing.
    pub active_round: Option<u32>,

    pub reviewing_round: Option<u32>,
}

/// Drives a presentation session.
#[derive(Debug)]
pub struct PresentationController<H: PresentationHost> {
    deck: SlideDeck,
    state: PresentationState,
    host: H,
    exited: bool,
}

impl<H: PresentationHost> PresentationController<H> {
    /// Create a controller at the cover slide.
    pub fn new(deck: SlideDeck, host: H) -> Self {
        Self {
            deck,
            state: PresentationState::initial(),
            host,
            exited: false,
        }
    }

    /// Start the session by asking the host for exclusive display.
    ///
    /// The presentation runs either way, so a refusal is only logged.
    pub fn activate(&mut self) {
        if let Err(e) = self.host.request_exclusive_display() {
            log::debug!("exclusive display unavailable: {}", e);
        }
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn state(&self) -> PresentationState {
        self.state
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Whether `exit` has run for this session.
    pub fn has_exited(&self) -> bool {
        self.exited
    }

    pub fn current_slide(&self) -> &Slide {
        &self.deck.slides()[self.state.current_slide]
    }

    /// Reveal the reviewed answer or move to the next slide.
    pub fn advance(&mut self) {
        self.set_state(self.state.advance(&self.deck));
    }

    /// Move to the previous slide.
    pub fn retreat(&mut self) {
        self.set_state(self.state.retreat());
    }

    /// Jump to a round's intro slide.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownRound`] if `number` is not in the
    /// deck's round index. The state is left untouched.
    pub fn jump_to_round(&mut self, number: u32) -> Result<()> {
        self.navigate(Navigation::JumpToRound(number))
    }

    /// Start reviewing a round from its first question.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownRound`] for a number outside the round
    /// index and [`crate::Error::EmptyRound`] for a round without questions.
    pub fn review_round(&mut self, number: u32) -> Result<()> {
        self.navigate(Navigation::ReviewRound(number))
    }

    /// Apply any navigation request.
    pub fn navigate(&mut self, navigation: Navigation) -> Result<()> {
        match self.state.apply(&self.deck, navigation) {
            Ok(next) => {
                self.set_state(next);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected {:?}: {}", navigation, e);
                Err(e)
            }
        }
    }

    /// Leave the presentation.
    ///
    /// Runs once per session: releases exclusive display if still held, then
    /// asks the host to leave. Later calls do nothing.
    pub fn exit(&mut self) {
        if self.exited {
            log::debug!("exit already requested");
            return;
        }
        self.exited = true;

        if self.host.holds_exclusive_display() {
            self.host.release_exclusive_display();
        }
        self.host.leave_presentation();
    }

    /// Handle one input event from the host. Input after exit is ignored.
    pub fn handle(&mut self, event: InputEvent) {
        if self.exited {
            log::trace!("ignoring {:?} after exit", event);
            return;
        }

        match Command::from_input(event) {
            Some(Command::Advance) => self.advance(),
            Some(Command::Retreat) => self.retreat(),
            Some(Command::Exit) => self.exit(),
            None => {}
        }
    }

    /// Project the current state into what should be on screen.
    pub fn view(&self) -> SlideView<'_> {
        let slide = self.current_slide();
        let reviewing_round = self.state.reviewing_round;
        let in_review_mode = reviewing_round.is_some() && slide.round_number() == reviewing_round;

        let question = match slide {
            Slide::Question { question_text, .. } => Some(split_options(question_text)),
            _ => None,
        };

        SlideView {
            slide,
            position: self.state.current_slide + 1,
            total: self.deck.len(),
            in_review_mode,
            show_answer: in_review_mode && self.state.answer_revealed,
            question,
            active_round: if reviewing_round.is_none() {
                slide.round_number()
            } else {
                None
            },
            reviewing_round,
        }
    }

    fn set_state(&mut self, next: PresentationState) {
        if next != self.state {
            log::debug!("{:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::SlideDeckBuilder;
    use crate::host::{Key, RecordingHost};
    use crate::types::{Event, Round};
    use crate::Error;
    use chrono::NaiveDate;

    /// Slides: 0 cover, 1 R1 intro, 2-3 R1 questions, 4 R2 intro, 5 R2 question.
    fn controller_with(host: RecordingHost) -> PresentationController<RecordingHost> {
        let event = Event::new("Quiz", NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
            .with_round(
                Round::new(1, "One")
                    .with_question("Capital of France? A) Paris B) Lyon", "Paris")
                    .with_question("q2", "a2"),
            )
            .with_round(Round::new(2, "Two").with_question("q3", "a3"));
        PresentationController::new(SlideDeckBuilder::new().build(&event), host)
    }

    fn controller() -> PresentationController<RecordingHost> {
        controller_with(RecordingHost::default())
    }

    #[test]
    fn test_activate_requests_exclusive_display() {
        let mut controller = controller();
        controller.activate();

        assert_eq!(controller.host().display_requests, 1);
        assert!(controller.host().holding);
    }

    #[test]
    fn test_activate_ignores_refusal() {
        let mut controller = controller_with(RecordingHost::refusing());
        controller.activate();

        assert_eq!(controller.host().display_requests, 1);
        assert!(!controller.has_exited());
        controller.advance();
        assert_eq!(controller.state().current_slide, 1);
    }

    #[test]
    fn test_advance_and_retreat_bounds() {
        let mut controller = controller();

        controller.retreat();
        assert_eq!(controller.state(), PresentationState::initial());

        for _ in 0..10 {
            controller.advance();
        }
        let at_end = controller.state();
        assert_eq!(at_end.current_slide, 5);

        controller.advance();
        assert_eq!(controller.state(), at_end);
    }

    #[test]
    fn test_review_round_reveal_flow() {
        let mut controller = controller();
        controller.review_round(2).unwrap();
        let before = controller.state();
        assert_eq!(before.current_slide, 5);

        controller.advance();
        assert!(controller.state().answer_revealed);
        assert_eq!(controller.state().current_slide, before.current_slide);
    }

    #[test]
    fn test_second_advance_moves_on_and_hides_answer() {
        let mut controller = controller();
        controller.review_round(1).unwrap();

        controller.advance();
        controller.advance();

        let state = controller.state();
        assert_eq!(state.current_slide, 3);
        assert!(!state.answer_revealed);
        assert_eq!(state.reviewing_round, Some(1));
    }

    #[test]
    fn test_invalid_round_is_rejected_and_state_kept() {
        let mut controller = controller();
        controller.advance();
        let before = controller.state();

        assert_eq!(controller.jump_to_round(7), Err(Error::UnknownRound(7)));
        assert_eq!(controller.review_round(7), Err(Error::UnknownRound(7)));
        assert_eq!(controller.state(), before);
    }

    #[test]
    fn test_jump_to_round() {
        let mut controller = controller();
        controller.review_round(1).unwrap();
        controller.jump_to_round(2).unwrap();

        assert_eq!(
            controller.state(),
            PresentationState {
                current_slide: 4,
                reviewing_round: None,
                answer_revealed: false,
            }
        );
    }

    #[test]
    fn test_exit_runs_once() {
        let mut controller = controller();
        controller.activate();

        controller.exit();
        controller.exit();

        assert!(controller.has_exited());
        assert_eq!(controller.host().leaves, 1);
        assert_eq!(controller.host().releases, 1);
    }

    #[test]
    fn test_exit_button_then_display_ended_signal_leaves_once() {
        let mut controller = controller();
        controller.activate();

        controller.exit();
        controller.handle(InputEvent::ExclusiveDisplayEnded);

        assert_eq!(controller.host().leaves, 1);
    }

    #[test]
    fn test_display_ended_signal_exits_without_release() {
        let mut controller = controller_with(RecordingHost::refusing());
        controller.activate();

        controller.handle(InputEvent::ExclusiveDisplayEnded);

        assert!(controller.has_exited());
        assert_eq!(controller.host().releases, 0);
        assert_eq!(controller.host().leaves, 1);
    }

    #[test]
    fn test_handle_maps_input() {
        let mut controller = controller();

        controller.handle(InputEvent::Click);
        controller.handle(InputEvent::Key(Key::Space));
        controller.handle(InputEvent::Key(Key::Other));
        assert_eq!(controller.state().current_slide, 2);

        controller.handle(InputEvent::Key(Key::ArrowLeft));
        assert_eq!(controller.state().current_slide, 1);

        controller.handle(InputEvent::Key(Key::Escape));
        assert!(controller.has_exited());

        controller.handle(InputEvent::Key(Key::ArrowRight));
        assert_eq!(controller.state().current_slide, 1);
    }

    #[test]
    fn test_view_on_cover() {
        let controller = controller();
        let view = controller.view();

        assert!(matches!(view.slide, Slide::Cover { .. }));
        assert_eq!(view.position, 1);
        assert_eq!(view.total, 6);
        assert_eq!(view.active_round, None);
        assert_eq!(view.question, None);
        assert!(!view.show_answer);
    }

    #[test]
    fn test_view_splits_question_options() {
        let mut controller = controller();
        controller.advance();
        controller.advance();

        let view = controller.view();
        let question = view.question.unwrap();
        assert_eq!(question.stem, "Capital of France?");
        assert_eq!(question.options, vec!["A) Paris", "B) Lyon"]);
        assert_eq!(view.active_round, Some(1));
        assert!(!view.in_review_mode);
    }

    #[test]
    fn test_view_shows_answer_only_when_revealed_in_review() {
        let mut controller = controller();
        controller.review_round(1).unwrap();
        assert!(controller.view().in_review_mode);
        assert!(!controller.view().show_answer);
        assert_eq!(controller.view().active_round, None);

        controller.advance();
        assert!(controller.view().show_answer);
    }

    #[test]
    fn test_view_after_retreating_out_of_reviewed_round() {
        let mut controller = controller();
        controller.review_round(2).unwrap();
        controller.retreat();
        controller.retreat();

        let view = controller.view();
        assert_eq!(view.reviewing_round, Some(2));
        assert!(!view.in_review_mode);
        assert!(!view.show_answer);
        assert_eq!(view.active_round, None);
    }
}
