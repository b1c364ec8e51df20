//! Terminal presentation host and slide rendering.

use std::io::Write;
use trivia_core::{Error, InputEvent, Key, PresentationHost, Result, RoundInfo, Slide, SlideView};

/// Switch to the terminal's alternate screen.
const ENTER_ALTERNATE_SCREEN: &str = "\x1b[?1049h";

/// Return to the normal screen.
const LEAVE_ALTERNATE_SCREEN: &str = "\x1b[?1049l";

/// Clear the screen and home the cursor.
pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Presentation host that uses the terminal's alternate screen as its
/// exclusive display.
#[derive(Debug)]
pub struct TerminalHost<W: Write> {
    out: W,
    windowed: bool,
    alternate_screen: bool,
    left: bool,
}

impl<W: Write> TerminalHost<W> {
    /// Create a host writing control sequences to `out`.
    ///
    /// A windowed host refuses exclusive display and stays on the normal
    /// screen.
    pub fn new(out: W, windowed: bool) -> Self {
        Self {
            out,
            windowed,
            alternate_screen: false,
            left: false,
        }
    }

    /// Whether the presentation asked to be left.
    pub fn has_left(&self) -> bool {
        self.left
    }
}

impl<W: Write> PresentationHost for TerminalHost<W> {
    fn request_exclusive_display(&mut self) -> Result<()> {
        if self.windowed {
            return Err(Error::Host("running windowed".into()));
        }
        self.out
            .write_all(ENTER_ALTERNATE_SCREEN.as_bytes())
            .and_then(|()| self.out.flush())
            .map_err(|e| Error::Host(e.to_string()))?;
        self.alternate_screen = true;
        Ok(())
    }

    fn holds_exclusive_display(&self) -> bool {
        self.alternate_screen
    }

    fn release_exclusive_display(&mut self) {
        let restored = self
            .out
            .write_all(LEAVE_ALTERNATE_SCREEN.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = restored {
            log::warn!("failed to leave alternate screen: {}", e);
        }
        self.alternate_screen = false;
    }

    fn leave_presentation(&mut self) {
        log::debug!("leaving presentation");
        self.left = true;
    }
}

/// A line typed at the presentation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptInput {
    Input(InputEvent),
    JumpToRound(u32),
    ReviewRound(u32),
    /// A round command without a valid round number.
    Invalid,
}

/// Interpret one prompt line.
///
/// An empty line is Enter. `g N` jumps to round N and `r N` reviews it.
pub fn parse_prompt_line(line: &str) -> PromptInput {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return PromptInput::Input(InputEvent::Key(Key::Enter));
    };

    let round_arg = |arg: Option<&str>| arg.and_then(|n| n.parse::<u32>().ok());

    match word.to_lowercase().as_str() {
        "n" | "next" => PromptInput::Input(InputEvent::Key(Key::ArrowRight)),
        "p" | "prev" | "b" | "back" => PromptInput::Input(InputEvent::Key(Key::ArrowLeft)),
        "q" | "quit" | "exit" | "esc" => PromptInput::Input(InputEvent::Key(Key::Escape)),
        "g" | "goto" => round_arg(words.next())
            .map(PromptInput::JumpToRound)
            .unwrap_or(PromptInput::Invalid),
        "r" | "review" => round_arg(words.next())
            .map(PromptInput::ReviewRound)
            .unwrap_or(PromptInput::Invalid),
        _ => PromptInput::Input(InputEvent::Key(Key::Other)),
    }
}

/// Render the current slide as plain text.
pub fn render(view: &SlideView<'_>, rounds: &[RoundInfo]) -> String {
    let mut lines = Vec::new();

    let round_bar: Vec<String> = rounds
        .iter()
        .map(|round| {
            if view.active_round == Some(round.number) {
                format!("[Round {}]", round.number)
            } else {
                format!(" Round {} ", round.number)
            }
        })
        .collect();
    lines.push(format!("{}   {} / {}", round_bar.join(" "), view.position, view.total));
    lines.push(String::new());

    match view.slide {
        Slide::Cover { title, date } => {
            lines.push(format!("  {}", title));
            lines.push(format!("  {}", date));
        }
        Slide::RoundIntro {
            round_number,
            round_title,
        } => {
            lines.push(format!("  Round {}", round_number));
            lines.push(format!("  {}", round_title));
        }
        Slide::Question {
            round_number,
            question_number,
            answer,
            question_text,
        } => {
            let mut header = format!("  Round {} · Question {}", round_number, question_number);
            if view.in_review_mode {
                header.push_str(" · Review");
            }
            lines.push(header);
            lines.push(String::new());

            match &view.question {
                Some(split) if split.has_options() => {
                    lines.extend(split.stem.lines().map(|l| format!("  {}", l)));
                    lines.push(String::new());
                    lines.extend(split.options.iter().map(|o| format!("    {}", o)));
                }
                _ => lines.extend(question_text.lines().map(|l| format!("  {}", l))),
            }

            if view.show_answer {
                lines.push(String::new());
                lines.push(format!("  Answer: {}", answer));
            }
        }
    }

    lines.push(String::new());
    if let Some(round) = view.reviewing_round {
        lines.push(format!("Reviewing round {}", round));
    }
    lines.push("Enter: next · p: back · g N: go to round · r N: review round · q: exit".into());

    lines.join("\n")
}
