//! CLI tool for authoring trivia question text and presenting events.

mod terminal;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, Read, Write};
use std::path::{Path, PathBuf};
use terminal::{parse_prompt_line, render, PromptInput, TerminalHost, CLEAR_SCREEN};
use trivia_core::{
    Error, EventRepository, InMemoryEventRepository, InputEvent, PresentationController,
    PresentationHost, QuestionTextParser, RoundDraft, SlideDeck, SlideDeckBuilder,
    DEFAULT_DATE_FORMAT,
};

/// Author trivia questions and run event presentations.
#[derive(Parser, Debug)]
#[command(name = "trivia")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the questions found in authored text
    Parse {
        /// Authored question text file ("-" for stdin)
        input: PathBuf,

        /// Print drafts as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite authored text in canonical numbered form
    Format {
        /// Authored question text file ("-" for stdin)
        input: PathBuf,

        /// Overwrite the input file instead of printing
        #[arg(short, long)]
        write: bool,
    },

    /// Check authored text is complete enough to save as a round
    Check {
        /// Authored question text file ("-" for stdin)
        input: PathBuf,

        /// Round title
        #[arg(short, long)]
        title: String,

        /// Optional round topic
        #[arg(long)]
        topic: Option<String>,
    },

    /// Print the slide deck for an event as JSON
    Deck {
        /// JSON file mapping event ids to events
        #[arg(short, long)]
        events: PathBuf,

        /// Event to build
        event_id: String,

        /// chrono format string for the cover date
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        date_format: String,
    },

    /// Present an event in the terminal
    Present {
        /// JSON file mapping event ids to events
        #[arg(short, long)]
        events: PathBuf,

        /// Event to present
        event_id: String,

        /// Stay on the normal screen instead of the alternate screen
        #[arg(long)]
        windowed: bool,

        /// chrono format string for the cover date
        #[arg(long, default_value = DEFAULT_DATE_FORMAT)]
        date_format: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Commands::Parse { input, json } => parse_command(&input, json),
        Commands::Format { input, write } => format_command(&input, write),
        Commands::Check {
            input,
            title,
            topic,
        } => check_command(&input, &title, topic.as_deref()),
        Commands::Deck {
            events,
            event_id,
            date_format,
        } => {
            let deck = load_deck(&events, &event_id, &date_format)?;
            println!("{}", serde_json::to_string_pretty(&deck)?);
            Ok(())
        }
        Commands::Present {
            events,
            event_id,
            windowed,
            date_format,
        } => {
            let deck = load_deck(&events, &event_id, &date_format)?;
            present(deck, windowed)
        }
    }
}

/// Read authored text from a file, or stdin for "-".
fn read_input(path: &Path) -> Result<String> {
    let mut text = String::new();
    if path == Path::new("-") {
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
    } else {
        File::open(path)
            .and_then(|mut f| f.read_to_string(&mut text))
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    Ok(text)
}

fn parse_command(input: &Path, json: bool) -> Result<()> {
    let drafts = QuestionTextParser::new().parse(&read_input(input)?);

    if json {
        println!("{}", serde_json::to_string_pretty(&drafts)?);
        return Ok(());
    }

    for (i, draft) in drafts.iter().enumerate() {
        let answer = if draft.answer.is_empty() {
            "(no answer)"
        } else {
            draft.answer.as_str()
        };
        println!("{:>3}. {} => {}", i + 1, draft.text.replace('\n', " / "), answer);
    }
    eprintln!("Found {} questions", drafts.len());
    Ok(())
}

fn format_command(input: &Path, write: bool) -> Result<()> {
    let parser = QuestionTextParser::new();
    let drafts = parser.parse(&read_input(input)?);
    let output = parser.serialize_with_newline(&drafts);

    if !write || input == Path::new("-") {
        print!("{}", output);
        return Ok(());
    }

    let mut file =
        File::create(input).with_context(|| format!("Failed to create {}", input.display()))?;
    file.write_all(output.as_bytes())
        .with_context(|| format!("Failed to write to {}", input.display()))?;
    log::info!("rewrote {} questions in {}", drafts.len(), input.display());
    Ok(())
}

fn check_command(input: &Path, title: &str, topic: Option<&str>) -> Result<()> {
    let mut round = RoundDraft::new(title);
    if let Some(topic) = topic {
        round.set_topic(topic);
    }
    round.import_text(&read_input(input)?);

    round
        .validate()
        .with_context(|| format!("{} is not ready to save", input.display()))?;
    println!("{}: {} questions ready to save", round.title, round.len());
    for (position, draft) in round.positioned() {
        let first_line = draft.text.lines().next().unwrap_or_default();
        println!("{:>3}. {} => {}", position, first_line, draft.answer);
    }
    Ok(())
}

/// Load an event from the events file and build its deck.
fn load_deck(events: &Path, event_id: &str, date_format: &str) -> Result<SlideDeck> {
    let file =
        File::open(events).with_context(|| format!("Failed to open {}", events.display()))?;
    let repository: InMemoryEventRepository = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse events from {}", events.display()))?;

    let event = match repository.fetch_presentation_input(event_id) {
        Err(e @ Error::EventNotFound(_)) => {
            let known: Vec<&str> = repository.ids().collect();
            return Err(e).with_context(|| {
                format!("Known events in {}: {}", events.display(), known.join(", "))
            });
        }
        result => result?,
    };
    Ok(SlideDeckBuilder::new()
        .with_date_format(date_format)
        .build(&event))
}

/// Present a deck in the terminal until the presenter exits.
fn present(deck: SlideDeck, windowed: bool) -> Result<()> {
    let mut controller = PresentationController::new(deck, TerminalHost::new(io::stdout(), windowed));
    let result = run_session(&mut controller, io::stdin().lock(), &mut io::stdout());

    log::debug!("presentation finished at {:?}", controller.state());
    let host = controller.into_host();
    log::debug!("host left: {}", host.has_left());
    println!();
    result
}

/// Run one presentation session. The exclusive display is released and the
/// presentation left even when reading input or drawing the screen fails.
fn run_session<H, R, W>(
    controller: &mut PresentationController<H>,
    input: R,
    screen: &mut W,
) -> Result<()>
where
    H: PresentationHost,
    R: BufRead,
    W: Write,
{
    controller.activate();
    let result = prompt_loop(controller, input, screen);
    controller.exit();
    result
}

/// Draw the current slide and apply prompt lines until the session exits.
fn prompt_loop<H, R, W>(
    controller: &mut PresentationController<H>,
    input: R,
    screen: &mut W,
) -> Result<()>
where
    H: PresentationHost,
    R: BufRead,
    W: Write,
{
    let mut lines = input.lines();
    let mut notice: Option<String> = None;

    while !controller.has_exited() {
        let mut frame = String::from(CLEAR_SCREEN);
        frame.push_str(&render(&controller.view(), controller.deck().rounds()));
        if let Some(message) = notice.take() {
            frame.push_str(&format!("\n{}", message));
        }
        write!(screen, "{}\n> ", frame).context("Failed to draw slide")?;
        screen.flush().context("Failed to draw slide")?;

        let Some(line) = lines.next() else {
            // Closing the input stream ends the display.
            controller.handle(InputEvent::ExclusiveDisplayEnded);
            break;
        };
        let line = line.context("Failed to read presenter input")?;

        let result = match parse_prompt_line(&line) {
            PromptInput::Input(event) => {
                controller.handle(event);
                Ok(())
            }
            PromptInput::JumpToRound(n) => controller.jump_to_round(n),
            PromptInput::ReviewRound(n) => controller.review_round(n),
            PromptInput::Invalid => {
                notice = Some("Usage: g N or r N with a round number".into());
                Ok(())
            }
        };
        if let Err(e) = result {
            notice = Some(e.to_string());
        }
    }

    Ok(())
}
