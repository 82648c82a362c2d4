/// Presentation layer: line-oriented console output.
///
/// Every piece of text the player sees goes through here. Lines are
/// batched with `queue!` and written out on `flush()`, which the session
/// loop calls before it blocks on input.
///
/// With color off the output is plain text; with color on each line is
/// wrapped in a foreground color and a reset.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use crate::domain::round::Question;
use crate::sim::event::{EndCause, GameEvent};
use crate::sim::state::Status;

// ── Messages ──

const MSG_WELCOME: &str = "WELCOME TO SORTIFY!";
const MSG_SORT: &str = "Sort the following numbers:";
const MSG_SORT_AGAIN: &str = "Please sort the numbers";
const MSG_WELL: &str = "Well done!";
const MSG_WRONG: &str = "Wrong answer.";
const MSG_WIN: &str = "Congratulations, you win!";
const MSG_OVER: &str = "Game Over.";
const MSG_MAX: &str = "You have reached the maximum number of moves.";
const MSG_BYE: &str = "Bye.";
const MSG_UNKNOWN: &str = "Unknown option.";
const MSG_RANGE: &str = "Max must be larger than Min";

const BOX_EDGE: &str = "+-----------------------------+";

const MENU_LINES: [&str; 5] = [
    "| SORTIFY                     |",
    "| p - next challenge          |",
    "| q - quit                    |",
    "| m - print this information  |",
    "| s - show your status        |",
];

const BOX_COLOR: Color = Color::DarkCyan;

pub struct Renderer<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> Renderer<W> {
    pub fn new(writer: W, color: bool) -> Self {
        Renderer { writer, color }
    }

    pub fn welcome(&mut self) -> io::Result<()> {
        self.line(MSG_WELCOME, Some(Color::Cyan))
    }

    pub fn menu(&mut self) -> io::Result<()> {
        self.line(BOX_EDGE, Some(BOX_COLOR))?;
        for text in MENU_LINES {
            self.line(text, Some(BOX_COLOR))?;
        }
        self.line(BOX_EDGE, Some(BOX_COLOR))
    }

    pub fn status(&mut self, status: &Status) -> io::Result<()> {
        self.line(BOX_EDGE, Some(BOX_COLOR))?;
        self.line(&format!("| level:  {:02}                  |", status.level), Some(BOX_COLOR))?;
        self.line(&format!("| points: {:02}                  |", status.score), Some(BOX_COLOR))?;
        self.line(&format!("| plays:  {:02}                  |", status.rounds), Some(BOX_COLOR))?;
        self.line(BOX_EDGE, Some(BOX_COLOR))
    }

    pub fn question(&mut self, question: &Question) -> io::Result<()> {
        self.line(MSG_SORT, None)?;
        self.line(&format_question(question), Some(Color::Yellow))
    }

    /// Shown after a malformed answer; the same question stands.
    pub fn ask_again(&mut self, question: &Question) -> io::Result<()> {
        self.line(MSG_SORT_AGAIN, Some(Color::DarkYellow))?;
        self.line(&format_question(question), Some(Color::Yellow))
    }

    pub fn unknown_option(&mut self) -> io::Result<()> {
        self.line(MSG_UNKNOWN, Some(Color::DarkGrey))
    }

    /// Diagnostic for a level whose range cannot be sampled.
    pub fn invalid_range(&mut self) -> io::Result<()> {
        self.line(MSG_RANGE, Some(Color::Red))
    }

    /// Render the outcome of a transition. `status` is read after the
    /// transition, so end-of-game boxes show the final numbers.
    pub fn events(&mut self, events: &[GameEvent], status: &Status) -> io::Result<()> {
        for event in events {
            match event {
                GameEvent::AnsweredCorrectly { .. } => self.line(MSG_WELL, Some(Color::Green))?,
                GameEvent::AnsweredWrong => self.line(MSG_WRONG, Some(Color::Red))?,
                GameEvent::LevelUp { .. } => {}
                GameEvent::GameEnded(cause) => self.game_over(*cause, status)?,
            }
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    // ── Internal ──

    fn game_over(&mut self, cause: EndCause, status: &Status) -> io::Result<()> {
        match cause {
            EndCause::Win => {
                self.line(MSG_WIN, Some(Color::Green))?;
                self.status(status)?;
                self.line(MSG_OVER, Some(Color::Magenta))
            }
            EndCause::RanOutOfRounds => {
                self.line(MSG_MAX, Some(Color::Red))?;
                self.status(status)?;
                self.line(MSG_OVER, Some(Color::Magenta))
            }
            EndCause::Quit => {
                self.status(status)?;
                self.line(MSG_BYE, Some(Color::Cyan))
            }
        }
    }

    fn line(&mut self, text: &str, color: Option<Color>) -> io::Result<()> {
        match color.filter(|_| self.color) {
            Some(c) => queue!(self.writer, SetForegroundColor(c), Print(text), ResetColor, Print("\n")),
            None => queue!(self.writer, Print(text), Print("\n")),
        }
    }
}

/// `3, -1, 7, 7`
fn format_question(question: &Question) -> String {
    question
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
