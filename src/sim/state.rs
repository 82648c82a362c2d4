/// GameState: the complete state of one session.
///
/// Owned by the session driver and handed to each operation as `&mut`.
/// Transitions live in `sim::step`; this module holds the data plus the
/// read-only queries and the two direct transitions (`quit`, `end`).
///
/// `current_level` runs from 0 to `levels.len()`. Reaching `levels.len()`
/// means every level was passed and the game is won; there is no level
/// spec at that index.

use rand::Rng;

use crate::domain::level::{default_levels, LevelSpec};
use crate::domain::round::{self, Question};
use crate::error::{GameError, Result};
use crate::sim::event::{EndCause, GameEvent};

/// Snapshot for the status box. `level` is 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Status {
    pub level: usize,
    pub score: u32,
    pub rounds: u32,
}

#[derive(Clone, Debug)]
pub struct GameState {
    levels: Vec<LevelSpec>,
    pub(crate) score: u32,
    pub(crate) rounds: u32,
    pub(crate) current_level: usize,
    running: bool,
    end_cause: Option<EndCause>,
}

impl GameState {
    /// Fresh session over the fixed five-level table.
    pub fn new() -> Self {
        Self::with_levels(default_levels())
    }

    /// Fresh session over an explicit table. Ranges are checked lazily,
    /// when a round is generated for the level.
    pub fn with_levels(levels: Vec<LevelSpec>) -> Self {
        GameState {
            levels,
            score: 0,
            rounds: 0,
            current_level: 0,
            running: true,
            end_cause: None,
        }
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn current_level(&self) -> usize {
        self.current_level
    }

    /// `None` once the last level has been passed.
    pub fn current_level_spec(&self) -> Option<&LevelSpec> {
        self.levels.get(self.current_level)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn end_cause(&self) -> Option<EndCause> {
        self.end_cause
    }

    pub fn status(&self) -> Status {
        Status {
            level: self.current_level + 1,
            score: self.score,
            rounds: self.rounds,
        }
    }

    /// Draw the four numbers for `level_index`.
    pub fn generate_round<R: Rng + ?Sized>(&self, level_index: usize, rng: &mut R) -> Result<Question> {
        let level = self
            .levels
            .get(level_index)
            .ok_or(GameError::UnknownLevel(level_index))?;
        round::draw(level, rng)
    }

    /// Stop the session on the player's request. A game that already
    /// ended keeps its original cause.
    pub fn quit(&mut self) -> Vec<GameEvent> {
        if !self.running {
            return vec![];
        }
        self.end(EndCause::Quit);
        vec![GameEvent::GameEnded(EndCause::Quit)]
    }

    pub(crate) fn end(&mut self, cause: EndCause) {
        tracing::info!(?cause, score = self.score, rounds = self.rounds, "game ended");
        self.running = false;
        self.end_cause = Some(cause);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
