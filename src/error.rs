/// Errors raised by the game core.
///
/// Both variants mean the level table itself is unusable, so the session
/// driver treats them as fatal.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("invalid level range: min {min} is greater than max {max}")]
    InvalidRange { min: i32, max: i32 },

    #[error("no level at index {0}")]
    UnknownLevel(usize),
}

pub type Result<T> = std::result::Result<T, GameError>;
