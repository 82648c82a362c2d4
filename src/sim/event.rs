/// Events emitted by state transitions.
/// The presentation layer consumes these for messages and sound.

/// Why a session stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndCause {
    Win,
    RanOutOfRounds,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(dead_code)]
pub enum GameEvent {
    AnsweredCorrectly { points: u32 },
    AnsweredWrong,
    /// `level` is the new 0-based level index.
    LevelUp { level: usize },
    GameEnded(EndCause),
}
