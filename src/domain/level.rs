/// Level table: difficulty tiers, built once at startup.
///
/// ## Default table
/// ┌───────┬───────────────┬──────┬──────┐
/// │ Level │ score_to_pass │ min  │ max  │
/// ├───────┼───────────────┼──────┼──────┤
/// │ 1     │ 10            │ 0    │ 10   │
/// │ 2     │ 20            │ 0    │ 30   │
/// │ 3     │ 30            │ -50  │ 30   │
/// │ 4     │ 40            │ -100 │ 0    │
/// │ 5     │ 50            │ -200 │ -100 │
/// └───────┴───────────────┴──────┴──────┘
///
/// The score must EXCEED `score_to_pass` to leave a level.

use crate::error::{GameError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelSpec {
    pub score_to_pass: u32,
    /// Inclusive lower bound for drawn numbers.
    pub min_value: i32,
    /// Inclusive upper bound for drawn numbers.
    pub max_value: i32,
}

impl LevelSpec {
    pub const fn new(score_to_pass: u32, min_value: i32, max_value: i32) -> Self {
        LevelSpec { score_to_pass, min_value, max_value }
    }

    pub fn check_range(&self) -> Result<()> {
        if self.min_value > self.max_value {
            return Err(GameError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }
}

const DEFAULT_TABLE: [LevelSpec; 5] = [
    LevelSpec::new(10, 0, 10),
    LevelSpec::new(20, 0, 30),
    LevelSpec::new(30, -50, 30),
    LevelSpec::new(40, -100, 0),
    LevelSpec::new(50, -200, -100),
];

/// The fixed five-level table, in increasing difficulty.
pub fn default_levels() -> Vec<LevelSpec> {
    DEFAULT_TABLE.to_vec()
}
