/// Round generation: four numbers drawn for one question.

use rand::Rng;

use crate::domain::level::LevelSpec;
use crate::error::Result;

/// Every round asks for exactly this many numbers.
pub const QUESTION_LEN: usize = 4;

pub type Question = [i32; QUESTION_LEN];
pub type Answer = [i32; QUESTION_LEN];

/// Draw a question for `level`.
///
/// Each position is sampled independently and uniformly from
/// `[min_value, max_value]`, so duplicates are possible and the
/// result is unsorted.
pub fn draw<R: Rng + ?Sized>(level: &LevelSpec, rng: &mut R) -> Result<Question> {
    level.check_range()?;
    let values: Question =
        std::array::from_fn(|_| rng.gen_range(level.min_value..=level.max_value));
    tracing::debug!(?values, min = level.min_value, max = level.max_value, "drew question");
    Ok(values)
}
