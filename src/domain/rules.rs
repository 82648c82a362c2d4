/// Answer and progression rules.
///
/// Pure functions, no side effects. They decide "is this right" and
/// "has the player earned the next level" without touching game state.

use crate::domain::level::LevelSpec;
use crate::domain::round::{Answer, Question};

/// The question in ascending order.
pub fn sorted(question: &Question) -> Question {
    let mut out = *question;
    out.sort_unstable();
    out
}

/// True iff `answer` is `question` sorted ascending, position by position.
/// Equal values are interchangeable, so duplicates need no special casing.
pub fn is_sorted_answer(question: &Question, answer: &Answer) -> bool {
    sorted(question) == *answer
}

/// Strictly greater-than: reaching the threshold is not enough.
pub fn should_advance(score: u32, level: &LevelSpec) -> bool {
    score > level.score_to_pass
}
