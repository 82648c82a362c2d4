/// Round completion: advances the session by one answered question.
///
/// Processing order:
///   1. Score (+5 on a correct answer)
///   2. Level check (strictly above threshold → +1 level, never more)
///   3. Round counter (+1, always)
///   4. End check (Win before RanOutOfRounds)
///
/// A finished session ignores further rounds.

use crate::domain::round::{Answer, Question};
use crate::domain::rules;
use super::event::{EndCause, GameEvent};
use super::state::GameState;

pub const MAX_ROUNDS: u32 = 30;
pub const INCREMENT_POINTS_ON_RIGHT_ANSWER: u32 = 5;

// ══════════════════════════════════════════════════════════════
// Main entry points
// ══════════════════════════════════════════════════════════════

/// Validate `answer` against `question` and complete the round.
pub fn play_round(state: &mut GameState, question: &Question, answer: &Answer) -> Vec<GameEvent> {
    let correct = rules::is_sorted_answer(question, answer);
    tracing::debug!(?question, ?answer, correct, "answer checked");
    complete_round(state, correct)
}

pub fn complete_round(state: &mut GameState, correct: bool) -> Vec<GameEvent> {
    if !state.is_running() { return vec![]; }

    let mut events: Vec<GameEvent> = Vec::new();

    resolve_score(state, correct, &mut events);
    resolve_level(state, &mut events);
    state.rounds += 1;
    resolve_end(state, &mut events);

    events
}

// ══════════════════════════════════════════════════════════════
// Steps
// ══════════════════════════════════════════════════════════════

fn resolve_score(state: &mut GameState, correct: bool, events: &mut Vec<GameEvent>) {
    if correct {
        state.score += INCREMENT_POINTS_ON_RIGHT_ANSWER;
        events.push(GameEvent::AnsweredCorrectly { points: INCREMENT_POINTS_ON_RIGHT_ANSWER });
    } else {
        events.push(GameEvent::AnsweredWrong);
    }
}

fn resolve_level(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let Some(level) = state.current_level_spec() else { return };
    if rules::should_advance(state.score, level) {
        state.current_level += 1;
        tracing::info!(level = state.current_level + 1, score = state.score, "level up");
        events.push(GameEvent::LevelUp { level: state.current_level });
    }
}

fn resolve_end(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let cause = if state.current_level >= state.level_count() {
        EndCause::Win
    } else if state.rounds >= MAX_ROUNDS {
        EndCause::RanOutOfRounds
    } else {
        return;
    };
    state.end(cause);
    events.push(GameEvent::GameEnded(cause));
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
