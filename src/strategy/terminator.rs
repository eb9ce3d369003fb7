//! terminator: nearest-opponent hunter.
//!
//! Ranks the four candidate moves each tick by a sum of
//! - safety: -10 per blocked neighbor of the candidate
//! - proximity: negative Manhattan distance to the target
//! - trapping: +5 per blocked neighbor of the predicted opponent position
//! - space: capped flood-fill openness of the candidate
//!
//! Falls back to the first open scan direction when cornered.

use crate::grid::{Direction, GameState, Player, Position};
use crate::space::{available_space, manhattan_distance, nearest_opponent, TIGHT_SPOT_THRESHOLD};
use crate::strategy::PilotStrategy;
use tracing::warn;

const BLOCKED_NEIGHBOR_PENALTY: i32 = -10;
const TRAPPED_NEIGHBOR_REWARD: i32 = 5;

pub struct TerminatorStrategy;

impl TerminatorStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminatorStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PilotStrategy for TerminatorStrategy {
    fn id(&self) -> &'static str {
        "terminator"
    }

    fn description(&self) -> &'static str {
        "Targets the nearest opponent; scores moves by safety, proximity, trapping, and open space."
    }

    fn reset(&mut self) {}

    fn choose_move(&mut self, state: &GameState, me: &Player) -> Direction {
        let Some(target) = nearest_opponent(state, me) else {
            // The runner stops before this can happen; degrade to the
            // deterministic fallback rather than guessing at a target.
            warn!(strategy = self.id(), "no opponent in snapshot, using fallback move");
            return fallback_direction(state, me.position);
        };

        if is_in_tight_spot(state, me.position) {
            warn!(
                strategy = self.id(),
                pilot = %me.name,
                "tight spot, activating escape mode"
            );
            return fallback_direction(state, me.position);
        }

        let predicted = predict_opponent_move(state, target.position);
        decide_best_move(state, me.position, target.position, predicted)
    }
}

/// Whether the locally reachable space has fallen below the escape threshold.
pub fn is_in_tight_spot(state: &GameState, pos: Position) -> bool {
    available_space(state, pos) < TIGHT_SPOT_THRESHOLD
}

/// Zero-ply feasibility guess: the first open neighbor in scan order, or the
/// opponent's current position when every neighbor is blocked.
pub fn predict_opponent_move(state: &GameState, opponent: Position) -> Position {
    for direction in Direction::SCAN_ORDER {
        let next = opponent.step(direction);
        if state.is_open(next) {
            return next;
        }
    }
    opponent
}

/// Ranks the legal candidate moves and returns the best one, falling back to
/// [`fallback_direction`] when nothing is legal. Stable sort keeps scan order
/// among equal scores, so the result is fully deterministic.
pub fn decide_best_move(
    state: &GameState,
    me: Position,
    target: Position,
    predicted_opponent: Position,
) -> Direction {
    let mut ranked: Vec<(Direction, i32)> = Vec::with_capacity(4);

    for direction in Direction::SCAN_ORDER {
        let candidate = me.step(direction);
        if !state.is_open(candidate) {
            continue;
        }

        let safety = safety_score(state, candidate);
        let proximity = -manhattan_distance(candidate, target);
        let trapping = trapping_score(state, predicted_opponent);
        let space = available_space(state, candidate) as i32;

        ranked.push((direction, safety + proximity + trapping + space));
    }

    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    match ranked.first() {
        Some(&(direction, _)) => direction,
        None => fallback_direction(state, me),
    }
}

/// First open scan direction from `pos`, defaulting to north even when no
/// direction is open. Whether the transport tolerates the invalid default is
/// its contract, not ours.
pub fn fallback_direction(state: &GameState, pos: Position) -> Direction {
    for direction in Direction::SCAN_ORDER {
        if state.is_open(pos.step(direction)) {
            return direction;
        }
    }
    Direction::North
}

fn safety_score(state: &GameState, pos: Position) -> i32 {
    let mut score = 0;
    for direction in Direction::SCAN_ORDER {
        if !state.is_open(pos.step(direction)) {
            score += BLOCKED_NEIGHBOR_PENALTY;
        }
    }
    score
}

// Measures the predicted opponent position's confinement, not the candidate's
// contribution to it, so the value repeats across all four candidates within
// a tick. Intentional: see the trapping notes in DESIGN.md before changing.
fn trapping_score(state: &GameState, predicted_opponent: Position) -> i32 {
    let mut score = 0;
    for direction in Direction::SCAN_ORDER {
        if !state.is_open(predicted_opponent.step(direction)) {
            score += TRAPPED_NEIGHBOR_REWARD;
        }
    }
    score
}
