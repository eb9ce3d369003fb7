//! zigzag: opponent-blind sweeper.
//!
//! Alternates vertical runs, stepping east whenever the current vertical
//! direction is blocked. The only cross-tick state is the vertical bias flag.

use crate::grid::{Direction, GameState, Player};
use crate::strategy::PilotStrategy;

pub struct ZigzagStrategy {
    moving_down: bool,
    primary: Direction,
}

impl ZigzagStrategy {
    pub fn new() -> Self {
        Self {
            moving_down: true,
            primary: Direction::East,
        }
    }
}

impl Default for ZigzagStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl PilotStrategy for ZigzagStrategy {
    fn id(&self) -> &'static str {
        "zigzag"
    }

    fn description(&self) -> &'static str {
        "Opponent-blind vertical zigzag with a fixed eastward primary direction."
    }

    fn reset(&mut self) {
        self.moving_down = true;
    }

    fn choose_move(&mut self, state: &GameState, me: &Player) -> Direction {
        let vertical = if self.moving_down {
            Direction::South
        } else {
            Direction::North
        };

        if state.is_open(me.position.step(vertical)) {
            return vertical;
        }

        // Lateral blockage: flip the bias for the next run. When even the
        // primary is blocked it is resubmitted regardless; the crash is the
        // transport's to adjudicate.
        self.moving_down = !self.moving_down;
        self.primary
    }
}
