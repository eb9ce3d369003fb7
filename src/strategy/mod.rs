pub mod terminator;
pub mod zigzag;

use crate::grid::{Direction, GameState, Player};

/// One move per tick. Implementations never touch the transport; the runner
/// feeds them snapshots and forwards whatever direction they choose.
pub trait PilotStrategy {
    fn id(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Clears any cross-tick state before a new match.
    fn reset(&mut self);
    fn choose_move(&mut self, state: &GameState, me: &Player) -> Direction;
}

pub fn strategy_ids() -> Vec<&'static str> {
    vec!["terminator", "zigzag"]
}

pub fn describe_strategies() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "terminator",
            "Targets the nearest opponent; scores moves by safety, proximity, trapping, and open space.",
        ),
        (
            "zigzag",
            "Opponent-blind vertical zigzag with a fixed eastward primary direction.",
        ),
    ]
}

pub fn create_strategy(id: &str) -> Option<Box<dyn PilotStrategy>> {
    match id {
        "terminator" => Some(Box::new(terminator::TerminatorStrategy::new())),
        "zigzag" => Some(Box::new(zigzag::ZigzagStrategy::new())),
        _ => None,
    }
}
