//! Per-tick decision loop: snapshot in, one move out, until the session ends.

use crate::grid::{Direction, GameState};
use crate::strategy::PilotStrategy;
use anyhow::{anyhow, Result};
use serde::Serialize;
use tracing::{error, info};

/// Session boundary toward the game server. Concrete transports establish the
/// connection in their own constructors; the runner only drives the session.
pub trait Transport {
    fn is_active(&self) -> bool;
    /// Blocks until the next snapshot is available.
    fn receive_game_state(&mut self) -> Result<GameState>;
    /// Fire-and-forget submission of this tick's move.
    fn send_move(&mut self, direction: Direction) -> Result<()>;
}

/// Why the decision loop stopped. Returned instead of exiting from inside the
/// loop so callers decide process-level behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The transport reported the session inactive.
    TransportClosed,
    /// Normal termination: the pilot is the last player standing.
    NoOpponentsLeft,
    /// A snapshot arrived without the pilot's own player in it.
    SelfMissing,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub strategy_id: String,
    pub pilot_name: String,
    /// Snapshots consumed.
    pub ticks: u32,
    /// Moves submitted; at most one per tick.
    pub moves_sent: u32,
    pub north_moves: u32,
    pub east_moves: u32,
    pub south_moves: u32,
    pub west_moves: u32,
    pub stop_reason: StopReason,
}

pub struct Pilot<T: Transport> {
    transport: T,
    name: String,
    strategy: Box<dyn PilotStrategy>,
}

impl<T: Transport> Pilot<T> {
    /// Wraps an already-connected transport. Fails when the session is not
    /// active, which the binary treats as a fatal startup condition.
    pub fn new(transport: T, name: impl Into<String>, strategy: Box<dyn PilotStrategy>) -> Result<Self> {
        let name = name.into();
        if !transport.is_active() {
            return Err(anyhow!("transport inactive at startup for pilot '{name}'"));
        }
        Ok(Self {
            transport,
            name,
            strategy,
        })
    }

    /// Runs the synchronous tick loop to completion. Transport failures
    /// propagate as errors; everything else ends in a [`RunReport`].
    pub fn run(&mut self) -> Result<RunReport> {
        self.strategy.reset();

        let mut ticks = 0u32;
        let mut moves = [0u32; 4];

        let stop_reason = loop {
            if !self.transport.is_active() {
                break StopReason::TransportClosed;
            }

            let state = self.transport.receive_game_state()?;
            ticks += 1;

            let Some(me) = state.find_player(&self.name) else {
                error!(pilot = %self.name, tick = ticks, "own player missing from snapshot");
                break StopReason::SelfMissing;
            };

            if !state.has_opponent(me.id) {
                info!(pilot = %self.name, tick = ticks, "no targets remaining, stopping");
                break StopReason::NoOpponentsLeft;
            }

            let direction = self.strategy.choose_move(&state, me);
            self.transport.send_move(direction)?;
            moves[direction_slot(direction)] += 1;
        };

        Ok(RunReport {
            strategy_id: self.strategy.id().to_string(),
            pilot_name: self.name.clone(),
            ticks,
            moves_sent: moves.iter().sum(),
            north_moves: moves[0],
            east_moves: moves[1],
            south_moves: moves[2],
            west_moves: moves[3],
            stop_reason,
        })
    }

    /// Releases the transport, e.g. to inspect a finished arena.
    pub fn into_transport(self) -> T {
        self.transport
    }
}

fn direction_slot(direction: Direction) -> usize {
    match direction {
        Direction::North => 0,
        Direction::East => 1,
        Direction::South => 2,
        Direction::West => 3,
    }
}
