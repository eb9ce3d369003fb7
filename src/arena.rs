//! Deterministic local match simulation.
//!
//! The arena plays the role of the external transport: it hands out world
//! snapshots, applies the pilot's moves, and advances the scripted rival
//! players between ticks. Trails are permanent; entering an occupied or
//! out-of-grid cell crashes the player and ends its participation, while its
//! trail stays on the board.

use crate::grid::{Direction, GameState, Player, Position};
use crate::runner::Transport;
use crate::strategy::{create_strategy, PilotStrategy};
use anyhow::{anyhow, Result};

#[derive(Clone, Debug)]
pub struct ArenaConfig {
    pub width: i32,
    pub height: i32,
    pub max_ticks: u32,
    /// Strategy ids driving the rival players.
    pub rivals: Vec<String>,
    pub seed: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 32,
            height: 32,
            max_ticks: 1_000,
            rivals: vec!["zigzag".to_string()],
            seed: 0xA57E_0001,
        }
    }
}

struct Rival {
    player: Player,
    strategy: Box<dyn PilotStrategy>,
    alive: bool,
}

pub struct Arena {
    occupied: GameState,
    pilot: Player,
    pilot_alive: bool,
    rivals: Vec<Rival>,
    tick: u32,
    max_ticks: u32,
}

impl Arena {
    /// Builds a seeded match with the pilot plus one rival per configured
    /// strategy id. Spawn cells are drawn deterministically from the seed.
    pub fn connect(pilot_name: &str, config: ArenaConfig) -> Result<Self> {
        if config.width < 4 || config.height < 4 {
            return Err(anyhow!(
                "arena needs at least a 4x4 grid, got {}x{}",
                config.width,
                config.height
            ));
        }
        if config.rivals.is_empty() {
            return Err(anyhow!("arena needs at least one rival"));
        }

        let mut board = GameState::new(config.width, config.height);
        let mut rng = config.seed;

        let pilot_pos = draw_spawn(&board, &mut rng)?;
        board.occupy(pilot_pos);
        let pilot = Player {
            id: 0,
            name: pilot_name.to_string(),
            position: pilot_pos,
        };

        let mut rivals = Vec::with_capacity(config.rivals.len());
        for (idx, strategy_id) in config.rivals.iter().enumerate() {
            let mut strategy = create_strategy(strategy_id)
                .ok_or_else(|| anyhow!("unknown rival strategy '{strategy_id}'"))?;
            strategy.reset();

            let position = draw_spawn(&board, &mut rng)?;
            board.occupy(position);
            rivals.push(Rival {
                player: Player {
                    id: idx as u32 + 1,
                    name: format!("{strategy_id}-{}", idx + 1),
                    position,
                },
                strategy,
                alive: true,
            });
        }

        Ok(Self {
            occupied: board,
            pilot,
            pilot_alive: true,
            rivals,
            tick: 0,
            max_ticks: config.max_ticks,
        })
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn pilot_alive(&self) -> bool {
        self.pilot_alive
    }

    pub fn rivals_alive(&self) -> usize {
        self.rivals.iter().filter(|rival| rival.alive).count()
    }

    /// Whether the pilot outlived every rival.
    pub fn pilot_won(&self) -> bool {
        self.pilot_alive && self.rivals_alive() == 0
    }

    fn snapshot(&self) -> GameState {
        let mut state = self.occupied.clone();
        state.players.clear();
        if self.pilot_alive {
            state.players.push(self.pilot.clone());
        }
        for rival in &self.rivals {
            if rival.alive {
                state.players.push(rival.player.clone());
            }
        }
        state
    }

    /// Applies one move, growing the mover's trail. Returns the new position,
    /// or `None` when the move crashes into a wall or an occupied cell.
    fn apply_move(&mut self, player_pos: Position, direction: Direction) -> Option<Position> {
        let next = player_pos.step(direction);
        if !self.occupied.is_open(next) {
            return None;
        }
        self.occupied.occupy(next);
        Some(next)
    }

    fn advance_rivals(&mut self) {
        for idx in 0..self.rivals.len() {
            if !self.rivals[idx].alive {
                continue;
            }
            let snapshot = self.snapshot();
            let me = self.rivals[idx].player.clone();
            let direction = self.rivals[idx].strategy.choose_move(&snapshot, &me);
            match self.apply_move(me.position, direction) {
                Some(next) => self.rivals[idx].player.position = next,
                None => self.rivals[idx].alive = false,
            }
        }
    }
}

impl Transport for Arena {
    fn is_active(&self) -> bool {
        self.pilot_alive && self.tick < self.max_ticks
    }

    fn receive_game_state(&mut self) -> Result<GameState> {
        Ok(self.snapshot())
    }

    fn send_move(&mut self, direction: Direction) -> Result<()> {
        match self.apply_move(self.pilot.position, direction) {
            Some(next) => self.pilot.position = next,
            None => self.pilot_alive = false,
        }
        if self.pilot_alive {
            self.advance_rivals();
        }
        self.tick += 1;
        Ok(())
    }
}

/// Deterministic seed chain, one draw per attempted spawn cell.
fn next_seed(state: &mut u32) -> u32 {
    *state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    *state
}

fn draw_spawn(board: &GameState, rng: &mut u32) -> Result<Position> {
    // Spawns stay off the boundary so every player starts with room to move.
    let span_x = board.width() - 2;
    let span_y = board.height() - 2;
    for _ in 0..256 {
        let draw = next_seed(rng);
        let pos = Position::new(
            1 + (draw % span_x as u32) as i32,
            1 + ((draw >> 16) % span_y as u32) as i32,
        );
        if board.is_cell_empty(pos) {
            return Ok(pos);
        }
    }
    Err(anyhow!("no free spawn cell found"))
}
