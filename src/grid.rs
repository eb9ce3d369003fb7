//! Grid geometry and per-tick world snapshots.
//!
//! Coordinates are screen-oriented: x grows eastward, y grows southward.
//! `North` therefore maps to `(0, -1)` and `South` to `(0, 1)`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Fixed scan order used everywhere a tie or a first-valid pick matters.
    pub const SCAN_ORDER: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::East => (1, 0),
            Direction::South => (0, 1),
            Direction::West => (-1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub position: Position,
}

/// Immutable world snapshot for one tick: grid occupancy plus every player
/// still in the match. Replaced wholesale each tick, never patched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    width: i32,
    height: i32,
    occupied: Vec<bool>,
    pub players: Vec<Player>,
}

impl GameState {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            occupied: vec![false; (width * height) as usize],
            players: Vec::new(),
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn is_inside_grid(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Whether `pos` is free of trails, walls, and players. Only defined for
    /// in-grid positions; callers check `is_inside_grid` first.
    pub fn is_cell_empty(&self, pos: Position) -> bool {
        debug_assert!(self.is_inside_grid(pos), "emptiness query outside grid");
        !self.occupied[self.cell_index(pos)]
    }

    /// True when `pos` can be entered this tick: inside the grid and empty.
    pub fn is_open(&self, pos: Position) -> bool {
        self.is_inside_grid(pos) && self.is_cell_empty(pos)
    }

    /// Marks a cell occupied. Trails are permanent, so there is no inverse.
    pub fn occupy(&mut self, pos: Position) {
        debug_assert!(self.is_inside_grid(pos), "occupy outside grid");
        let idx = self.cell_index(pos);
        self.occupied[idx] = true;
    }

    pub fn find_player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|player| player.name == name)
    }

    pub fn has_opponent(&self, self_id: u32) -> bool {
        self.players.iter().any(|player| player.id != self_id)
    }

    fn cell_index(&self, pos: Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }
}
