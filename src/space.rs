//! Spatial metrics: Manhattan distance, capped flood-fill openness, and
//! nearest-opponent selection.

use crate::grid::{Direction, GameState, Player, Position};
use std::collections::{HashSet, VecDeque};

/// Flood-fill exploration budget. The true open area may be larger; the cap
/// keeps per-tick work bounded (at most 4 candidates x 20 visits).
pub const SPACE_SCAN_CAP: usize = 20;

/// Reachable-space count below which escape mode engages.
pub const TIGHT_SPOT_THRESHOLD: usize = 5;

pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Breadth-first count of cells reachable from `origin` through empty in-grid
/// cells, capped at [`SPACE_SCAN_CAP`]. The origin always counts, so the
/// result is in `1..=SPACE_SCAN_CAP` for any in-grid origin.
pub fn available_space(state: &GameState, origin: Position) -> usize {
    let mut space = 0;
    let mut to_visit = VecDeque::new();
    let mut visited = HashSet::new();

    to_visit.push_back(origin);
    visited.insert(origin);

    while space < SPACE_SCAN_CAP {
        let Some(current) = to_visit.pop_front() else {
            break;
        };
        space += 1;

        for direction in Direction::SCAN_ORDER {
            let neighbor = current.step(direction);
            if state.is_open(neighbor) && visited.insert(neighbor) {
                to_visit.push_back(neighbor);
            }
        }
    }

    space
}

/// The opponent closest to `me` by Manhattan distance. Ties keep the first
/// player in snapshot order; strict `<` makes that explicit.
pub fn nearest_opponent<'a>(state: &'a GameState, me: &Player) -> Option<&'a Player> {
    let mut nearest: Option<&Player> = None;
    let mut min_distance = i32::MAX;

    for player in &state.players {
        if player.id == me.id {
            continue;
        }
        let distance = manhattan_distance(me.position, player.position);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(player);
        }
    }

    nearest
}
