use cycles_autopilot::grid::{Direction, GameState, Player, Position};
use cycles_autopilot::space::{available_space, manhattan_distance, nearest_opponent, SPACE_SCAN_CAP};
use cycles_autopilot::strategy::terminator::{
    decide_best_move, fallback_direction, is_in_tight_spot, predict_opponent_move,
};
use cycles_autopilot::strategy::{create_strategy, strategy_ids, PilotStrategy};

fn player(id: u32, name: &str, x: i32, y: i32) -> Player {
    Player {
        id,
        name: name.to_string(),
        position: Position::new(x, y),
    }
}

/// A state where every cell is occupied except the listed ones.
fn walled_state(width: i32, height: i32, open: &[(i32, i32)]) -> GameState {
    let mut state = GameState::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if !open.contains(&(x, y)) {
                state.occupy(Position::new(x, y));
            }
        }
    }
    state
}

#[test]
fn manhattan_distance_is_symmetric_and_zero_on_identity() {
    let a = Position::new(3, 7);
    let b = Position::new(-2, 1);
    assert_eq!(manhattan_distance(a, b), manhattan_distance(b, a));
    assert_eq!(manhattan_distance(a, b), 11);
    assert_eq!(manhattan_distance(a, a), 0);
}

#[test]
fn available_space_is_capped_and_counts_origin() {
    let open = GameState::new(10, 10);
    assert_eq!(available_space(&open, Position::new(5, 5)), SPACE_SCAN_CAP);

    // Fully enclosed origin still counts itself.
    let mut boxed = GameState::new(5, 5);
    for direction in Direction::SCAN_ORDER {
        boxed.occupy(Position::new(2, 2).step(direction));
    }
    assert_eq!(available_space(&boxed, Position::new(2, 2)), 1);
}

#[test]
fn available_space_matches_pocket_size_under_cap() {
    // Four-cell corridor.
    let state = walled_state(7, 7, &[(1, 1), (1, 2), (1, 3), (1, 4)]);
    assert_eq!(available_space(&state, Position::new(1, 1)), 4);
}

#[test]
fn tight_spot_triggers_strictly_below_five_reachable_cells() {
    let four = walled_state(7, 7, &[(1, 1), (1, 2), (1, 3), (1, 4)]);
    assert!(is_in_tight_spot(&four, Position::new(1, 1)));

    let five = walled_state(7, 7, &[(1, 1), (1, 2), (1, 3), (1, 4), (1, 5)]);
    assert!(!is_in_tight_spot(&five, Position::new(1, 1)));
}

#[test]
fn predictor_returns_first_open_neighbor_in_scan_order() {
    let state = GameState::new(5, 5);
    // North is open and scanned first.
    assert_eq!(
        predict_opponent_move(&state, Position::new(2, 2)),
        Position::new(2, 1)
    );
    // On the top edge north is out of grid, so east wins.
    assert_eq!(
        predict_opponent_move(&state, Position::new(2, 0)),
        Position::new(3, 0)
    );
}

#[test]
fn predictor_keeps_position_only_when_fully_blocked() {
    let mut state = GameState::new(5, 5);
    for direction in Direction::SCAN_ORDER {
        state.occupy(Position::new(2, 2).step(direction));
    }
    assert_eq!(
        predict_opponent_move(&state, Position::new(2, 2)),
        Position::new(2, 2)
    );
}

#[test]
fn nearest_opponent_skips_self_and_keeps_first_on_ties() {
    let mut state = GameState::new(9, 9);
    let me = player(0, "pilot", 4, 4);
    state.players.push(me.clone());
    state.players.push(player(1, "left", 2, 4));
    state.players.push(player(2, "right", 6, 4));

    // Both opponents are at distance 2; snapshot order breaks the tie.
    let nearest = nearest_opponent(&state, &me).unwrap();
    assert_eq!(nearest.id, 1);
}

#[test]
fn best_move_never_enters_blocked_cells() {
    let mut state = GameState::new(7, 7);
    let me = Position::new(3, 3);
    state.occupy(me);
    state.occupy(Position::new(3, 2));
    state.occupy(Position::new(2, 3));
    state.occupy(Position::new(0, 0));

    let chosen = decide_best_move(&state, me, Position::new(0, 0), Position::new(0, 1));
    assert!(state.is_open(me.step(chosen)));
}

#[test]
fn best_move_is_deterministic() {
    let mut state = GameState::new(7, 7);
    let me = Position::new(3, 3);
    state.occupy(me);
    state.occupy(Position::new(5, 3));

    let first = decide_best_move(&state, me, Position::new(6, 6), Position::new(6, 5));
    for _ in 0..10 {
        assert_eq!(
            decide_best_move(&state, me, Position::new(6, 6), Position::new(6, 5)),
            first
        );
    }
}

#[test]
fn five_by_five_duel_scenario() {
    let mut state = GameState::new(5, 5);
    let me = player(0, "pilot", 2, 2);
    let opponent = player(1, "rival", 2, 0);
    state.occupy(me.position);
    state.occupy(opponent.position);
    state.players.push(me.clone());
    state.players.push(opponent.clone());

    let nearest = nearest_opponent(&state, &me).unwrap();
    assert_eq!(nearest.id, 1);

    let predicted = predict_opponent_move(&state, nearest.position);
    assert_eq!(predicted, Position::new(3, 0));

    // North closes the distance to 1 but walks between the two trails and
    // eats a double safety penalty; the stable tie-break then picks east.
    let chosen = decide_best_move(&state, me.position, nearest.position, predicted);
    assert_eq!(chosen, Direction::East);
    assert!(state.is_open(me.position.step(chosen)));
}

#[test]
fn enclosed_pilot_falls_back_without_panicking() {
    let mut state = GameState::new(5, 5);
    let me = Position::new(2, 2);
    for direction in Direction::SCAN_ORDER {
        state.occupy(me.step(direction));
    }

    // No legal candidate: the deterministic fallback default is north.
    assert_eq!(
        decide_best_move(&state, me, Position::new(0, 0), Position::new(0, 1)),
        Direction::North
    );
    assert_eq!(fallback_direction(&state, me), Direction::North);
}

#[test]
fn fallback_scans_in_fixed_order() {
    let mut state = GameState::new(5, 5);
    let me = Position::new(2, 2);
    state.occupy(me.step(Direction::North));
    assert_eq!(fallback_direction(&state, me), Direction::East);
}

#[test]
fn zigzag_alternates_vertical_runs_and_flips_on_blockage() {
    let mut zigzag = create_strategy("zigzag").unwrap();
    let me = player(0, "pilot", 3, 3);

    // Open grid: the initial bias is south.
    let open = GameState::new(8, 8);
    assert_eq!(zigzag.choose_move(&open, &me), Direction::South);

    // South blocked: sidestep east and flip the bias.
    let mut blocked_south = GameState::new(8, 8);
    blocked_south.occupy(Position::new(3, 4));
    assert_eq!(zigzag.choose_move(&blocked_south, &me), Direction::East);

    // Bias flipped, so the next open tick heads north.
    assert_eq!(zigzag.choose_move(&open, &me), Direction::North);
}

#[test]
fn zigzag_resubmits_primary_when_cornered() {
    let mut zigzag = create_strategy("zigzag").unwrap();
    let me = player(0, "pilot", 3, 3);

    let mut cornered = GameState::new(8, 8);
    cornered.occupy(Position::new(3, 4)); // south
    cornered.occupy(Position::new(4, 3)); // east
    assert_eq!(zigzag.choose_move(&cornered, &me), Direction::East);
}

#[test]
fn registry_resolves_every_listed_strategy() {
    for id in strategy_ids() {
        let strategy = create_strategy(id).unwrap();
        assert_eq!(strategy.id(), id);
    }
    assert!(create_strategy("does-not-exist").is_none());
}
