//! Integration tests for the game session driven through its public API

use gravity_tetris::core::{GameSnapshot, GameState};
use gravity_tetris::types::{GameAction, Gravity};

fn drop_until_game_over(state: &mut GameState) -> usize {
    for drops in 1..=200 {
        state.apply_action(GameAction::HardDrop);
        if state.game_over() {
            return drops;
        }
    }
    panic!("stacking pieces in the middle should end the game");
}

#[test]
fn test_game_lifecycle() {
    let state = GameState::new(12345);

    assert!(state.active().is_some());
    assert!(state.next().is_some());
    assert!(!state.game_over());
    assert!(!state.paused());
    assert_eq!(state.score(), 0);
    assert_eq!(state.level(), 1);
    assert_eq!(state.lines(), 0);
    assert_eq!(state.drop_interval_ms(), 1000);
    assert_eq!(state.gravity(), Gravity::Normal);
}

#[test]
fn test_hard_drop_scores_distance_to_ghost() {
    let mut state = GameState::new(2024);
    let snap = state.snapshot();
    let active = snap.active.unwrap();
    let ghost_y = snap.ghost_y.unwrap();

    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.score(), 2 * (ghost_y - active.y) as u32);
    assert_eq!(state.board().filled_count(), 4);
}

#[test]
fn test_moves_and_soft_drop() {
    let mut state = GameState::new(99);
    let start = state.active().unwrap();

    assert!(state.apply_action(GameAction::MoveLeft));
    assert_eq!(state.active().unwrap().x, start.x - 1);
    assert!(state.apply_action(GameAction::MoveRight));
    assert!(state.apply_action(GameAction::MoveRight));
    assert_eq!(state.active().unwrap().x, start.x + 1);

    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.active().unwrap().y, start.y + 1);
    assert_eq!(state.score(), 1);
}

#[test]
fn test_walls_stop_movement() {
    let mut state = GameState::new(5);
    let mut moves = 0;
    while state.apply_action(GameAction::MoveLeft) {
        moves += 1;
        assert!(moves <= 10);
    }
    assert_eq!(state.active().unwrap().x, 0);
}

#[test]
fn test_tick_drives_gravity() {
    let mut state = GameState::new(42);
    let y = state.active().unwrap().y;

    assert!(!state.tick(500));
    assert!(!state.tick(1000));
    assert_eq!(state.active().unwrap().y, y);

    assert!(state.tick(1001));
    assert_eq!(state.active().unwrap().y, y + 1);

    // Drops never score.
    assert_eq!(state.score(), 0);
}

#[test]
fn test_pause_freezes_the_game() {
    let mut state = GameState::new(42);
    let before = state.active().unwrap();

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.paused());
    assert!(!state.tick(10_000));
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::Rotate));
    assert!(!state.apply_action(GameAction::HardDrop));
    assert!(!state.apply_action(GameAction::ToggleGravity));
    assert_eq!(state.active().unwrap(), before);
    assert!(!state.snapshot().playable());

    assert!(state.apply_action(GameAction::Pause));
    assert!(state.tick(10_000));
}

#[test]
fn test_game_over_and_restart() {
    let mut state = GameState::new(777);
    let drops = drop_until_game_over(&mut state);
    assert!(drops >= 5);

    let score = state.score();
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::HardDrop,
        GameAction::Rotate,
        GameAction::ToggleGravity,
        GameAction::Pause,
    ] {
        assert!(!state.apply_action(action), "{:?} after game over", action);
    }
    assert!(!state.tick(1_000_000));
    assert_eq!(state.score(), score);
    assert!(state.snapshot().game_over);

    assert!(state.apply_action(GameAction::Restart));
    assert!(!state.game_over());
    assert_eq!(state.score(), 0);
    assert_eq!(state.board().filled_count(), 0);
}

#[test]
fn test_anti_gravity_game_over() {
    let mut state = GameState::new(31337);
    state.apply_action(GameAction::ToggleGravity);
    // Land the current piece so the rest spawn at the bottom edge.
    state.apply_action(GameAction::HardDrop);

    drop_until_game_over(&mut state);

    // The stack grows from the top edge.
    let snap = state.snapshot();
    assert!(snap.anti_gravity());
    assert!(snap.board[0].iter().any(|&id| id != 0));
}

#[test]
fn test_same_seed_same_game() {
    let script = [
        GameAction::MoveLeft,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::ToggleGravity,
        GameAction::MoveRight,
        GameAction::HardDrop,
        GameAction::SoftDrop,
        GameAction::ToggleGravity,
        GameAction::HardDrop,
    ];

    let play = |seed: u32| -> GameSnapshot {
        let mut state = GameState::new(seed);
        for (i, action) in script.iter().enumerate() {
            state.apply_action(*action);
            state.tick(1001 * (i as u64 + 1));
        }
        state.snapshot()
    };

    assert_eq!(play(8), play(8));
}

#[test]
fn test_snapshot_into_matches_snapshot() {
    let mut state = GameState::new(3);
    state.apply_action(GameAction::HardDrop);
    state.apply_action(GameAction::ToggleGravity);

    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    assert_eq!(snap, state.snapshot());
    assert!(snap.anti_gravity());
    assert_eq!(snap.score, state.score());
}
