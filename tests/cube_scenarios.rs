use std::collections::HashSet;

use cube_snake::game::{
    Direction, GameConfig, GameEngine, GameEvent, GameState, GridCell, HeadState, Snake,
    TickOutcome,
};
use cube_snake::modes::Autopilot;
use tempfile::TempDir;

fn seeded(grid_size: usize) -> GameConfig {
    GameConfig {
        rng_seed: Some(2024),
        wait_for_input: false,
        ..GameConfig::new(grid_size)
    }
}

fn assert_consistent(engine: &GameEngine, state: &GameState) {
    let grid = engine.grid();
    let cells: Vec<GridCell> = state.snake.cells().collect();
    let unique: HashSet<GridCell> = cells.iter().copied().collect();
    assert_eq!(unique.len(), cells.len(), "snake overlaps itself");
    assert!(cells.len() <= grid.surface_count());

    assert!(grid.is_on_face(state.snake.head.cell, state.snake.head.normal));
    assert!(!state.snake.head.direction.is_parallel(state.snake.head.normal));
    for segment in &state.snake.body {
        assert!(grid.is_on_face(segment.cell, segment.normal));
    }
    if let Some(food) = state.food {
        assert!(grid.is_surface(food.cell));
        assert!(!state.snake.occupies(food.cell));
    }
}

#[test]
fn surface_counts_match_shell_formula() {
    for size in 2..=8usize {
        let engine = GameEngine::new(GameConfig {
            initial_body_length: 0,
            ..GameConfig::new(size)
        })
        .unwrap();
        let n = size as i64;
        assert_eq!(engine.grid().surface_count() as i64, 6 * n * n - 12 * n + 8);
    }
}

#[test]
fn straight_run_circles_the_cube() {
    let mut engine = GameEngine::new(seeded(4)).unwrap();
    let mut state = engine.reset();
    let start = state.snake.head;

    let mut faces = vec![start.normal];
    let mut wraps = 0;
    for _ in 0..engine.config().ring_length() {
        let result = engine.step(&mut state);
        match result.outcome {
            TickOutcome::Moved { wrapped, .. } => {
                if wrapped {
                    wraps += 1;
                    faces.push(state.snake.head.normal);
                }
            }
            other => panic!("unexpected tick outcome {other:?}"),
        }
    }

    assert_eq!(wraps, 4);
    assert_eq!(
        faces,
        vec![
            Direction::PosZ,
            Direction::PosY,
            Direction::NegZ,
            Direction::NegY,
            Direction::PosZ
        ]
    );
    assert_eq!(state.snake.head, start);
}

#[test]
fn eating_emits_move_then_food() {
    let mut engine = GameEngine::new(seeded(5)).unwrap();
    let head = HeadState::new(GridCell::new(2, 2, 4), Direction::PosZ, Direction::PosX);
    let mut state = engine
        .restore(Snake::new(head, []), Some(GridCell::new(3, 2, 4)))
        .unwrap();

    let result = engine.step(&mut state);

    assert!(result.ate_food());
    assert_eq!(state.score, 1);
    assert_eq!(state.snake.len(), 2);
    assert_eq!(result.events.len(), 2);
    assert!(matches!(result.events[0], GameEvent::SegmentsChanged { .. }));
    match result.events[1] {
        GameEvent::FoodRelocated(food) => assert_eq!(state.food, Some(food)),
        ref other => panic!("expected food event, got {other:?}"),
    }
}

#[test]
fn autopilot_run_keeps_board_consistent() {
    let mut engine = GameEngine::new(seeded(3)).unwrap();
    let mut state = engine.reset();
    assert_consistent(&engine, &state);

    let mut endings = 0;
    for _ in 0..400 {
        if let Some(direction) = Autopilot.choose(&engine, &state) {
            state.set_pending_direction(direction);
        }
        let result = engine.step(&mut state);
        endings += result
            .events
            .iter()
            .filter(|event| matches!(event, GameEvent::GameEnded(_)))
            .count();

        if let Some(GameEvent::SegmentsChanged { head, body }) = result.events.first() {
            assert_eq!(*head, state.snake.head);
            assert_eq!(body.len(), state.snake.body.len());
        }
        if !state.status.is_terminal() {
            assert_consistent(&engine, &state);
        }
    }

    assert!(endings <= 1);
    assert!(state.foods_eaten > 0);
}

#[test]
fn config_file_drives_engine() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("game.json");
    std::fs::write(
        &path,
        r#"{ "grid_size": 6, "initial_body_length": 4, "rng_seed": 1, "gap": 0.0 }"#,
    )
    .unwrap();

    let config = GameConfig::from_json_file(&path).unwrap();
    let mut engine = GameEngine::new(config).unwrap();
    let state = engine.reset();

    assert_eq!(engine.grid().surface_count(), 152);
    assert_eq!(state.snake.len(), 5);
    assert!(!state.started);
    assert_eq!(engine.grid().spacing(), 1.0);
}
