use pacman_maze_engine::config::SessionConfig;
use pacman_maze_engine::engine::GameSession;
use pacman_maze_engine::scoring;
use pacman_maze_engine::types::{Direction, GameMode, MazeVariant, MoveOutcome, Position, Tile};
use proptest::prelude::*;

fn variant_strategy() -> impl Strategy<Value = MazeVariant> {
    prop_oneof![
        Just(MazeVariant::LowerTriangle),
        Just(MazeVariant::UpperTriangle),
        Just(MazeVariant::Horizontal),
    ]
}

fn mode_strategy() -> impl Strategy<Value = GameMode> {
    prop_oneof![Just(GameMode::MonsterMaze), Just(GameMode::SingleFood)]
}

fn direction_strategy() -> impl Strategy<Value = Direction> {
    prop_oneof![
        Just(Direction::Up),
        Just(Direction::Down),
        Just(Direction::Left),
        Just(Direction::Right),
    ]
}

fn build(seed: i64, variant: MazeVariant, length: i32, width: i32, mode: GameMode) -> GameSession {
    GameSession::new(SessionConfig::new(seed, variant, length, width, mode), 1, "Prop")
        .expect("roomy maze builds")
}

proptest! {
    #[test]
    fn construction_is_deterministic(
        seed in 1i64..=i64::MAX,
        variant in variant_strategy(),
        mode in mode_strategy(),
        length in 3i32..16,
        width in 3i32..16,
    ) {
        let config = SessionConfig::new(seed, variant, length, width, mode);
        let first = GameSession::new(config.clone(), 1, "A");
        let second = GameSession::new(config, 1, "A");
        match (first, second) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(a.render_rows(), b.render_rows());
                prop_assert_eq!(a.monsters(), b.monsters());
                prop_assert_eq!(a.foods(), b.foods());
            }
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            _ => prop_assert!(false, "construction outcome differs for the same config"),
        }
    }

    #[test]
    fn border_is_always_boundary(
        seed in 1i64..10_000,
        variant in variant_strategy(),
        length in 8i32..20,
        width in 8i32..20,
    ) {
        let session = build(seed, variant, length, width, GameMode::MonsterMaze);
        let rows = session.render_rows();
        prop_assert_eq!(rows.len(), width as usize);
        for (row, text) in rows.iter().enumerate() {
            prop_assert_eq!(text.chars().count(), length as usize);
            let edge = row == 0 || row == width as usize - 1;
            for (col, symbol) in text.chars().enumerate() {
                if edge || col == 0 || col == length as usize - 1 {
                    prop_assert_eq!(symbol, '#');
                } else {
                    prop_assert_ne!(symbol, '#');
                }
            }
        }
    }

    #[test]
    fn blocked_moves_only_count_hits(
        seed in 1i64..10_000,
        variant in variant_strategy(),
        bumps in 1usize..20,
    ) {
        let mut session = build(seed, variant, 10, 9, GameMode::MonsterMaze);
        let rows = session.render_rows();
        for idx in 0..bumps {
            let dir = if idx % 2 == 0 { Direction::Up } else { Direction::Left };
            prop_assert_eq!(session.request_move(dir), MoveOutcome::Blocked);
        }
        prop_assert_eq!(session.actor(), Position::new(1, 1));
        prop_assert_eq!(session.counters().hits as usize, bumps);
        prop_assert_eq!(session.counters().moves, 0);
        prop_assert_eq!(session.render_rows(), rows);
    }

    #[test]
    fn random_walks_keep_counters_consistent(
        seed in 1i64..10_000,
        variant in variant_strategy(),
        mode in mode_strategy(),
        walk in prop::collection::vec(direction_strategy(), 1..120),
    ) {
        let mut session = build(seed, variant, 10, 9, mode);
        let mut accepted = 0u32;
        for dir in walk {
            let outcome = session.request_move(dir);
            if outcome == MoveOutcome::NotActive {
                prop_assert!(session.is_finished());
                continue;
            }
            accepted += 1;

            let counters = *session.counters();
            let died = u32::from(!session.is_alive());
            prop_assert_eq!(counters.hits + counters.moves + died, accepted);
            prop_assert_eq!(
                counters.superpower_charges + counters.monsters_killed,
                counters.food_eaten
            );
            let actors = session.snapshot_grid().count_tiles(|tile| tile == Tile::Actor);
            prop_assert_eq!(actors, 1);
            prop_assert_eq!(session.snapshot_grid().get(session.actor()), Some(Tile::Actor));
        }

        if session.is_finished() {
            let counters = *session.counters();
            let expected = scoring::score(mode, &counters, session.is_alive());
            let record = session.score_record().expect("finished sessions have a record");
            prop_assert_eq!(record.score.to_bits(), expected.to_bits());
            prop_assert_eq!(session.score().expect("finished").to_bits(), expected.to_bits());
        } else {
            prop_assert!(session.score_record().is_none());
        }
    }
}
