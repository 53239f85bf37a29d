use std::collections::HashSet;

use broadside::{
    AttackResult, Board, Coordinate, Direction, Feedback, Orientation, PlacementGenerator,
    PlacementRequest, ShipId, StrategyKind, TargetingEngine, TargetingError,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn c(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col)
}

fn rng() -> SmallRng {
    SmallRng::seed_from_u64(42)
}

/// Engine whose previous move was `at` and struck a ship.
fn engine_after_hit(at: Coordinate) -> TargetingEngine {
    let mut engine = TargetingEngine::new();
    engine.commit_move(at).unwrap();
    engine.feedback(Feedback::ShipHit).unwrap();
    engine
}

fn fire(engine: &mut TargetingEngine, board: &mut Board, rng: &mut SmallRng) -> (Coordinate, AttackResult) {
    let at = engine.determine_next_move(rng).unwrap();
    let result = board.receive_attack(at).unwrap();
    engine.feedback(Feedback::from(&result)).unwrap();
    (at, result)
}

#[test]
fn test_new_engine_is_random() {
    let engine = TargetingEngine::new();
    assert_eq!(engine.kind(), StrategyKind::Random);
    assert_eq!(engine.pool().len(), 100);
    assert!(engine.pending_hits().is_empty());
    assert_eq!(engine.previous_move(), None);
}

#[test]
fn test_random_moves_leave_pool() {
    let mut rng = rng();
    let mut engine = TargetingEngine::new();
    let at = engine.determine_next_move(&mut rng).unwrap();
    assert!(!engine.pool().contains(at));
    assert_eq!(engine.pool().len(), 99);
    assert_eq!(engine.previous_move(), Some(at));
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.kind(), StrategyKind::Random);
}

#[test]
fn test_hit_starts_search_to_the_right() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));
    assert_eq!(engine.kind(), StrategyKind::SearchBody);
    assert_eq!(engine.legacy_move(), Some(c(5, 5)));
    assert_eq!(engine.pending_hits(), &[c(5, 5)]);

    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 6)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Right));
    assert_eq!(engine.remaining_offsets().len(), 3);
}

#[test]
fn test_search_cycles_offsets_on_miss() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));
    engine.determine_next_move(&mut rng).unwrap();

    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 4)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Left));
    assert_eq!(engine.remaining_offsets().len(), 2);

    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(6, 5)));
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(4, 5)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Up));
    assert!(engine.remaining_offsets().is_empty());
    assert_eq!(engine.kind(), StrategyKind::SearchBody);
}

#[test]
fn test_search_skips_offsets_off_grid() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(0, 0));
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(0, 1)));
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(1, 0)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Down));
}

#[test]
fn test_second_hit_follows_the_line() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));
    engine.determine_next_move(&mut rng).unwrap();
    engine.feedback(Feedback::ShipHit).unwrap();

    assert_eq!(engine.kind(), StrategyKind::SinkShip);
    assert_eq!(engine.legacy_move(), Some(c(5, 5)));
    assert_eq!(engine.pending_hits(), &[c(5, 5), c(5, 6)]);
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 7)));
}

#[test]
fn test_full_sink_through_opposite_side() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));

    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 6)));
    engine.feedback(Feedback::ShipHit).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 7)));
    engine.feedback(Feedback::ShipHit).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 8)));
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.kind(), StrategyKind::SinkShipOppositeTransition);

    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 4)));
    engine.feedback(Feedback::ShipHit).unwrap();
    assert_eq!(engine.kind(), StrategyKind::SinkShipOpposite);
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 3)));

    engine
        .feedback(Feedback::ShipSunk(vec![
            c(5, 3),
            c(5, 4),
            c(5, 5),
            c(5, 6),
            c(5, 7),
        ]))
        .unwrap();
    assert_eq!(engine.kind(), StrategyKind::Random);
    assert!(engine.pending_hits().is_empty());
    assert_eq!(engine.pool().len(), 94);
}

#[test]
fn test_sinking_line_off_the_edge_resumes_search() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 8));
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 9)));
    engine.feedback(Feedback::ShipHit).unwrap();
    assert_eq!(engine.kind(), StrategyKind::SinkShip);

    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 7)));
    assert_eq!(engine.kind(), StrategyKind::SearchBody);
    assert_eq!(engine.legacy_move(), Some(c(5, 8)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Left));
}

#[test]
fn test_boxed_in_hit_resumes_from_next_pending_hit() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 6)));
    engine.feedback(Feedback::ShipHit).unwrap();
    assert_eq!(engine.pending_hits(), &[c(5, 5), c(5, 6)]);

    engine.commit_move(c(5, 7)).unwrap();
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(5, 4)));
    engine.feedback(Feedback::Miss).unwrap();
    assert_eq!(engine.kind(), StrategyKind::SearchBody);
    assert_eq!(engine.legacy_move(), Some(c(5, 5)));

    engine.commit_move(c(6, 5)).unwrap();
    engine.commit_move(c(4, 5)).unwrap();

    assert_eq!(engine.determine_next_move(&mut rng), Ok(c(6, 6)));
    assert_eq!(engine.kind(), StrategyKind::SearchBody);
    assert_eq!(engine.legacy_move(), Some(c(5, 6)));
    assert_eq!(engine.current_offset().map(|o| o.direction), Some(Direction::Down));
    assert_eq!(engine.remaining_offsets().len(), 1);
}

#[test]
fn test_every_pending_hit_boxed_in_is_invalid() {
    let mut rng = rng();
    let mut engine = engine_after_hit(c(5, 5));
    for at in [c(5, 6), c(5, 4), c(6, 5), c(4, 5)] {
        engine.commit_move(at).unwrap();
    }
    let err = engine.determine_next_move(&mut rng).unwrap_err();
    assert_eq!(
        err,
        TargetingError::InvalidState("every pending hit has been fully searched")
    );
    assert_eq!(engine.pool().len(), 95);
}

#[test]
fn test_sinks_carrier_on_board() {
    let mut rng = rng();
    let mut board = Board::new();
    board
        .place_ship(
            PlacementRequest::new(ShipId::Carrier, Orientation::Vertical),
            c(3, 3),
        )
        .unwrap();

    let mut engine = TargetingEngine::new();
    engine.commit_move(c(3, 3)).unwrap();
    let result = board.receive_attack(c(3, 3)).unwrap();
    engine.feedback(Feedback::from(&result)).unwrap();

    let expected = [c(3, 4), c(3, 2), c(4, 3), c(5, 3), c(6, 3), c(7, 3)];
    for at in expected {
        assert_eq!(fire(&mut engine, &mut board, &mut rng).0, at);
    }
    assert!(board.ships().is_sunk(ShipId::Carrier));
    assert_eq!(engine.kind(), StrategyKind::Random);
    assert_eq!(engine.pool().len(), 93);
}

#[test]
fn test_adjacent_ships_resume_from_pending_hit() {
    let mut rng = rng();
    let mut board = Board::new();
    board
        .place_ship(
            PlacementRequest::new(ShipId::Carrier, Orientation::Vertical),
            c(3, 3),
        )
        .unwrap();
    board
        .place_ship(
            PlacementRequest::new(ShipId::Battleship, Orientation::Vertical),
            c(4, 4),
        )
        .unwrap();

    let mut engine = TargetingEngine::new();
    engine.commit_move(c(4, 3)).unwrap();
    let result = board.receive_attack(c(4, 3)).unwrap();
    engine.feedback(Feedback::from(&result)).unwrap();

    let expected = [
        c(4, 4),
        c(4, 5),
        c(4, 2),
        c(5, 3),
        c(6, 3),
        c(7, 3),
        c(8, 3),
        c(3, 3),
    ];
    for at in expected {
        assert_eq!(fire(&mut engine, &mut board, &mut rng).0, at);
    }
    assert!(board.ships().is_sunk(ShipId::Carrier));
    assert_eq!(engine.pending_hits(), &[c(4, 4)]);
    assert_eq!(engine.kind(), StrategyKind::SearchBody);

    for at in [c(5, 4), c(6, 4), c(7, 4)] {
        assert_eq!(fire(&mut engine, &mut board, &mut rng).0, at);
    }
    assert!(board.ships().is_sunk(ShipId::Battleship));
    assert_eq!(engine.kind(), StrategyKind::Random);
    assert!(engine.pending_hits().is_empty());
    assert_eq!(engine.pool().len(), 88);
}

#[test]
fn test_sinks_generated_fleet_without_repeats() {
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        PlacementGenerator::new()
            .place_fleet(&mut rng, &mut board)
            .unwrap();

        let mut engine = TargetingEngine::new();
        let mut seen = HashSet::new();
        while !board.is_defeated() {
            let (at, result) = fire(&mut engine, &mut board, &mut rng);
            assert!(seen.insert(at), "seed {}: {} fired twice", seed, at);
            assert_ne!(result, AttackResult::AlreadyAttacked);
        }
        assert!(seen.len() <= 100);
        assert_eq!(engine.pool().len(), 100 - seen.len());
        assert!(engine.pending_hits().is_empty());
    }
}

#[test]
fn test_already_attacked_counts_as_miss() {
    assert_eq!(Feedback::from(&AttackResult::AlreadyAttacked), Feedback::Miss);
    assert_eq!(Feedback::from(&AttackResult::Hit), Feedback::ShipHit);
}

#[test]
fn test_commit_move_twice_is_invalid() {
    let mut engine = TargetingEngine::new();
    engine.commit_move(c(1, 1)).unwrap();
    assert!(matches!(
        engine.commit_move(c(1, 1)),
        Err(TargetingError::InvalidState(_))
    ));
}

#[test]
fn test_hit_without_previous_move_is_invalid() {
    let mut engine = TargetingEngine::new();
    assert!(matches!(
        engine.feedback(Feedback::ShipHit),
        Err(TargetingError::InvalidState(_))
    ));
}

#[test]
fn test_hit_before_probe_is_invalid() {
    let mut engine = engine_after_hit(c(5, 5));
    let err = engine.feedback(Feedback::ShipHit).unwrap_err();
    assert!(matches!(err, TargetingError::InvalidState(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_exhausted_pool() {
    let mut rng = rng();
    let mut engine = TargetingEngine::new();
    for r in 0..10 {
        for col in 0..10 {
            engine.commit_move(c(r, col)).unwrap();
        }
    }
    assert!(engine.pool().is_empty());
    assert_eq!(
        engine.determine_next_move(&mut rng),
        Err(TargetingError::Exhausted)
    );
}
