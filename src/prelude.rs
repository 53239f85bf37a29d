//! Commonly used types and utilities for ease of import.

pub use crate::{
    AiPlayer, AttackResult, Board, Coordinate, Feedback, GameEngine, GameStatus, Match,
    MovePool, Orientation, PlacementGenerator, PlacementRequest, Player, ShipId, Side,
    StrategyKind, TargetingEngine,
};

#[cfg(feature = "std")]
pub use crate::{init_logging, print_player_view};
