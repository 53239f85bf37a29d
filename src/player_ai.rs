use crate::{
    ai::{Feedback, TargetingEngine},
    board::Board,
    common::{AttackResult, BoardError, Coordinate, TargetingError},
    placement::PlacementGenerator,
};
use rand::rngs::SmallRng;

use crate::player::Player;

/// Computer opponent: random non-touching fleet, hunt-and-sink targeting.
#[derive(Debug, Clone)]
pub struct AiPlayer {
    name: &'static str,
    placer: PlacementGenerator,
    targeting: TargetingEngine,
}

impl AiPlayer {
    pub fn new() -> Self {
        Self::named("Computer")
    }

    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            placer: PlacementGenerator::new(),
            targeting: TargetingEngine::new(),
        }
    }

    pub fn targeting(&self) -> &TargetingEngine {
        &self.targeting
    }
}

impl Default for AiPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for AiPlayer {
    fn name(&self) -> &str {
        self.name
    }

    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError> {
        self.placer.place_fleet(rng, board)
    }

    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Coordinate, TargetingError> {
        self.targeting.determine_next_move(rng)
    }

    fn handle_attack_result(
        &mut self,
        _target: Coordinate,
        result: &AttackResult,
    ) -> Result<(), TargetingError> {
        self.targeting.feedback(Feedback::from(result))
    }

    fn reset(&mut self) {
        self.targeting = TargetingEngine::new();
    }
}
