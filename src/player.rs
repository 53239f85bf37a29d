use crate::{
    board::Board,
    common::{AttackResult, BoardError, Coordinate, TargetingError},
};
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
///
/// A player places its own fleet, picks targets on the opponent's board and
/// is told the outcome of every attack it makes.
pub trait Player {
    /// Display name used in announcements.
    fn name(&self) -> &str;

    /// Place all ships onto the provided board.
    fn place_ships(&mut self, rng: &mut SmallRng, board: &mut Board) -> Result<(), BoardError>;

    /// Choose the next coordinate to attack.
    fn select_target(&mut self, rng: &mut SmallRng) -> Result<Coordinate, TargetingError>;

    /// Inform the player of the result of its last attack.
    fn handle_attack_result(
        &mut self,
        _target: Coordinate,
        _result: &AttackResult,
    ) -> Result<(), TargetingError> {
        Ok(())
    }

    /// Drop all per-game state ahead of a new round.
    fn reset(&mut self) {}
}
