//! Random fleet placement for the automated player.

use alloc::vec::Vec;
use rand::Rng;

use crate::board::Board;
use crate::common::{BoardError, Coordinate, Orientation};
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::ShipId;

/// Places ships so that no two of them touch, diagonals included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementGenerator {
    max_attempts: usize,
}

impl PlacementGenerator {
    pub fn new() -> Self {
        Self::with_max_attempts(MAX_PLACEMENT_ATTEMPTS)
    }

    pub fn with_max_attempts(max_attempts: usize) -> Self {
        Self { max_attempts }
    }

    /// Pick random anchors and orientations for `ship` until one passes the
    /// strict placement rules, then commit it.
    pub fn place<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        board: &mut Board,
        ship: ShipId,
    ) -> Result<Vec<Coordinate>, BoardError> {
        for attempt in 1..=self.max_attempts {
            let anchor = Coordinate::new(
                rng.random_range(0..BOARD_SIZE as usize),
                rng.random_range(0..BOARD_SIZE as usize),
            );
            let orientation = if rng.random_bool(0.5) {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            let candidate = Board::fold_coordinates(anchor, orientation, ship.size())?;
            match board.place_ship_strict(ship, &candidate) {
                Ok(placed) => {
                    log::debug!("{} placed after {} attempt(s)", ship, attempt);
                    return Ok(placed.to_vec());
                }
                Err(e) if e.is_placement_retry() => continue,
                Err(e) => return Err(e),
            }
        }
        log::error!("gave up placing {} after {} attempts", ship, self.max_attempts);
        Err(BoardError::UnableToPlaceShip(ship))
    }

    /// Place every roster ship that is not on the board yet.
    pub fn place_fleet<R: Rng + ?Sized>(&self, rng: &mut R, board: &mut Board) -> Result<(), BoardError> {
        for ship in FLEET {
            if board.ships().get(ship).is_placed() {
                continue;
            }
            self.place(rng, board, ship)?;
        }
        Ok(())
    }
}

impl Default for PlacementGenerator {
    fn default() -> Self {
        Self::new()
    }
}
