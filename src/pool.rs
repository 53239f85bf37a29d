//! The shrinking set of coordinates an automated attacker has not tried yet.

use rand::Rng;

use crate::bitboard::BitBoard;
use crate::common::{Coordinate, TargetingError};
use crate::config::BOARD_SIZE;

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Untried coordinates. Starts with all 100 cells and never regrows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePool {
    remaining: BB,
}

impl MovePool {
    /// A full pool.
    pub fn new() -> Self {
        Self {
            remaining: BB::full(),
        }
    }

    pub fn len(&self) -> usize {
        self.remaining.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Returns `true` if `at` has not been tried. Off-grid coordinates are
    /// never in the pool.
    pub fn contains(&self, at: Coordinate) -> bool {
        self.remaining.get(at).unwrap_or(false)
    }

    /// Remove and return a coordinate chosen uniformly among those remaining.
    pub fn draw_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Coordinate, TargetingError> {
        let len = self.len();
        if len == 0 {
            return Err(TargetingError::Exhausted);
        }
        let at = self
            .remaining
            .nth_set(rng.random_range(0..len))
            .ok_or(TargetingError::Exhausted)?;
        self.consume(at);
        Ok(at)
    }

    /// Remove `at` if present. Returns whether it was present; an absent
    /// coordinate has already been tried and is not a valid target.
    pub fn consume(&mut self, at: Coordinate) -> bool {
        if !self.contains(at) {
            return false;
        }
        self.remaining.clear(at).is_ok()
    }

    /// Remaining coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.remaining.iter_set_bits()
    }
}

impl Default for MovePool {
    fn default() -> Self {
        Self::new()
    }
}
