//! Common types for Broadside: coordinates, attack results and errors.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoardError;
use crate::config::BOARD_SIZE;
use crate::game::Side;
use crate::ship::ShipId;

/// A `(row, col)` position. Values outside the grid are representable so that
/// board operations can reject them with [`BoardError::OutOfBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns `true` if the coordinate lies inside the grid.
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE as usize && self.col < BOARD_SIZE as usize
    }

    /// Apply a signed `(d_row, d_col)` delta. Yields `None` when the result
    /// would leave the grid.
    pub fn step(&self, delta: (i8, i8)) -> Option<Coordinate> {
        let row = self.row as isize + delta.0 as isize;
        let col = self.col as isize + delta.1 as isize;
        if row < 0 || col < 0 {
            return None;
        }
        let next = Coordinate::new(row as usize, col as usize);
        next.is_valid().then_some(next)
    }

    /// In-bounds cells around this one, diagonals included.
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        (-1i8..=1)
            .flat_map(|dr| (-1i8..=1).map(move |dc| (dr, dc)))
            .filter(|&d| d != (0, 0))
            .filter_map(move |d| self.step(d))
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Coordinate::new(row, col)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Orientation of a ship on the board.
///
/// `Horizontal` grows the column index, `Vertical` grows the row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Outcome of an attack against a board.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum AttackResult {
    /// The cell was empty.
    Miss,
    /// A ship was struck but is still afloat.
    Hit,
    /// The strike sank a ship, carrying its identity and location.
    Sunk {
        ship: ShipId,
        coordinates: Vec<Coordinate>,
    },
    /// The cell had already been attacked; nothing changed.
    AlreadyAttacked,
}

impl AttackResult {
    /// Returns `true` for results that struck a ship.
    pub fn is_ship_hit(&self) -> bool {
        matches!(self, AttackResult::Hit | AttackResult::Sunk { .. })
    }
}

/// Errors returned by Board and ship registry operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinate is outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// Placement overlaps an occupied cell.
    Collision { row: usize, col: usize },
    /// Automated placement touches another ship, diagonals included.
    AdjacencyViolation { row: usize, col: usize },
    /// Hit registered against a ship that is already sunk.
    AlreadySunk(ShipId),
    /// Ship already has a location on this board.
    AlreadyPlaced(ShipId),
    /// Coordinate run does not match the ship's size.
    SizeMismatch { expected: usize, actual: usize },
    /// Placement generator ran out of attempts.
    UnableToPlaceShip(ShipId),
}

impl BoardError {
    /// Fatal errors are internal invariant breaches; the rest are caused by a
    /// caller offering a bad target and can be retried.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            BoardError::AlreadySunk(_) | BoardError::UnableToPlaceShip(_)
        )
    }

    /// Errors the automated placement loop retries on.
    pub fn is_placement_retry(&self) -> bool {
        matches!(
            self,
            BoardError::Collision { .. } | BoardError::AdjacencyViolation { .. }
        )
    }
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        match err {
            BitBoardError::IndexOutOfBounds { row, col } => BoardError::OutOfBounds { row, col },
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds { row, col } => {
                write!(f, "Coordinate ({}, {}) is out of bounds", row, col)
            }
            BoardError::Collision { row, col } => {
                write!(f, "Collision detected at ({}, {})", row, col)
            }
            BoardError::AdjacencyViolation { row, col } => {
                write!(f, "Ship would touch another ship at ({}, {})", row, col)
            }
            BoardError::AlreadySunk(ship) => write!(f, "{} is already sunk", ship),
            BoardError::AlreadyPlaced(ship) => {
                write!(f, "{} has already been placed on the board", ship)
            }
            BoardError::SizeMismatch { expected, actual } => write!(
                f,
                "Ship needs {} coordinates, got {}",
                expected, actual
            ),
            BoardError::UnableToPlaceShip(ship) => write!(f, "Unable to place {}", ship),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by the targeting engine and its move pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetingError {
    /// No untried coordinates remain.
    Exhausted,
    /// The engine was driven outside its state contract.
    InvalidState(&'static str),
}

impl TargetingError {
    /// Both targeting errors indicate a logic defect and end the game.
    pub fn is_fatal(&self) -> bool {
        true
    }
}

impl fmt::Display for TargetingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetingError::Exhausted => write!(f, "No more moves left in the pool"),
            TargetingError::InvalidState(reason) => write!(f, "Invalid targeting state: {}", reason),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TargetingError {}

/// Any error a match can surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    Targeting(TargetingError),
    /// A turn was requested after one side was defeated.
    Finished,
    /// A turn was requested before both fleets were fully placed.
    NotReady(Side),
    /// The match ran past its turn cap without a winner.
    TurnLimit(usize),
}

impl GameError {
    pub fn is_fatal(&self) -> bool {
        match self {
            GameError::Board(e) => e.is_fatal(),
            GameError::Targeting(e) => e.is_fatal(),
            GameError::Finished | GameError::NotReady(_) => false,
            GameError::TurnLimit(_) => true,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl From<TargetingError> for GameError {
    fn from(err: TargetingError) -> Self {
        GameError::Targeting(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "Board error: {}", e),
            GameError::Targeting(e) => write!(f, "Targeting error: {}", e),
            GameError::Finished => write!(f, "The match is already over"),
            GameError::NotReady(side) => write!(f, "{:?} has not placed its whole fleet", side),
            GameError::TurnLimit(limit) => write!(f, "No winner after {} turns", limit),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
