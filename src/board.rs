//! Game board state: a 10×10 grid of cells backed by the ship registry.

use alloc::vec::Vec;
use core::fmt;

use crate::bitboard::BitBoard;
use crate::common::{AttackResult, BoardError, Coordinate, Orientation};
use crate::config::BOARD_SIZE;
use crate::ship::{ShipId, ShipRegistry};

type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// A single grid cell. `hit` never goes back to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    pub hit: bool,
    pub occupant: Option<ShipId>,
}

/// Which ship to place next and which way it points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementRequest {
    pub ship: ShipId,
    pub orientation: Orientation,
}

impl PlacementRequest {
    pub fn new(ship: ShipId, orientation: Orientation) -> Self {
        Self { ship, orientation }
    }
}

/// One player's board: cell grid, ship records and the live-ship index.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; GRID_SIZE]; GRID_SIZE],
    ships: ShipRegistry,
    live: BB,
    defeated: bool,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new() -> Self {
        Board {
            cells: [[Cell::default(); GRID_SIZE]; GRID_SIZE],
            ships: ShipRegistry::new(),
            live: BB::new(),
            defeated: false,
        }
    }

    /// Compute `size` coordinates from `anchor` along `orientation`.
    ///
    /// Cells past the far edge fold back: once the forward run would leave
    /// the grid, the remaining cells are taken one by one behind the anchor.
    pub fn fold_coordinates(
        anchor: Coordinate,
        orientation: Orientation,
        size: usize,
    ) -> Result<Vec<Coordinate>, BoardError> {
        if !anchor.is_valid() {
            return Err(BoardError::OutOfBounds {
                row: anchor.row,
                col: anchor.col,
            });
        }
        let base = match orientation {
            Orientation::Horizontal => anchor.col,
            Orientation::Vertical => anchor.row,
        };
        let at = |line: usize| match orientation {
            Orientation::Horizontal => Coordinate::new(anchor.row, line),
            Orientation::Vertical => Coordinate::new(line, anchor.col),
        };

        let mut coordinates = Vec::with_capacity(size);
        let mut backward = 0;
        for i in 0..size {
            if base + i < GRID_SIZE {
                coordinates.push(at(base + i));
                continue;
            }
            backward += 1;
            match base.checked_sub(backward) {
                Some(line) => coordinates.push(at(line)),
                None => {
                    return Err(BoardError::OutOfBounds {
                        row: anchor.row,
                        col: anchor.col,
                    })
                }
            }
        }
        Ok(coordinates)
    }

    /// Place a ship for a human player: folding run from `anchor`, overlap
    /// check only.
    pub fn place_ship(
        &mut self,
        request: PlacementRequest,
        anchor: Coordinate,
    ) -> Result<&[Coordinate], BoardError> {
        self.ensure_unplaced(request.ship)?;
        let coordinates =
            Self::fold_coordinates(anchor, request.orientation, request.ship.size())?;
        self.check_collisions(&coordinates)?;
        self.commit(request.ship, coordinates)
    }

    /// Place a ship for the automated player: every cell must be in bounds,
    /// empty, and have no occupied neighbour (diagonals included). Neighbours
    /// off the grid count as vacant.
    pub fn place_ship_strict(
        &mut self,
        ship: ShipId,
        coordinates: &[Coordinate],
    ) -> Result<&[Coordinate], BoardError> {
        for c in coordinates {
            self.retrieve(*c)?;
        }
        if coordinates.len() != ship.size() {
            return Err(BoardError::SizeMismatch {
                expected: ship.size(),
                actual: coordinates.len(),
            });
        }
        self.ensure_unplaced(ship)?;
        self.check_collisions(coordinates)?;
        for c in coordinates {
            if let Some(n) = c.neighbors().find(|n| self.cell(*n).occupant.is_some()) {
                return Err(BoardError::AdjacencyViolation {
                    row: n.row,
                    col: n.col,
                });
            }
        }
        self.commit(ship, coordinates.to_vec())
    }

    /// Resolve an attack at `at`.
    pub fn receive_attack(&mut self, at: Coordinate) -> Result<AttackResult, BoardError> {
        let cell = self.retrieve(at)?;
        if cell.hit {
            log::debug!("attack at {} ignored, cell already hit", at);
            return Ok(AttackResult::AlreadyAttacked);
        }
        self.cells[at.row][at.col].hit = true;

        let ship = match cell.occupant {
            Some(ship) => ship,
            None => return Ok(AttackResult::Miss),
        };
        if !self.ships.hit(ship)? {
            return Ok(AttackResult::Hit);
        }

        let coordinates = self.ships.get(ship).location().to_vec();
        for c in &coordinates {
            self.live.clear(*c)?;
        }
        if self.live.is_empty() {
            log::info!("last ship sunk, board defeated");
            self.defeated = true;
        }
        Ok(AttackResult::Sunk { ship, coordinates })
    }

    /// Copy of the cell at `at`.
    pub fn retrieve(&self, at: Coordinate) -> Result<Cell, BoardError> {
        if !at.is_valid() {
            return Err(BoardError::OutOfBounds {
                row: at.row,
                col: at.col,
            });
        }
        Ok(self.cell(at))
    }

    /// Immutable view of the fleet records.
    pub fn ships(&self) -> &ShipRegistry {
        &self.ships
    }

    /// Cells of ships that are still afloat.
    pub fn live_cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.live.iter_set_bits()
    }

    /// Set once the last live ship has been sunk.
    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    fn cell(&self, at: Coordinate) -> Cell {
        self.cells[at.row][at.col]
    }

    fn ensure_unplaced(&self, ship: ShipId) -> Result<(), BoardError> {
        if self.ships.get(ship).is_placed() {
            return Err(BoardError::AlreadyPlaced(ship));
        }
        Ok(())
    }

    fn check_collisions(&self, coordinates: &[Coordinate]) -> Result<(), BoardError> {
        for c in coordinates {
            if self.retrieve(*c)?.occupant.is_some() {
                return Err(BoardError::Collision {
                    row: c.row,
                    col: c.col,
                });
            }
        }
        Ok(())
    }

    fn commit(
        &mut self,
        ship: ShipId,
        coordinates: Vec<Coordinate>,
    ) -> Result<&[Coordinate], BoardError> {
        for c in &coordinates {
            self.cells[c.row][c.col].occupant = Some(ship);
            self.live.set(*c)?;
        }
        log::debug!("placed {} at {:?}", ship, coordinates);
        self.ships.set_coordinates(ship, coordinates);
        Ok(self.ships.get(ship).location())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  live: {:?},\n  defeated: {},\n  ships: {:?}\n}}",
            self.live, self.defeated, self.ships
        )
    }
}

/// Owner's view: ship letters, `X` for struck ship cells, `o` for misses.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{:>2}", r)?;
            for cell in row {
                let ch = match (cell.hit, cell.occupant) {
                    (true, Some(_)) => 'X',
                    (true, None) => 'o',
                    (false, Some(ship)) => ship.symbol(),
                    (false, None) => '.',
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
