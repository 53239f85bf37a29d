//! Ship identifiers, per-ship records and the fleet registry.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Coordinate};
use crate::config::{FLEET, NUM_SHIPS};

/// One of the five ships in the fixed roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum ShipId {
    Carrier,
    Battleship,
    Cruiser,
    Submarine,
    Destroyer,
}

impl ShipId {
    /// Number of cells the ship occupies.
    pub const fn size(self) -> usize {
        match self {
            ShipId::Carrier => 5,
            ShipId::Battleship => 4,
            ShipId::Cruiser => 3,
            ShipId::Submarine | ShipId::Destroyer => 2,
        }
    }

    /// Ship's name.
    pub const fn name(self) -> &'static str {
        match self {
            ShipId::Carrier => "carrier",
            ShipId::Battleship => "battleship",
            ShipId::Cruiser => "cruiser",
            ShipId::Submarine => "submarine",
            ShipId::Destroyer => "destroyer",
        }
    }

    /// Position in the roster.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single character used when rendering boards.
    pub const fn symbol(self) -> char {
        match self {
            ShipId::Carrier => 'C',
            ShipId::Battleship => 'B',
            ShipId::Cruiser => 'R',
            ShipId::Submarine => 'S',
            ShipId::Destroyer => 'D',
        }
    }
}

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hit record and location of a single ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    hits: usize,
    sunk: bool,
    location: Vec<Coordinate>,
}

impl Ship {
    pub fn new(id: ShipId) -> Self {
        Self {
            id,
            hits: 0,
            sunk: false,
            location: Vec::new(),
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.id.size()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Committed coordinates, empty until the ship is placed.
    pub fn location(&self) -> &[Coordinate] {
        &self.location
    }

    pub fn is_placed(&self) -> bool {
        !self.location.is_empty()
    }

    /// Register one hit. Returns `true` when this hit sinks the ship.
    pub fn hit(&mut self) -> Result<bool, BoardError> {
        if self.sunk {
            return Err(BoardError::AlreadySunk(self.id));
        }
        self.hits += 1;
        self.sunk = self.hits == self.size();
        Ok(self.sunk)
    }
}

/// Record keeper for one player's fleet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipRegistry {
    ships: [Ship; NUM_SHIPS],
}

impl ShipRegistry {
    pub fn new() -> Self {
        Self {
            ships: FLEET.map(Ship::new),
        }
    }

    /// Register a hit on `id`. Returns `true` when the hit sinks it.
    pub fn hit(&mut self, id: ShipId) -> Result<bool, BoardError> {
        self.ships[id.index()].hit()
    }

    pub fn is_sunk(&self, id: ShipId) -> bool {
        self.ships[id.index()].is_sunk()
    }

    pub fn all_sunk(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Ships in roster order.
    pub fn all(&self) -> &[Ship] {
        &self.ships
    }

    pub fn get(&self, id: ShipId) -> &Ship {
        &self.ships[id.index()]
    }

    /// Record the committed location of `id`.
    pub fn set_coordinates(&mut self, id: ShipId, coordinates: Vec<Coordinate>) {
        self.ships[id.index()].location = coordinates;
    }
}

impl Default for ShipRegistry {
    fn default() -> Self {
        Self::new()
    }
}
