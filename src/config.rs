use crate::ship::ShipId;

pub const BOARD_SIZE: u8 = 10;
pub const NUM_SHIPS: usize = 5;

/// Fixed roster, in placement and reporting order.
pub const FLEET: [ShipId; NUM_SHIPS] = [
    ShipId::Carrier,
    ShipId::Battleship,
    ShipId::Cruiser,
    ShipId::Submarine,
    ShipId::Destroyer,
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 2 + 2;

/// Number of cells on the grid, and the initial size of a move pool.
pub const GRID_CELLS: usize = BOARD_SIZE as usize * BOARD_SIZE as usize;

/// Retry budget for the automated placement loop. Five ships on a 10×10 grid
/// always fit, so running out means the board is in an unreachable state.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;
