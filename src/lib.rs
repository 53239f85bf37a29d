#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod bitboard;
mod board;
mod common;
mod config;
#[cfg(feature = "std")]
pub mod domain;
mod game;
#[cfg(feature = "std")]
mod logging;
mod placement;
mod player;
mod player_ai;
mod pool;
pub mod prelude;
mod ship;
#[cfg(feature = "std")]
mod ui;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::init_logging;
pub use placement::*;
pub use player::*;
pub use player_ai::*;
pub use pool::*;
pub use ship::*;
#[cfg(feature = "std")]
pub use ui::*;
