#![cfg(feature = "std")]

use std::fmt;

use crate::{
    common::Coordinate,
    config::BOARD_SIZE,
    game::GameEngine,
};

const GRID_SIZE: usize = BOARD_SIZE as usize;

/// One side's shots at the opponent: `X` hit, `o` miss, `.` untried.
pub struct ShotGrid<'a>(pub &'a GameEngine);

impl fmt::Display for ShotGrid<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hits = self.0.guess_hits();
        let misses = self.0.guess_misses();
        write!(f, "  ")?;
        for c in 0..GRID_SIZE {
            write!(f, " {}", c)?;
        }
        writeln!(f)?;
        for r in 0..GRID_SIZE {
            write!(f, "{:>2}", r)?;
            for c in 0..GRID_SIZE {
                let at = Coordinate::new(r, c);
                let ch = if hits.get(at).unwrap_or(false) {
                    'X'
                } else if misses.get(at).unwrap_or(false) {
                    'o'
                } else {
                    '.'
                };
                write!(f, " {}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Render one side's shots at the opponent.
pub fn render_shots(engine: &GameEngine) -> String {
    ShotGrid(engine).to_string()
}

/// Print a side's own fleet next to its record of shots.
pub fn print_player_view(name: &str, engine: &GameEngine) {
    println!("== {} ==", name);
    let fleet = engine.board().to_string();
    let shots = render_shots(engine);
    println!("{:<24}   {}", "Fleet", "Shots");
    for (left, right) in fleet.lines().zip(shots.lines()) {
        println!("{:<24}   {}", left, right);
    }
}
