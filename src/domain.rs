#![cfg(feature = "std")]

//! Serializable reports emitted by the binaries.

use serde::{Deserialize, Serialize};

use crate::game::{GameStatus, Match, Side};
use crate::ship::ShipId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub name: String,
    pub status: GameStatus,
    pub shots: usize,
    pub hits: usize,
    pub misses: usize,
    pub ships_remaining: Vec<ShipId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub turns: usize,
    pub winner: Option<String>,
    pub players: Vec<PlayerSummary>,
}

impl PlayerSummary {
    pub fn from_match(game: &Match, side: Side) -> Self {
        let engine = game.engine(side);
        let ships_remaining = engine
            .board()
            .ships()
            .all()
            .iter()
            .filter(|ship| !ship.is_sunk())
            .map(|ship| ship.id())
            .collect();
        PlayerSummary {
            name: game.player(side).name().to_string(),
            status: engine.status(),
            shots: engine.shots_fired(),
            hits: engine.guess_hits().count_ones(),
            misses: engine.guess_misses().count_ones(),
            ships_remaining,
        }
    }
}

impl From<&Match> for GameSummary {
    fn from(game: &Match) -> Self {
        GameSummary {
            turns: game.turns(),
            winner: game
                .winner()
                .map(|side| game.player(side).name().to_string()),
            players: vec![
                PlayerSummary::from_match(game, Side::First),
                PlayerSummary::from_match(game, Side::Second),
            ],
        }
    }
}

/// Aggregate over many computer-vs-computer games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub mean_turns: f64,
    pub min_turns: usize,
    pub max_turns: usize,
}

impl BatchSummary {
    pub fn from_games(summaries: &[GameSummary], first: &str) -> Self {
        let games = summaries.len();
        let first_wins = summaries
            .iter()
            .filter(|s| s.winner.as_deref() == Some(first))
            .count();
        let second_wins = summaries.iter().filter(|s| s.winner.is_some()).count() - first_wins;
        let turns = summaries.iter().map(|s| s.turns);
        let total: usize = turns.clone().sum();
        BatchSummary {
            games,
            first_wins,
            second_wins,
            mean_turns: if games == 0 { 0.0 } else { total as f64 / games as f64 },
            min_turns: turns.clone().min().unwrap_or(0),
            max_turns: turns.max().unwrap_or(0),
        }
    }
}
