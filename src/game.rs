use alloc::{boxed::Box, rc::Rc, vec::Vec};
use core::cell::RefCell;
use rand::rngs::SmallRng;

use crate::{
    bitboard::BitBoard,
    board::Board,
    common::{AttackResult, BoardError, Coordinate, GameError},
    config::{BOARD_SIZE, FLEET, NUM_SHIPS},
    player::Player,
    ship::{Ship, ShipId},
};

/// Bitboard type used for shot tracking.
type BB = BitBoard<u128, { BOARD_SIZE as usize }>;

/// Current status of a game from one side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

/// One side's board plus the record of its own shots at the opponent.
#[derive(Debug, Clone)]
pub struct GameEngine {
    board: Board,
    guess_hits: BB,
    guess_misses: BB,
    enemy_sunk: [bool; NUM_SHIPS],
}

impl GameEngine {
    /// Create a new engine with an empty board and no shots recorded.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            guess_hits: BB::new(),
            guess_misses: BB::new(),
            enemy_sunk: [false; NUM_SHIPS],
        }
    }

    /// Mutable reference to the player's board for ship placement.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Bitboard of our shots that struck a ship.
    pub fn guess_hits(&self) -> BB {
        self.guess_hits
    }

    /// Bitboard of our shots that found open water.
    pub fn guess_misses(&self) -> BB {
        self.guess_misses
    }

    pub fn shots_fired(&self) -> usize {
        self.guess_hits.count_ones() + self.guess_misses.count_ones()
    }

    /// Handle an opponent attack on the player's board.
    pub fn opponent_guess(&mut self, at: Coordinate) -> Result<AttackResult, BoardError> {
        self.board.receive_attack(at)
    }

    /// Record the result of an attack made against the opponent.
    pub fn record_guess(&mut self, at: Coordinate, result: &AttackResult) -> Result<(), BoardError> {
        match result {
            AttackResult::Miss => self.guess_misses.set(at)?,
            AttackResult::Hit => self.guess_hits.set(at)?,
            AttackResult::Sunk { ship, .. } => {
                self.guess_hits.set(at)?;
                self.enemy_sunk[ship.index()] = true;
            }
            AttackResult::AlreadyAttacked => {}
        }
        Ok(())
    }

    /// Enemy ships not yet reported sunk, in roster order.
    pub fn enemy_ships_remaining(&self) -> impl Iterator<Item = ShipId> + '_ {
        FLEET.into_iter().filter(|ship| !self.enemy_sunk[ship.index()])
    }

    /// Returns `true` once every roster ship is on this side's board.
    pub fn fleet_ready(&self) -> bool {
        self.board.ships().all().iter().all(Ship::is_placed)
    }

    /// Evaluate the current game status.
    pub fn status(&self) -> GameStatus {
        if self.board.is_defeated() {
            GameStatus::Lost
        } else if self.enemy_sunk.iter().all(|sunk| *sunk) {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// The two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    First,
    Second,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Side::First => 0,
            Side::Second => 1,
        }
    }
}

/// One resolved attack, as published to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackEvent {
    pub turn: usize,
    pub attacker: Side,
    pub target: Coordinate,
    pub result: AttackResult,
}

/// Receiver of attack outcomes. Notifications are fire-and-forget.
pub trait AttackObserver {
    fn on_attack(&mut self, event: &AttackEvent);
}

impl<T: AttackObserver> AttackObserver for Rc<RefCell<T>> {
    fn on_attack(&mut self, event: &AttackEvent) {
        self.borrow_mut().on_attack(event);
    }
}

/// Forwards every attack to the logger.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl AttackObserver for LogObserver {
    fn on_attack(&mut self, event: &AttackEvent) {
        match &event.result {
            AttackResult::Sunk { ship, .. } => log::info!(
                "turn {}: {:?} sank the {} at {}",
                event.turn,
                event.attacker,
                ship,
                event.target
            ),
            result => log::debug!(
                "turn {}: {:?} fired at {}: {:?}",
                event.turn,
                event.attacker,
                event.target,
                result
            ),
        }
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingObserver {
    events: Vec<AttackEvent>,
}

impl RecordingObserver {
    pub fn events(&self) -> &[AttackEvent] {
        &self.events
    }
}

impl AttackObserver for RecordingObserver {
    fn on_attack(&mut self, event: &AttackEvent) {
        self.events.push(event.clone());
    }
}

/// Turn driver for two players. Holds all per-game state; two matches
/// never share anything.
pub struct Match {
    players: [Box<dyn Player>; 2],
    engines: [GameEngine; 2],
    observers: Vec<Box<dyn AttackObserver>>,
    turn: Side,
    turns: usize,
}

impl Match {
    pub fn new(first: Box<dyn Player>, second: Box<dyn Player>) -> Self {
        Self {
            players: [first, second],
            engines: [GameEngine::new(), GameEngine::new()],
            observers: Vec::new(),
            turn: Side::First,
            turns: 0,
        }
    }

    /// Register a receiver for attack outcomes.
    pub fn subscribe(&mut self, observer: Box<dyn AttackObserver>) {
        self.observers.push(observer);
    }

    /// Let both players place their fleets from the same RNG stream.
    pub fn setup(&mut self, rng: &mut SmallRng) -> Result<(), GameError> {
        for side in [Side::First, Side::Second] {
            self.setup_side(side, rng)?;
        }
        Ok(())
    }

    /// Let one player place its fleet.
    pub fn setup_side(&mut self, side: Side, rng: &mut SmallRng) -> Result<(), GameError> {
        let i = side.index();
        self.players[i].place_ships(rng, self.engines[i].board_mut())?;
        Ok(())
    }

    /// Both fleets are fully placed and attacks may start.
    pub fn is_ready(&self) -> bool {
        self.engines.iter().all(GameEngine::fleet_ready)
    }

    pub fn engine(&self, side: Side) -> &GameEngine {
        &self.engines[side.index()]
    }

    pub fn engine_mut(&mut self, side: Side) -> &mut GameEngine {
        &mut self.engines[side.index()]
    }

    pub fn player(&self, side: Side) -> &dyn Player {
        self.players[side.index()].as_ref()
    }

    /// Side whose move executes next.
    pub fn current_turn(&self) -> Side {
        self.turn
    }

    /// Number of attacks executed so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// The side that sank the whole opposing fleet, if any.
    pub fn winner(&self) -> Option<Side> {
        [Side::First, Side::Second]
            .into_iter()
            .find(|side| self.engine(side.other()).board().is_defeated())
    }

    /// Execute exactly one attack for the side to move. The turn passes
    /// unless the target had already been attacked.
    pub fn play_turn(&mut self, rng: &mut SmallRng) -> Result<AttackEvent, GameError> {
        if self.winner().is_some() {
            return Err(GameError::Finished);
        }
        if let Some(side) = [Side::First, Side::Second]
            .into_iter()
            .find(|side| !self.engine(*side).fleet_ready())
        {
            return Err(GameError::NotReady(side));
        }
        let attacker = self.turn;
        let (a, d) = (attacker.index(), attacker.other().index());

        let target = self.players[a].select_target(rng)?;
        let result = self.engines[d].opponent_guess(target)?;
        self.engines[a].record_guess(target, &result)?;
        self.players[a].handle_attack_result(target, &result)?;

        self.turns += 1;
        let event = AttackEvent {
            turn: self.turns,
            attacker,
            target,
            result,
        };
        for observer in self.observers.iter_mut() {
            observer.on_attack(&event);
        }

        if event.result != AttackResult::AlreadyAttacked {
            self.turn = attacker.other();
        }
        if self.winner().is_some() {
            log::info!("{} wins after {} turns", self.players[a].name(), self.turns);
        }
        Ok(event)
    }

    /// Play until one fleet is gone. Fails with `TurnLimit` after
    /// `max_turns` attacks without a winner.
    pub fn play_to_end(&mut self, rng: &mut SmallRng, max_turns: usize) -> Result<Side, GameError> {
        loop {
            if let Some(side) = self.winner() {
                return Ok(side);
            }
            if self.turns >= max_turns {
                return Err(GameError::TurnLimit(max_turns));
            }
            self.play_turn(rng)?;
        }
    }

    /// Discard all per-game state. Players keep their identity; call
    /// [`Match::setup`] again before the next round.
    pub fn reset(&mut self) {
        self.engines = [GameEngine::new(), GameEngine::new()];
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.turn = Side::First;
        self.turns = 0;
    }
}
