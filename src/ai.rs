//! Hunt-and-sink targeting for the automated attacker.
//!
//! The engine fires at random until a ship is struck, probes the four
//! neighbours of that hit (right, left, down, up), then walks the line it
//! found until the ship ends, switching to the opposite side of the first hit
//! when needed. Hits on ships that are not sunk yet are remembered so the
//! hunt can resume from them after a sink.

use alloc::vec::Vec;
use rand::Rng;

use crate::common::{AttackResult, Coordinate, TargetingError};
use crate::pool::MovePool;

/// Compass direction of an [`Offset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Left,
    Down,
    Up,
}

/// A `(d_row, d_col)` step and its 180° complement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Offset {
    pub direction: Direction,
    pub delta: (i8, i8),
    pub opposite: (i8, i8),
}

/// Probe order around a hit. Deterministic tests depend on it.
pub const OFFSETS: [Offset; 4] = [
    Offset {
        direction: Direction::Right,
        delta: (0, 1),
        opposite: (0, -1),
    },
    Offset {
        direction: Direction::Left,
        delta: (0, -1),
        opposite: (0, 1),
    },
    Offset {
        direction: Direction::Down,
        delta: (1, 0),
        opposite: (-1, 0),
    },
    Offset {
        direction: Direction::Up,
        delta: (-1, 0),
        opposite: (1, 0),
    },
];

/// Offsets not yet probed around a legacy move, drawn in [`OFFSETS`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetQueue {
    next: usize,
}

impl OffsetQueue {
    pub fn full() -> Self {
        Self { next: 0 }
    }

    pub fn pop(&mut self) -> Option<Offset> {
        let offset = OFFSETS.get(self.next).copied()?;
        self.next += 1;
        Some(offset)
    }

    pub fn remaining(&self) -> &'static [Offset] {
        &OFFSETS[self.next.min(OFFSETS.len())..]
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }
}

/// Current search mode, with the data each mode works from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Draw uniformly from the move pool.
    Random,
    /// Probe the neighbours of `legacy` one offset at a time.
    SearchBody {
        legacy: Coordinate,
        queue: OffsetQueue,
        current: Option<Offset>,
    },
    /// Keep walking `offset` from the previous move.
    SinkShip { legacy: Coordinate, offset: Offset },
    /// Jump back to `legacy` and take one step the opposite way.
    SinkShipOppositeTransition { legacy: Coordinate, offset: Offset },
    /// Keep walking the opposite way from the previous move.
    SinkShipOpposite { legacy: Coordinate, offset: Offset },
}

/// Payload-free tag of a [`Strategy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Random,
    SearchBody,
    SinkShip,
    SinkShipOppositeTransition,
    SinkShipOpposite,
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::Random => StrategyKind::Random,
            Strategy::SearchBody { .. } => StrategyKind::SearchBody,
            Strategy::SinkShip { .. } => StrategyKind::SinkShip,
            Strategy::SinkShipOppositeTransition { .. } => StrategyKind::SinkShipOppositeTransition,
            Strategy::SinkShipOpposite { .. } => StrategyKind::SinkShipOpposite,
        }
    }

    /// The hit currently being expanded from.
    pub fn legacy_move(&self) -> Option<Coordinate> {
        match *self {
            Strategy::Random => None,
            Strategy::SearchBody { legacy, .. }
            | Strategy::SinkShip { legacy, .. }
            | Strategy::SinkShipOppositeTransition { legacy, .. }
            | Strategy::SinkShipOpposite { legacy, .. } => Some(legacy),
        }
    }

    /// The offset being walked or most recently probed.
    pub fn current_offset(&self) -> Option<Offset> {
        match *self {
            Strategy::Random => None,
            Strategy::SearchBody { current, .. } => current,
            Strategy::SinkShip { offset, .. }
            | Strategy::SinkShipOppositeTransition { offset, .. }
            | Strategy::SinkShipOpposite { offset, .. } => Some(offset),
        }
    }
}

/// Result of the previous move as seen by the attacker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    /// The cell was struck but held no ship.
    Miss,
    /// A ship was struck and is still afloat.
    ShipHit,
    /// A ship sank; carries every coordinate it occupied.
    ShipSunk(Vec<Coordinate>),
}

impl From<&AttackResult> for Feedback {
    fn from(result: &AttackResult) -> Self {
        match result {
            AttackResult::Miss | AttackResult::AlreadyAttacked => Feedback::Miss,
            AttackResult::Hit => Feedback::ShipHit,
            AttackResult::Sunk { coordinates, .. } => Feedback::ShipSunk(coordinates.clone()),
        }
    }
}

/// Per-game targeting state for one automated player.
#[derive(Debug, Clone)]
pub struct TargetingEngine {
    pool: MovePool,
    strategy: Strategy,
    previous_move: Option<Coordinate>,
    pending: Vec<Coordinate>,
}

impl TargetingEngine {
    pub fn new() -> Self {
        Self {
            pool: MovePool::new(),
            strategy: Strategy::Random,
            previous_move: None,
            pending: Vec::new(),
        }
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn previous_move(&self) -> Option<Coordinate> {
        self.previous_move
    }

    pub fn legacy_move(&self) -> Option<Coordinate> {
        self.strategy.legacy_move()
    }

    pub fn current_offset(&self) -> Option<Offset> {
        self.strategy.current_offset()
    }

    /// Offsets still queued while searching around the legacy move.
    pub fn remaining_offsets(&self) -> &'static [Offset] {
        match self.strategy {
            Strategy::SearchBody { queue, .. } => queue.remaining(),
            _ => &[],
        }
    }

    /// Hits on ships not yet sunk, oldest first.
    pub fn pending_hits(&self) -> &[Coordinate] {
        &self.pending
    }

    pub fn pool(&self) -> &MovePool {
        &self.pool
    }

    /// Commit to a coordinate chosen outside the engine. It is taken from the
    /// pool and becomes the previous move.
    pub fn commit_move(&mut self, at: Coordinate) -> Result<Coordinate, TargetingError> {
        if !self.pool.consume(at) {
            return Err(TargetingError::InvalidState("committed move was already tried"));
        }
        self.previous_move = Some(at);
        Ok(at)
    }

    /// Pick the next coordinate to attack and remove it from the pool.
    pub fn determine_next_move<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
    ) -> Result<Coordinate, TargetingError> {
        if self.strategy != Strategy::Random && self.pending.is_empty() {
            return Err(TargetingError::InvalidState(
                "hunting a ship without any pending hit",
            ));
        }

        let next = match self.strategy {
            Strategy::Random => self.pool.draw_random(rng)?,
            Strategy::SearchBody { legacy, queue, .. } => match self.probe(legacy, queue) {
                Some(at) => at,
                None => self.resume_search(Some(legacy))?,
            },
            Strategy::SinkShip { offset, .. } => {
                let target = self.require_previous()?.step(offset.delta);
                self.follow(target)?
            }
            Strategy::SinkShipOppositeTransition { legacy, offset } => {
                self.follow(legacy.step(offset.opposite))?
            }
            Strategy::SinkShipOpposite { offset, .. } => {
                let target = self.require_previous()?.step(offset.opposite);
                self.follow(target)?
            }
        };

        log::trace!("{:?} fires at {}", self.kind(), next);
        self.previous_move = Some(next);
        Ok(next)
    }

    /// Advance the state machine with the result of the previous move.
    pub fn feedback(&mut self, feedback: Feedback) -> Result<(), TargetingError> {
        match feedback {
            Feedback::ShipHit => {
                let previous = self.require_previous()?;
                let next = match self.strategy {
                    Strategy::Random => Strategy::SearchBody {
                        legacy: previous,
                        queue: OffsetQueue::full(),
                        current: None,
                    },
                    Strategy::SearchBody {
                        legacy,
                        current: Some(offset),
                        ..
                    } => Strategy::SinkShip { legacy, offset },
                    Strategy::SearchBody { current: None, .. } => {
                        return Err(TargetingError::InvalidState(
                            "ship hit reported before probing around the legacy move",
                        ))
                    }
                    Strategy::SinkShipOppositeTransition { legacy, offset } => {
                        Strategy::SinkShipOpposite { legacy, offset }
                    }
                    same @ (Strategy::SinkShip { .. } | Strategy::SinkShipOpposite { .. }) => same,
                };
                self.pending.push(previous);
                self.transition(next);
            }
            Feedback::Miss => match self.strategy {
                Strategy::SinkShip { legacy, offset } => {
                    self.transition(Strategy::SinkShipOppositeTransition { legacy, offset })
                }
                Strategy::SinkShipOppositeTransition { .. } | Strategy::SinkShipOpposite { .. } => {
                    self.resume_pending()?
                }
                Strategy::Random | Strategy::SearchBody { .. } => {}
            },
            Feedback::ShipSunk(coordinates) => {
                self.pending.retain(|hit| !coordinates.contains(hit));
                if self.pending.is_empty() {
                    self.transition(Strategy::Random);
                } else {
                    self.resume_pending()?;
                }
            }
        }
        Ok(())
    }

    fn require_previous(&self) -> Result<Coordinate, TargetingError> {
        self.previous_move
            .ok_or(TargetingError::InvalidState("no previous move recorded"))
    }

    fn transition(&mut self, next: Strategy) {
        if next.kind() != self.strategy.kind() {
            log::debug!("strategy {:?} -> {:?}", self.strategy.kind(), next.kind());
        }
        self.strategy = next;
    }

    /// Restart the search from the oldest unresolved hit.
    fn resume_pending(&mut self) -> Result<(), TargetingError> {
        let legacy = *self
            .pending
            .first()
            .ok_or(TargetingError::InvalidState("no pending hit to resume from"))?;
        self.transition(Strategy::SearchBody {
            legacy,
            queue: OffsetQueue::full(),
            current: None,
        });
        Ok(())
    }

    /// Take `target` if it is still in the pool, otherwise fall back to
    /// searching around the pending hits.
    fn follow(&mut self, target: Option<Coordinate>) -> Result<Coordinate, TargetingError> {
        if let Some(at) = target {
            if self.pool.consume(at) {
                return Ok(at);
            }
        }
        log::debug!("{:?} ran off the ship, resuming from pending hits", self.kind());
        self.resume_search(None)
    }

    /// Pop offsets until one lands on an untried cell.
    fn probe(&mut self, legacy: Coordinate, mut queue: OffsetQueue) -> Option<Coordinate> {
        while let Some(offset) = queue.pop() {
            self.strategy = Strategy::SearchBody {
                legacy,
                queue,
                current: Some(offset),
            };
            if let Some(at) = legacy.step(offset.delta) {
                if self.pool.consume(at) {
                    return Some(at);
                }
            }
        }
        None
    }

    /// Search around each pending hit in turn, starting after `exhausted`
    /// (or from the oldest when `None`), until one has an untried neighbour.
    fn resume_search(&mut self, exhausted: Option<Coordinate>) -> Result<Coordinate, TargetingError> {
        let len = self.pending.len();
        if len == 0 {
            return Err(TargetingError::InvalidState("no pending hit to resume from"));
        }
        let start = exhausted
            .and_then(|e| self.pending.iter().position(|hit| *hit == e))
            .map_or(0, |i| i + 1);

        for k in 0..len {
            let legacy = self.pending[(start + k) % len];
            if Some(legacy) == exhausted {
                continue;
            }
            self.transition(Strategy::SearchBody {
                legacy,
                queue: OffsetQueue::full(),
                current: None,
            });
            if let Some(at) = self.probe(legacy, OffsetQueue::full()) {
                return Ok(at);
            }
        }
        log::warn!("every pending hit has been searched: {:?}", self.pending);
        Err(TargetingError::InvalidState(
            "every pending hit has been fully searched",
        ))
    }
}

impl Default for TargetingEngine {
    fn default() -> Self {
        Self::new()
    }
}
