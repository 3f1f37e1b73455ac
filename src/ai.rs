//! Computer targeting: shuffled random search that switches to hunting the
//! orthogonal neighbours of confirmed hits.
//!
//! Two sources feed the shooter. The candidate pool is every cell, shuffled
//! once per game and consumed from the top. The hunt queue is a FIFO of
//! cells next to a hit that has not yet sunk anything; cells move from the
//! pool to the queue when they are enqueued, so no cell sits in both. How
//! strongly the queue is preferred over the pool depends on the
//! [`SkillTier`].
//!
//! When a ship sinks, queued neighbours are not pruned. They usually turn out
//! to be water and cost a few wasted shots.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use log::{debug, warn};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::bitboard::CellSet;
use crate::board::{neighbors, Board};
use crate::common::{BoardError, Coord, ShotOutcome};
use crate::config::BOARD_SIZE;

/// How aggressively the computer follows up on hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum SkillTier {
    /// Pure random search; hits are never followed up.
    Easy,
    /// Takes a hunt target half of the time while one is available.
    Medium,
    /// Always takes a hunt target while one is available.
    Hard,
}

impl SkillTier {
    /// Probability of drawing from the hunt queue instead of the pool.
    pub fn hunt_bias(self) -> f64 {
        match self {
            SkillTier::Easy => 0.0,
            SkillTier::Medium => 0.5,
            SkillTier::Hard => 1.0,
        }
    }
}

impl fmt::Display for SkillTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SkillTier::Easy => "easy",
            SkillTier::Medium => "medium",
            SkillTier::Hard => "hard",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMode {
    /// No live hit to exploit; shots come from the candidate pool.
    Search,
    /// The hunt queue holds neighbours of a hit.
    Hunt,
}

/// Targeting state for one game.
#[derive(Debug, Clone)]
pub struct Targeting {
    tier: SkillTier,
    mode: TargetMode,
    /// Shuffled stack; entries whose bit is cleared in `in_pool` are stale.
    pool: Vec<Coord>,
    in_pool: CellSet,
    hunt_queue: VecDeque<Coord>,
    queued: CellSet,
    fired: CellSet,
}

impl Targeting {
    /// Fresh state: every cell shuffled into the pool, empty hunt queue.
    pub fn new<R: Rng + ?Sized>(tier: SkillTier, rng: &mut R) -> Self {
        let mut targeting = Targeting {
            tier,
            mode: TargetMode::Search,
            pool: Vec::with_capacity(BOARD_SIZE * BOARD_SIZE),
            in_pool: CellSet::new(),
            hunt_queue: VecDeque::new(),
            queued: CellSet::new(),
            fired: CellSet::new(),
        };
        targeting.reset(rng);
        targeting
    }

    /// Forget everything and reshuffle for a new game, keeping the tier.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.clear();
        self.pool
            .extend((0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c))));
        self.pool.shuffle(rng);
        self.in_pool = CellSet::full();
        self.hunt_queue.clear();
        self.queued = CellSet::new();
        self.fired = CellSet::new();
        self.mode = TargetMode::Search;
    }

    pub fn tier(&self) -> SkillTier {
        self.tier
    }

    pub fn mode(&self) -> TargetMode {
        self.mode
    }

    /// Pending hunt targets, front first.
    pub fn hunt_queue(&self) -> impl Iterator<Item = Coord> + '_ {
        self.hunt_queue.iter().copied()
    }

    /// True while (`row`, `col`) is still waiting in the candidate pool.
    pub fn in_pool(&self, row: usize, col: usize) -> bool {
        self.in_pool.contains(row, col)
    }

    /// Number of cells still waiting in the candidate pool.
    pub fn pool_len(&self) -> usize {
        self.in_pool.count_ones()
    }

    /// Pick the next cell to fire at on `board`.
    ///
    /// Returns `None` once neither the pool nor the hunt queue holds a cell
    /// that has not been fired upon, i.e. the board is exhausted.
    pub fn next_shot<R: Rng + ?Sized>(&mut self, board: &Board, rng: &mut R) -> Option<Coord> {
        let prefer_hunt = self.tier != SkillTier::Easy
            && self.mode == TargetMode::Hunt
            && !self.hunt_queue.is_empty()
            && rng.random_bool(self.tier.hunt_bias());

        if prefer_hunt {
            if let Some(cell) = self.pop_hunt(board) {
                debug!("{} ai hunting at {:?}", self.tier, cell);
                return Some(cell);
            }
        }
        if let Some(cell) = self.pop_pool(board) {
            debug!("{} ai searching at {:?}", self.tier, cell);
            return Some(cell);
        }
        // pool is dry; whatever is left in the queue is all that remains
        if let Some(cell) = self.pop_hunt(board) {
            debug!("{} ai hunting at {:?} (pool empty)", self.tier, cell);
            return Some(cell);
        }
        warn!("{} ai has no untried cells left", self.tier);
        None
    }

    /// Feed back the result of firing at (`row`, `col`).
    ///
    /// A plain hit queues its untried neighbours and enters hunt mode. A
    /// sinking shot queues nothing and prunes nothing.
    pub fn record_outcome(
        &mut self,
        row: usize,
        col: usize,
        outcome: ShotOutcome,
    ) -> Result<(), BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return Err(BoardError::InvalidCoordinate { row, col });
        }
        self.fired.set(row, col)?;
        self.in_pool.clear(row, col)?;

        if let ShotOutcome::Hit(_) = outcome {
            if self.tier != SkillTier::Easy {
                for (r, c) in neighbors(row, col) {
                    if self.fired.contains(r, c) || self.queued.contains(r, c) {
                        continue;
                    }
                    self.hunt_queue.push_back((r, c));
                    self.queued.set(r, c)?;
                    self.in_pool.clear(r, c)?;
                }
            }
        }

        let mode = if self.hunt_queue.is_empty() {
            TargetMode::Search
        } else {
            TargetMode::Hunt
        };
        if mode != self.mode {
            debug!("{} ai switching to {:?}", self.tier, mode);
            self.mode = mode;
        }
        Ok(())
    }

    fn untried(&self, board: &Board, (r, c): Coord) -> bool {
        !self.fired.contains(r, c) && !board.is_fired(r, c)
    }

    fn pop_hunt(&mut self, board: &Board) -> Option<Coord> {
        while let Some(cell) = self.hunt_queue.pop_front() {
            let _ = self.queued.clear(cell.0, cell.1);
            if self.untried(board, cell) {
                return Some(cell);
            }
        }
        if self.mode == TargetMode::Hunt {
            debug!("{} ai hunt queue exhausted, back to search", self.tier);
            self.mode = TargetMode::Search;
        }
        None
    }

    fn pop_pool(&mut self, board: &Board) -> Option<Coord> {
        while let Some(cell) = self.pool.pop() {
            if !self.in_pool.contains(cell.0, cell.1) {
                continue;
            }
            let _ = self.in_pool.clear(cell.0, cell.1);
            if self.untried(board, cell) {
                return Some(cell);
            }
        }
        None
    }
}
