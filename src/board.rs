//! Game board: a 10×10 grid of tiles, placement legality and shot resolution.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use log::debug;

use crate::bitboard::CellSet;
use crate::common::{BoardError, Coord, ShipId, ShotOutcome};
use crate::config::BOARD_SIZE;
use crate::ship::{Fleet, Orientation, Ship};

const CELLS: usize = BOARD_SIZE * BOARD_SIZE;

/// State of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tile {
    pub has_ship: bool,
    pub hit: bool,
    pub ship_id: Option<ShipId>,
}

/// Row-major grid of tiles. Ships themselves live in the owning [`Fleet`];
/// tiles only carry the index of the ship covering them.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    tiles: [Tile; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board: no ships, no shots.
    pub fn new() -> Self {
        Board {
            tiles: [Tile::default(); CELLS],
        }
    }

    #[inline]
    fn index(row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            Err(BoardError::InvalidCoordinate { row, col })
        } else {
            Ok(row * BOARD_SIZE + col)
        }
    }

    pub fn tile(&self, row: usize, col: usize) -> Result<&Tile, BoardError> {
        Ok(&self.tiles[Self::index(row, col)?])
    }

    /// True when the cell has been fired upon. Out-of-range cells report `false`.
    pub fn is_fired(&self, row: usize, col: usize) -> bool {
        self.tile(row, col).map(|t| t.hit).unwrap_or(false)
    }

    /// Checks that the `size` cells starting at (`row`, `col`) fit on the board
    /// and are free of ships. Never fails; bad input just yields `false`.
    pub fn can_place(&self, row: usize, col: usize, size: usize, orientation: Orientation) -> bool {
        if size == 0 {
            return false;
        }
        (0..size).all(|i| {
            let (r, c) = orientation.step(row, col, i);
            matches!(self.tile(r, c), Ok(t) if !t.has_ship)
        })
    }

    /// Place a ship of `size` cells and append it to `fleet`.
    ///
    /// The new ship's id is `fleet.len()`. Placements that [`can_place`]
    /// would reject return an error and leave both board and fleet untouched.
    ///
    /// [`can_place`]: Board::can_place
    pub fn place<'f>(
        &mut self,
        fleet: &'f mut Fleet,
        row: usize,
        col: usize,
        size: usize,
        orientation: Orientation,
        name: &str,
    ) -> Result<&'f Ship, BoardError> {
        Self::index(row, col)?;
        if !self.can_place(row, col, size, orientation) {
            let (end_r, end_c) = orientation.step(row, col, size.saturating_sub(1));
            if size == 0 || end_r >= BOARD_SIZE || end_c >= BOARD_SIZE {
                return Err(BoardError::ShipOutOfBounds);
            }
            return Err(BoardError::ShipOverlaps);
        }

        let id = fleet.len();
        let cells: Vec<Coord> = (0..size).map(|i| orientation.step(row, col, i)).collect();
        for &(r, c) in &cells {
            let tile = &mut self.tiles[r * BOARD_SIZE + c];
            tile.has_ship = true;
            tile.ship_id = Some(id);
        }
        debug!("placed {} (id {}) at {:?} {:?}", name, id, (row, col), orientation);
        Ok(fleet.push(String::from(name), cells))
    }

    /// Fire at (`row`, `col`), updating the tile and the struck ship in `fleet`.
    ///
    /// Repeated shots at the same cell return [`ShotOutcome::AlreadyHit`] and
    /// change nothing. A tile whose ship is missing from `fleet` fails with
    /// [`BoardError::UnknownShip`] before anything is marked.
    pub fn apply_shot(
        &mut self,
        row: usize,
        col: usize,
        fleet: &mut Fleet,
    ) -> Result<ShotOutcome, BoardError> {
        let idx = Self::index(row, col)?;
        let tile = self.tiles[idx];
        if tile.hit {
            return Ok(ShotOutcome::AlreadyHit);
        }

        // placement sets `has_ship` and `ship_id` together
        let outcome = match tile.ship_id {
            None => ShotOutcome::Miss,
            Some(id) => {
                let ship = fleet.get_mut(id).ok_or(BoardError::UnknownShip(id))?;
                if ship.register_hit() {
                    ShotOutcome::Sunk(id)
                } else {
                    ShotOutcome::Hit(id)
                }
            }
        };
        self.tiles[idx].hit = true;
        debug!("shot at {:?}: {:?}", (row, col), outcome);
        Ok(outcome)
    }

    /// Every cell that has been fired upon.
    pub fn fired(&self) -> CellSet {
        self.collect(|t| t.hit)
    }

    /// Every cell covered by a ship.
    pub fn ship_cells(&self) -> CellSet {
        self.collect(|t| t.has_ship)
    }

    fn collect(&self, pred: impl Fn(&Tile) -> bool) -> CellSet {
        let mut set = CellSet::new();
        for (idx, tile) in self.tiles.iter().enumerate() {
            if pred(tile) {
                // idx < CELLS, so the cell is always in range
                let _ = set.set(idx / BOARD_SIZE, idx % BOARD_SIZE);
            }
        }
        set
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for r in 0..BOARD_SIZE {
            write!(f, "  ")?;
            for c in 0..BOARD_SIZE {
                let t = self.tiles[r * BOARD_SIZE + c];
                let ch = match (t.has_ship, t.hit) {
                    (true, true) => 'X',
                    (false, true) => 'o',
                    (true, false) => 'S',
                    (false, false) => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

/// In-bounds orthogonal neighbours of (`row`, `col`), checked in the order
/// up, down, left, right.
pub fn neighbors(row: usize, col: usize) -> impl Iterator<Item = Coord> {
    const DIRS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    DIRS.into_iter().filter_map(move |(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < BOARD_SIZE && c < BOARD_SIZE).then_some((r, c))
    })
}
