//! Ship definitions and the per-player fleet registry.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, ShipId};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Cell `offset` steps from `(row, col)` along this orientation.
    #[inline]
    pub fn step(self, row: usize, col: usize, offset: usize) -> Coord {
        match self {
            Orientation::Horizontal => (row, col.saturating_add(offset)),
            Orientation::Vertical => (row.saturating_add(offset), col),
        }
    }
}

/// Type of ship: name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipType {
    name: &'static str,
    size: usize,
}

impl ShipType {
    pub const fn new(name: &'static str, size: usize) -> Self {
        Self { name, size }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

/// A ship placed on a board.
///
/// `id` is the ship's index in its [`Fleet`]. `hits` only grows and `sunk`
/// flips to true exactly once, when `hits` reaches `size`.
#[derive(Clone, PartialEq, Eq)]
pub struct Ship {
    id: ShipId,
    size: usize,
    name: String,
    hits: usize,
    sunk: bool,
    cells: Vec<Coord>,
}

impl Ship {
    pub(crate) fn new(id: ShipId, name: String, cells: Vec<Coord>) -> Self {
        Ship {
            id,
            size: cells.len(),
            name,
            hits: 0,
            sunk: false,
            cells,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn is_sunk(&self) -> bool {
        self.sunk
    }

    /// Occupied cells in placement order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Register one more hit. Returns `true` when this hit sank the ship.
    /// A ship that is already sunk is left untouched.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.sunk {
            return false;
        }
        self.hits += 1;
        if self.hits >= self.size {
            self.sunk = true;
        }
        self.sunk
    }
}

impl fmt::Debug for Ship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ship {{ id: {}, name: \"{}\", size: {}, hits: {}, sunk: {}, cells: {:?} }}",
            self.id, self.name, self.size, self.hits, self.sunk, self.cells,
        )
    }
}

/// One player's ships in placement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fleet {
    ships: Vec<Ship>,
}

impl Fleet {
    pub fn new() -> Self {
        Self { ships: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.ships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ship> {
        self.ships.iter()
    }

    /// Append a ship, assigning it the next id. Returns the stored ship.
    pub(crate) fn push(&mut self, name: String, cells: Vec<Coord>) -> &Ship {
        let id = self.ships.len();
        self.ships.push(Ship::new(id, name, cells));
        &self.ships[id]
    }

    /// True when every ship is sunk. An empty fleet counts as destroyed.
    pub fn is_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Number of ships still afloat.
    pub fn ships_left(&self) -> usize {
        self.ships.iter().filter(|s| !s.is_sunk()).count()
    }
}
