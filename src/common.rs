//! Common types: coordinates, shot outcomes and engine errors.

use core::fmt;

use crate::bitboard::BitBoardError;

/// `(row, col)` position on the board, zero-based.
pub type Coord = (usize, usize);

/// Index of a ship within its fleet.
pub type ShipId = usize;

/// Result of firing at a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The cell had already been fired upon; nothing changed.
    AlreadyHit,
    /// Open water.
    Miss,
    /// Struck a ship that is still afloat.
    Hit(ShipId),
    /// Struck the last intact segment of a ship.
    Sunk(ShipId),
}

impl ShotOutcome {
    pub fn already_hit(&self) -> bool {
        matches!(self, ShotOutcome::AlreadyHit)
    }

    /// True for any shot that struck a ship, including the sinking one.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit(_) | ShotOutcome::Sunk(_))
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, ShotOutcome::Sunk(_))
    }

    /// Ship struck by this shot, if any.
    pub fn ship(&self) -> Option<ShipId> {
        match self {
            ShotOutcome::Hit(id) | ShotOutcome::Sunk(id) => Some(*id),
            ShotOutcome::AlreadyHit | ShotOutcome::Miss => None,
        }
    }
}

/// Errors returned by board and placement operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
    /// Row or column outside the board.
    InvalidCoordinate { row: usize, col: usize },
    /// Ship would extend past the board edge.
    ShipOutOfBounds,
    /// Ship would cover a cell that already holds a ship.
    ShipOverlaps,
    /// A tile references a ship id the fleet does not contain.
    UnknownShip(ShipId),
    /// Random placement found no legal position within the attempt budget.
    PlacementExhausted { ship: &'static str, attempts: usize },
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoard(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            BoardError::InvalidCoordinate { row, col } => {
                write!(f, "Coordinate ({}, {}) is outside the board", row, col)
            }
            BoardError::ShipOutOfBounds => write!(f, "Ship placement is out of bounds"),
            BoardError::ShipOverlaps => write!(f, "Ship placement overlaps with another ship"),
            BoardError::UnknownShip(id) => write!(f, "Tile references unknown ship {}", id),
            BoardError::PlacementExhausted { ship, attempts } => write!(
                f,
                "Could not place ship {} after {} attempts",
                ship, attempts
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for BoardError {}

/// Errors returned by [`GameSession`](crate::GameSession) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Operation is not allowed in the current phase.
    WrongPhase,
    /// The other side is to move.
    NotYourTurn,
    /// The game cannot start until every ship is placed.
    FleetIncomplete,
    /// Every ship has already been placed.
    FleetComplete,
    /// The computer picked a cell it had already fired upon.
    RepeatedShot { row: usize, col: usize },
    Board(BoardError),
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase => write!(f, "Operation not allowed in the current phase"),
            GameError::NotYourTurn => write!(f, "It is not this side's turn"),
            GameError::FleetIncomplete => write!(f, "Place all ships before starting"),
            GameError::FleetComplete => write!(f, "All ships are already placed"),
            GameError::RepeatedShot { row, col } => {
                write!(f, "Computer fired twice at ({}, {})", row, col)
            }
            GameError::Board(e) => write!(f, "{}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
