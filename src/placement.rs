//! Randomized, non-overlapping fleet placement.

use log::{debug, warn};
use rand::Rng;

use crate::board::Board;
use crate::common::BoardError;
use crate::config::{BOARD_SIZE, FLEET, MAX_PLACEMENT_ATTEMPTS};
use crate::ship::{Fleet, Orientation, ShipType};

/// Sample origins and orientations until one fits `size` on `board`.
///
/// Orientation is a coin flip and the origin is uniform over the whole grid;
/// samples that would run off the edge are rejected like overlapping ones.
/// Returns `None` after `max_attempts` rejected samples.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    size: usize,
    rng: &mut R,
    max_attempts: usize,
) -> Option<(usize, usize, Orientation)> {
    for _ in 0..max_attempts {
        let orientation = if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        };
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        if board.can_place(row, col, size, orientation) {
            return Some((row, col, orientation));
        }
    }
    None
}

/// Place one ship of type `def` at a random legal position.
pub fn place_ship_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &mut Fleet,
    def: ShipType,
    rng: &mut R,
) -> Result<(), BoardError> {
    let (row, col, orientation) = random_placement(board, def.size(), rng, MAX_PLACEMENT_ATTEMPTS)
        .ok_or_else(|| {
            warn!("no room for {} after {} attempts", def.name(), MAX_PLACEMENT_ATTEMPTS);
            BoardError::PlacementExhausted {
                ship: def.name(),
                attempts: MAX_PLACEMENT_ATTEMPTS,
            }
        })?;
    board.place(fleet, row, col, def.size(), orientation, def.name())?;
    Ok(())
}

/// Place the standard fleet (5, 4, 3, 3, 2) at random on `board`.
///
/// Fails with [`BoardError::PlacementExhausted`] if some ship cannot be
/// placed within the attempt budget. That only happens when the board is
/// already crowded, so callers should treat it as fatal.
pub fn place_fleet_randomly<R: Rng + ?Sized>(
    board: &mut Board,
    fleet: &mut Fleet,
    rng: &mut R,
) -> Result<(), BoardError> {
    for def in FLEET {
        place_ship_randomly(board, fleet, def, rng)?;
    }
    debug!("random fleet placed: {} ships", fleet.len());
    Ok(())
}
