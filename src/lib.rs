#![cfg_attr(not(feature = "std"), no_std)]

//! Human-vs-computer naval combat on a 10×10 grid.
//!
//! The engine ([`Board`], [`Fleet`], [`Targeting`], [`GameSession`]) only
//! needs `alloc`. The `std` feature adds the terminal front end, logging and
//! the binaries.

extern crate alloc;

mod ai;
mod bitboard;
mod board;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
mod ship;
pub mod simulation;

pub use ai::*;
pub use bitboard::{BitBoard, BitBoardError, CellSet};
pub use board::*;
pub use common::*;
pub use config::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use placement::{place_fleet_randomly, random_placement};
pub use ship::*;
pub use simulation::{simulate_duel, simulate_many, DuelReport, Duellist, SimulationSummary};
