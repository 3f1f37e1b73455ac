//! Headless computer-vs-computer duels for comparing skill tiers.

use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::ai::{SkillTier, Targeting};
use crate::board::Board;
use crate::common::BoardError;
use crate::placement::place_fleet_randomly;
use crate::ship::Fleet;

/// Which duellist won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum Duellist {
    First,
    Second,
}

/// Result of a single duel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuelReport {
    /// `None` when both sides ran out of cells.
    pub winner: Option<Duellist>,
    pub first_shots: usize,
    pub second_shots: usize,
}

/// Aggregate over many duels.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct SimulationSummary {
    pub first: SkillTier,
    pub second: SkillTier,
    pub games: usize,
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
    /// Mean shots the winner needed, over decided games.
    pub avg_shots_to_win: f64,
}

struct Contender {
    board: Board,
    fleet: Fleet,
    targeting: Targeting,
    shots: usize,
}

impl Contender {
    fn new<R: Rng + ?Sized>(tier: SkillTier, rng: &mut R) -> Result<Self, BoardError> {
        let mut board = Board::new();
        let mut fleet = Fleet::new();
        place_fleet_randomly(&mut board, &mut fleet, rng)?;
        Ok(Contender {
            board,
            fleet,
            targeting: Targeting::new(tier, rng),
            shots: 0,
        })
    }
}

/// Fire one shot from `shooter` at `target`. Returns `Ok(None)` when the
/// shooter is exhausted, otherwise whether the target fleet is destroyed.
fn volley<R: Rng + ?Sized>(
    shooter: &mut Contender,
    target: &mut Contender,
    rng: &mut R,
) -> Result<Option<bool>, BoardError> {
    let Some((row, col)) = shooter.targeting.next_shot(&target.board, rng) else {
        return Ok(None);
    };
    let outcome = target.board.apply_shot(row, col, &mut target.fleet)?;
    shooter.targeting.record_outcome(row, col, outcome)?;
    shooter.shots += 1;
    Ok(Some(target.fleet.is_destroyed()))
}

/// Play one game between two computer players; `first` shoots first.
pub fn simulate_duel<R: Rng + ?Sized>(
    first: SkillTier,
    second: SkillTier,
    rng: &mut R,
) -> Result<DuelReport, BoardError> {
    let mut a = Contender::new(first, rng)?;
    let mut b = Contender::new(second, rng)?;

    let winner = loop {
        let a_fired = match volley(&mut a, &mut b, rng)? {
            Some(true) => break Some(Duellist::First),
            Some(false) => true,
            None => false,
        };
        let b_fired = match volley(&mut b, &mut a, rng)? {
            Some(true) => break Some(Duellist::Second),
            Some(false) => true,
            None => false,
        };
        if !a_fired && !b_fired {
            break None;
        }
    };

    Ok(DuelReport {
        winner,
        first_shots: a.shots,
        second_shots: b.shots,
    })
}

/// Play `games` duels from a fixed seed and aggregate the results.
pub fn simulate_many(
    first: SkillTier,
    second: SkillTier,
    games: usize,
    seed: u64,
) -> Result<SimulationSummary, BoardError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut summary = SimulationSummary {
        first,
        second,
        games,
        first_wins: 0,
        second_wins: 0,
        draws: 0,
        avg_shots_to_win: 0.0,
    };
    let mut winning_shots = 0usize;

    for game in 0..games {
        let report = simulate_duel(first, second, &mut rng)?;
        debug!("duel {}: {:?}", game, report);
        match report.winner {
            Some(Duellist::First) => {
                summary.first_wins += 1;
                winning_shots += report.first_shots;
            }
            Some(Duellist::Second) => {
                summary.second_wins += 1;
                winning_shots += report.second_shots;
            }
            None => summary.draws += 1,
        }
    }

    let decided = summary.first_wins + summary.second_wins;
    if decided > 0 {
        summary.avg_shots_to_win = winning_shots as f64 / decided as f64;
    }
    Ok(summary)
}
