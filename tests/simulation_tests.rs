#![cfg(feature = "std")]

use broadside::{simulate_duel, simulate_many, Duellist, SkillTier, BOARD_SIZE, TOTAL_SHIP_CELLS};
use rand::{rngs::SmallRng, SeedableRng};

#[test]
fn test_duel_report_is_consistent() {
    let mut rng = SmallRng::seed_from_u64(3);
    let report = simulate_duel(SkillTier::Hard, SkillTier::Easy, &mut rng).unwrap();
    let winner = report.winner.expect("a duel always has a winner");
    let (winner_shots, loser_shots) = match winner {
        Duellist::First => (report.first_shots, report.second_shots),
        Duellist::Second => (report.second_shots, report.first_shots),
    };
    assert!(winner_shots >= TOTAL_SHIP_CELLS);
    assert!(winner_shots <= BOARD_SIZE * BOARD_SIZE);
    // first shoots first, so the loser is at most one shot ahead or behind
    assert!(winner_shots.abs_diff(loser_shots) <= 1);
}

#[test]
fn test_same_seed_same_summary() {
    let a = simulate_many(SkillTier::Medium, SkillTier::Medium, 10, 99).unwrap();
    let b = simulate_many(SkillTier::Medium, SkillTier::Medium, 10, 99).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.first_wins + a.second_wins + a.draws, 10);
    assert_eq!(a.draws, 0);
}

#[test]
fn test_hard_beats_easy() {
    let summary = simulate_many(SkillTier::Hard, SkillTier::Easy, 40, 2024).unwrap();
    assert_eq!(summary.games, 40);
    assert!(
        summary.first_wins > summary.second_wins,
        "hard should dominate easy: {:?}",
        summary
    );
    assert!(summary.avg_shots_to_win >= TOTAL_SHIP_CELLS as f64);
}

#[test]
fn test_summary_serializes() {
    let summary = simulate_many(SkillTier::Hard, SkillTier::Easy, 2, 1).unwrap();
    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["first"], "hard");
    assert_eq!(json["second"], "easy");
    assert_eq!(json["games"], 2);
}
