#![cfg(feature = "std")]

use std::time::Duration;

use broadside::cli::{
    coord_to_string, parse_coord, parse_placement, play, render_board, render_view, PlayOptions,
};
use broadside::{
    parse_level, Board, Fleet, GamePhase, GameSession, Orientation, Side, SkillTier, BOARD_SIZE,
};
use log::LevelFilter;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn quick_options(auto_place: bool) -> PlayOptions {
    PlayOptions {
        ai_delay: Duration::ZERO,
        auto_place,
    }
}

#[test]
fn test_parse_coord() {
    assert_eq!(parse_coord("A1"), Ok((0, 0)));
    assert_eq!(parse_coord("j10"), Ok((9, 9)));
    assert_eq!(parse_coord("  c4 "), Ok((3, 2)));
    for bad in ["", "A", "K1", "A0", "A11", "1A", "AB", "B-1"] {
        assert!(parse_coord(bad).is_err(), "{:?} should be rejected", bad);
    }
}

#[test]
fn test_coord_labels_match_parser() {
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            assert_eq!(parse_coord(&coord_to_string(r, c)), Ok((r, c)));
        }
    }
    assert_eq!(coord_to_string(9, 0), "A10");
}

#[test]
fn test_parse_placement() {
    assert_eq!(parse_placement("A5 H"), Ok(((4, 0), Orientation::Horizontal)));
    assert_eq!(parse_placement("c3 v"), Ok(((2, 2), Orientation::Vertical)));
    assert_eq!(parse_placement("B2"), Ok(((1, 1), Orientation::Horizontal)));
    assert!(parse_placement("B2 X").is_err());
    assert!(parse_placement("B2 H extra").is_err());
    assert!(parse_placement("").is_err());
}

#[test]
fn test_render_board_hides_ships_unless_revealed() {
    let mut board = Board::new();
    let mut fleet = Fleet::new();
    board
        .place(&mut fleet, 0, 0, 2, Orientation::Horizontal, "Destroyer")
        .unwrap();
    board.apply_shot(0, 0, &mut fleet).unwrap();
    board.apply_shot(5, 5, &mut fleet).unwrap();

    let hidden = render_board(&board, false);
    let revealed = render_board(&board, true);
    assert!(hidden.starts_with("     A B C D E F G H I J\n"));
    assert!(hidden.contains("   1 X . ."));
    assert!(revealed.contains("   1 X S ."));
    assert!(hidden.contains("   6 . . . . . o"));
    assert!(!hidden.contains('S'));
}

#[test]
fn test_view_shows_both_fleets() {
    let mut rng = SmallRng::seed_from_u64(5);
    let mut session = GameSession::new(SkillTier::Medium, &mut rng).unwrap();
    session.place_remaining_randomly(&mut rng).unwrap();
    session.start().unwrap();

    let view = render_view(&session);
    // five ships per side, all afloat
    assert_eq!(view.matches("afloat").count(), 10);
    let enemy = view.find("Enemy waters").unwrap();
    let ours = view.find("Your fleet").unwrap();
    assert!(view[enemy..ours].contains("Carrier"));
    assert!(view[ours..].contains("Carrier"));
}

#[test]
fn test_parse_level() {
    assert_eq!(parse_level(None), LevelFilter::Warn);
    assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
    assert_eq!(parse_level(Some("INFO")), LevelFilter::Info);
    assert_eq!(parse_level(Some("nonsense")), LevelFilter::Warn);
}

#[tokio::test]
async fn test_quit_during_placement() {
    let mut rng = SmallRng::seed_from_u64(1);
    let mut session = GameSession::new(SkillTier::Easy, &mut rng).unwrap();
    let mut out = Vec::new();
    let input: &[u8] = b"A1 H\nquit\n";

    let result = play(&mut session, input, &mut out, &mut rng, &quick_options(false))
        .await
        .unwrap();
    assert_eq!(result, None);
    assert_eq!(session.phase(), GamePhase::Placement);
    assert_eq!(session.fleet(Side::Human).len(), 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Carrier placed at A1"));
}

#[tokio::test]
async fn test_bad_placement_is_reported() {
    let mut rng = SmallRng::seed_from_u64(2);
    let mut session = GameSession::new(SkillTier::Easy, &mut rng).unwrap();
    let mut out = Vec::new();
    let input: &[u8] = b"H1 H\nZ9\n";

    let result = play(&mut session, input, &mut out, &mut rng, &quick_options(false))
        .await
        .unwrap();
    assert_eq!(result, None);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Cannot place ship there"));
    assert!(text.contains("Column 'Z' out of bounds"));
    assert!(session.fleet(Side::Human).is_empty());
}

#[tokio::test]
async fn test_full_scripted_game() {
    let mut rng = SmallRng::seed_from_u64(3);
    let mut session = GameSession::new(SkillTier::Hard, &mut rng).unwrap();
    let mut out = Vec::new();

    // sweep the whole grid, then decline a rematch
    let mut script = String::from("auto\n");
    for r in 0..BOARD_SIZE {
        for c in 0..BOARD_SIZE {
            script.push_str(&coord_to_string(r, c));
            script.push('\n');
        }
    }
    script.push_str("n\n");

    let result = play(
        &mut session,
        script.as_bytes(),
        &mut out,
        &mut rng,
        &quick_options(false),
    )
    .await
    .unwrap();

    assert!(result.is_some());
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.result(), result);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Enemy is firing..."));
    assert!(text.contains("You win!") || text.contains("You lose!"));
}

#[tokio::test]
async fn test_auto_place_then_quit() {
    let mut rng = SmallRng::seed_from_u64(4);
    let mut session = GameSession::new(SkillTier::Medium, &mut rng).unwrap();
    let mut out = Vec::new();
    let input: &[u8] = b"Bx\nq\n";

    let result = play(&mut session, input, &mut out, &mut rng, &quick_options(true))
        .await
        .unwrap();
    assert_eq!(result, None);
    assert_eq!(session.phase(), GamePhase::InProgress);
    assert_eq!(session.shots(Side::Human), 0);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Invalid row"));
}
