#![cfg(feature = "std")]

//! Terminal front end: coordinate parsing, board rendering and the
//! interactive game loop.

use std::fmt::Write as _;
use std::io::Write;
use std::time::Duration;

use rand::Rng;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    board::Board,
    common::{Coord, GameError, ShotOutcome},
    config::{BOARD_SIZE, DEFAULT_AI_DELAY_MS, FLEET},
    game::{GamePhase, GameResult, GameSession, ShotReport, Side},
    ship::{Fleet, Orientation},
};

/// Knobs for [`play`].
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// Pause before each computer shot.
    pub ai_delay: Duration,
    /// Skip manual placement and position the human fleet at random.
    pub auto_place: bool,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            ai_delay: Duration::from_millis(DEFAULT_AI_DELAY_MS),
            auto_place: false,
        }
    }
}

/// `(row, col)` to the `A1`-style label shown to players.
pub fn coord_to_string(r: usize, c: usize) -> String {
    let col = (b'A' + c as u8) as char;
    format!("{}{}", col, r + 1)
}

/// Parse an `A1`..`J10` label into `(row, col)`.
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars
        .next()
        .ok_or("No column letter")?
        .to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8 - b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok((row - 1, col))
}

/// Parse a placement such as `A5 H` or `c3 v`. Orientation defaults to
/// horizontal when omitted.
pub fn parse_placement(input: &str) -> Result<(Coord, Orientation), String> {
    let mut parts = input.split_whitespace();
    let coord = parse_coord(parts.next().ok_or("Empty input")?)?;
    let orientation = match parts.next().map(|s| s.to_ascii_uppercase()) {
        None => Orientation::Horizontal,
        Some(o) if o == "H" => Orientation::Horizontal,
        Some(o) if o == "V" => Orientation::Vertical,
        Some(o) => return Err(format!("Invalid orientation '{}' - use H or V", o)),
    };
    if parts.next().is_some() {
        return Err("Too many fields - expected e.g. A5 H".to_string());
    }
    Ok((coord, orientation))
}

/// Draw a board. With `reveal` unhit ships are shown; otherwise only shots.
pub fn render_board(board: &Board, reveal: bool) -> String {
    let mut s = String::new();
    s.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(s, " {}", (b'A' + c as u8) as char);
    }
    s.push('\n');
    for r in 0..BOARD_SIZE {
        let _ = write!(s, "  {:2}", r + 1);
        for c in 0..BOARD_SIZE {
            let ch = match board.tile(r, c) {
                Ok(t) if t.hit && t.has_ship => 'X',
                Ok(t) if t.hit => 'o',
                Ok(t) if reveal && t.has_ship => 'S',
                _ => '.',
            };
            let _ = write!(s, " {}", ch);
        }
        s.push('\n');
    }
    if reveal {
        s.push_str("    Legend: S=Ship  X=Hit  o=Miss  .=Water\n");
    } else {
        s.push_str("    Legend: X=Hit  o=Miss  .=Unknown\n");
    }
    s
}

/// One line per ship: name, damage bar and status.
pub fn render_fleet(fleet: &Fleet) -> String {
    let mut s = String::new();
    for ship in fleet.iter() {
        let bar: String = (0..ship.size())
            .map(|i| if i < ship.hits() { 'x' } else { '=' })
            .collect();
        let status = if ship.is_sunk() { "SUNK" } else { "afloat" };
        let _ = writeln!(s, "      {:<10} [{}] {}", ship.name(), bar, status);
    }
    s
}

/// Both boards with shot counters and fleet status.
pub fn render_view(session: &GameSession) -> String {
    let mut s = String::new();
    let _ = writeln!(
        s,
        "Enemy waters  (shots: {}, enemy ships left: {})",
        session.shots(Side::Human),
        session.ships_left(Side::Computer)
    );
    s.push_str(&render_board(session.board(Side::Computer), false));
    s.push_str(&render_fleet(session.fleet(Side::Computer)));
    let _ = writeln!(
        s,
        "\nYour fleet  (enemy shots: {}, ships left: {})",
        session.shots(Side::Computer),
        session.ships_left(Side::Human)
    );
    s.push_str(&render_board(session.board(Side::Human), true));
    s.push_str(&render_fleet(session.fleet(Side::Human)));
    s
}

fn describe_shot(session: &GameSession, report: &ShotReport) -> String {
    let label = coord_to_string(report.target.0, report.target.1);
    let target_fleet = session.fleet(report.shooter.opponent());
    let ship_name = |id| target_fleet.get(id).map(|s| s.name()).unwrap_or("ship");
    match (report.shooter, report.outcome) {
        (_, ShotOutcome::AlreadyHit) => format!("{} was already fired upon.", label),
        (Side::Human, ShotOutcome::Miss) => format!("{}: miss.", label),
        (Side::Human, ShotOutcome::Hit(_)) => format!("{}: hit!", label),
        (Side::Human, ShotOutcome::Sunk(id)) => {
            format!("{}: you sunk the enemy {}!", label, ship_name(id))
        }
        (Side::Computer, ShotOutcome::Miss) => format!("Enemy fires at {}: miss.", label),
        (Side::Computer, ShotOutcome::Hit(_)) => format!("Enemy fires at {}: hit!", label),
        (Side::Computer, ShotOutcome::Sunk(id)) => {
            format!("Enemy fires at {}: the enemy sunk your {}!", label, ship_name(id))
        }
    }
}

fn describe_result(result: GameResult) -> &'static str {
    match result {
        GameResult::Winner(Side::Human) => "You win! All enemy ships have been sunk.",
        GameResult::Winner(Side::Computer) => "You lose! All your ships have been sunk.",
        GameResult::Draw => "Draw! No more positions to fire.",
    }
}

fn print_help<W: Write>(out: &mut W) -> anyhow::Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  A5 H / A5 V   place the current ship (placement phase)")?;
    writeln!(out, "  ENTER         place the current ship at random")?;
    writeln!(out, "  auto          place all remaining ships at random")?;
    writeln!(out, "  B7            fire at a cell (battle phase)")?;
    writeln!(out, "  quit          leave the game")?;
    Ok(())
}

/// Print `text`, then read one trimmed line. `None` means EOF or `quit`.
async fn prompt<I, W>(lines: &mut Lines<I>, out: &mut W, text: &str) -> anyhow::Result<Option<String>>
where
    I: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", text)?;
    out.flush()?;
    let Some(line) = lines.next_line().await? else {
        return Ok(None);
    };
    let line = line.trim().to_string();
    if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("q") {
        return Ok(None);
    }
    Ok(Some(line))
}

/// Returns `false` if the player quit during placement.
async fn placement_phase<I, W, R>(
    session: &mut GameSession,
    lines: &mut Lines<I>,
    out: &mut W,
    rng: &mut R,
    options: &PlayOptions,
) -> anyhow::Result<bool>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    R: Rng + ?Sized,
{
    if options.auto_place {
        session.place_remaining_randomly(rng)?;
    }
    while let Some(def) = session.next_ship_to_place() {
        write!(out, "\n{}", render_board(session.board(Side::Human), true))?;
        let text = format!(
            "Ship {}/{}: {} (length {}). Placement (e.g. A5 H, ENTER for random): ",
            session.fleet(Side::Human).len() + 1,
            FLEET.len(),
            def.name(),
            def.size()
        );
        let Some(line) = prompt(lines, out, &text).await? else {
            return Ok(false);
        };
        if line.is_empty() {
            let ship = session.place_next_randomly(rng)?;
            let (r, c) = ship.cells()[0];
            writeln!(out, "{} randomly placed at {}", def.name(), coord_to_string(r, c))?;
            continue;
        }
        if line.eq_ignore_ascii_case("auto") {
            session.place_remaining_randomly(rng)?;
            continue;
        }
        if line.eq_ignore_ascii_case("help") {
            print_help(out)?;
            continue;
        }
        match parse_placement(&line) {
            Ok(((r, c), orientation)) => match session.place_ship(r, c, orientation) {
                Ok(_) => writeln!(out, "{} placed at {}", def.name(), coord_to_string(r, c))?,
                Err(GameError::Board(e)) => {
                    writeln!(out, "Cannot place ship there ({}). Try another spot.", e)?
                }
                Err(e) => return Err(e.into()),
            },
            Err(msg) => writeln!(out, "{}", msg)?,
        }
    }
    session.start()?;
    Ok(true)
}

/// Run one game after another on `input`/`out` until the player quits.
///
/// The computer's shot is delayed by `options.ai_delay`; input is read
/// asynchronously so the wait never blocks the reader. Returns the result of
/// the last finished game, if any.
pub async fn play<I, W, R>(
    session: &mut GameSession,
    input: I,
    out: &mut W,
    rng: &mut R,
    options: &PlayOptions,
) -> anyhow::Result<Option<GameResult>>
where
    I: AsyncBufRead + Unpin,
    W: Write,
    R: Rng + ?Sized,
{
    let mut lines = input.lines();
    let mut last_result = None;

    loop {
        match session.phase() {
            GamePhase::Placement => {
                writeln!(out, "Difficulty: {}. Place your ships.", session.tier())?;
                if !placement_phase(session, &mut lines, out, rng, options).await? {
                    return Ok(last_result);
                }
                writeln!(out, "\nAll ships placed. Your turn: fire on enemy waters.")?;
            }
            GamePhase::InProgress if session.turn() == Side::Human => {
                write!(out, "\n{}", render_view(session))?;
                let Some(line) = prompt(&mut lines, out, "Fire at (e.g. B7): ").await? else {
                    return Ok(last_result);
                };
                if line.eq_ignore_ascii_case("help") {
                    print_help(out)?;
                    continue;
                }
                let (r, c) = match parse_coord(&line) {
                    Ok(coord) => coord,
                    Err(msg) => {
                        writeln!(out, "{}", msg)?;
                        continue;
                    }
                };
                let report = session.fire(r, c)?;
                writeln!(out, "{}", describe_shot(session, &report))?;
            }
            GamePhase::InProgress => {
                writeln!(out, "Enemy is firing...")?;
                tokio::time::sleep(options.ai_delay).await;
                if let Some(report) = session.computer_turn(rng)? {
                    writeln!(out, "{}", describe_shot(session, &report))?;
                }
            }
            GamePhase::GameOver => {
                write!(out, "\n{}", render_view(session))?;
                if let Some(result) = session.result() {
                    writeln!(out, "{}", describe_result(result))?;
                    last_result = Some(result);
                }
                match prompt(&mut lines, out, "Play again? (y/n): ").await? {
                    Some(answer) if answer.eq_ignore_ascii_case("y") => session.restart(rng)?,
                    _ => return Ok(last_result),
                }
            }
        }
    }
}
