//! Human-vs-computer session: placement, turn order and win detection.

use log::{debug, info, warn};
use rand::Rng;

use crate::{
    ai::{SkillTier, Targeting},
    board::Board,
    common::{BoardError, Coord, GameError, ShotOutcome},
    config::FLEET,
    placement::{place_fleet_randomly, place_ship_randomly},
    ship::{Fleet, Orientation, Ship, ShipType},
};

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// The human is still positioning ships.
    Placement,
    InProgress,
    GameOver,
}

/// The two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Winner(Side),
    /// The computer ran out of cells to fire at with both fleets afloat.
    Draw,
}

/// One resolved (or rejected) shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotReport {
    pub shooter: Side,
    pub target: Coord,
    pub outcome: ShotOutcome,
    /// Set when this shot ended the game.
    pub result: Option<GameResult>,
}

/// A full human-vs-computer game: both boards, both fleets, the computer's
/// targeting state and whose turn it is.
#[derive(Debug, Clone)]
pub struct GameSession {
    phase: GamePhase,
    turn: Side,
    result: Option<GameResult>,
    human_board: Board,
    human_fleet: Fleet,
    computer_board: Board,
    computer_fleet: Fleet,
    targeting: Targeting,
    human_shots: usize,
    computer_shots: usize,
}

impl GameSession {
    /// Start a new session: the computer's fleet is placed at random and the
    /// human enters the placement phase with an empty board.
    pub fn new<R: Rng + ?Sized>(tier: SkillTier, rng: &mut R) -> Result<Self, GameError> {
        let mut computer_board = Board::new();
        let mut computer_fleet = Fleet::new();
        place_fleet_randomly(&mut computer_board, &mut computer_fleet, rng)?;
        let targeting = Targeting::new(tier, rng);
        info!("new {} game, waiting for fleet placement", tier);
        Ok(GameSession {
            phase: GamePhase::Placement,
            turn: Side::Human,
            result: None,
            human_board: Board::new(),
            human_fleet: Fleet::new(),
            computer_board,
            computer_fleet,
            targeting,
            human_shots: 0,
            computer_shots: 0,
        })
    }

    /// Throw everything away and start over with the same skill tier.
    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        *self = GameSession::new(self.targeting.tier(), rng)?;
        Ok(())
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    pub fn tier(&self) -> SkillTier {
        self.targeting.tier()
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::Human => &self.human_board,
            Side::Computer => &self.computer_board,
        }
    }

    pub fn fleet(&self, side: Side) -> &Fleet {
        match side {
            Side::Human => &self.human_fleet,
            Side::Computer => &self.computer_fleet,
        }
    }

    /// Shots fired by `side` so far. Rejected repeat shots are not counted.
    pub fn shots(&self, side: Side) -> usize {
        match side {
            Side::Human => self.human_shots,
            Side::Computer => self.computer_shots,
        }
    }

    /// Ships `side` still has afloat.
    pub fn ships_left(&self, side: Side) -> usize {
        self.fleet(side).ships_left()
    }

    /// The next ship the human has to place, in fleet order.
    pub fn next_ship_to_place(&self) -> Option<ShipType> {
        if self.phase != GamePhase::Placement {
            return None;
        }
        FLEET.get(self.human_fleet.len()).copied()
    }

    /// Place the next ship of the human's fleet at (`row`, `col`).
    pub fn place_ship(
        &mut self,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<&Ship, GameError> {
        if self.phase != GamePhase::Placement {
            return Err(GameError::WrongPhase);
        }
        let def = self.next_ship_to_place().ok_or(GameError::FleetComplete)?;
        let ship = self.human_board.place(
            &mut self.human_fleet,
            row,
            col,
            def.size(),
            orientation,
            def.name(),
        )?;
        Ok(ship)
    }

    /// Place only the next ship of the human's fleet at random.
    pub fn place_next_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<&Ship, GameError> {
        if self.phase != GamePhase::Placement {
            return Err(GameError::WrongPhase);
        }
        let def = self.next_ship_to_place().ok_or(GameError::FleetComplete)?;
        let id = self.human_fleet.len();
        place_ship_randomly(&mut self.human_board, &mut self.human_fleet, def, rng)?;
        self.human_fleet
            .get(id)
            .ok_or(GameError::Board(BoardError::UnknownShip(id)))
    }

    /// Place whatever is left of the human's fleet at random.
    pub fn place_remaining_randomly<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), GameError> {
        if self.phase != GamePhase::Placement {
            return Err(GameError::WrongPhase);
        }
        while let Some(def) = self.next_ship_to_place() {
            place_ship_randomly(&mut self.human_board, &mut self.human_fleet, def, rng)?;
        }
        Ok(())
    }

    /// Leave placement and hand the first shot to the human.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != GamePhase::Placement {
            return Err(GameError::WrongPhase);
        }
        if self.human_fleet.len() < FLEET.len() {
            return Err(GameError::FleetIncomplete);
        }
        self.phase = GamePhase::InProgress;
        self.turn = Side::Human;
        info!("game started");
        Ok(())
    }

    fn ensure_turn(&self, side: Side) -> Result<(), GameError> {
        if self.phase != GamePhase::InProgress {
            return Err(GameError::WrongPhase);
        }
        if self.turn != side {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    /// Human fires at the computer's board.
    ///
    /// A repeat shot comes back as [`ShotOutcome::AlreadyHit`] and the human
    /// keeps the turn.
    pub fn fire(&mut self, row: usize, col: usize) -> Result<ShotReport, GameError> {
        self.ensure_turn(Side::Human)?;
        let outcome = self
            .computer_board
            .apply_shot(row, col, &mut self.computer_fleet)?;
        if outcome.already_hit() {
            debug!("human repeated shot at {:?}", (row, col));
            return Ok(ShotReport {
                shooter: Side::Human,
                target: (row, col),
                outcome,
                result: None,
            });
        }
        self.human_shots += 1;
        Ok(self.conclude_shot(Side::Human, (row, col), outcome))
    }

    /// Let the computer pick a cell and fire at the human's board.
    ///
    /// If the computer has no untried cell left the game ends in a draw and
    /// the report carries no shot.
    pub fn computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<Option<ShotReport>, GameError> {
        self.ensure_turn(Side::Computer)?;
        let Some((row, col)) = self.targeting.next_shot(&self.human_board, rng) else {
            warn!("computer exhausted the board, declaring a draw");
            self.finish(GameResult::Draw);
            return Ok(None);
        };
        let outcome = self
            .human_board
            .apply_shot(row, col, &mut self.human_fleet)?;
        if outcome.already_hit() {
            // targeting filters fired cells, so this means the two disagree
            return Err(GameError::RepeatedShot { row, col });
        }
        self.targeting.record_outcome(row, col, outcome)?;
        self.computer_shots += 1;
        Ok(Some(self.conclude_shot(Side::Computer, (row, col), outcome)))
    }

    fn conclude_shot(&mut self, shooter: Side, target: Coord, outcome: ShotOutcome) -> ShotReport {
        let defeated = match shooter {
            Side::Human => self.computer_fleet.is_destroyed(),
            Side::Computer => self.human_fleet.is_destroyed(),
        };
        let result = if defeated {
            let result = GameResult::Winner(shooter);
            self.finish(result);
            Some(result)
        } else {
            self.turn = shooter.opponent();
            None
        };
        ShotReport {
            shooter,
            target,
            outcome,
            result,
        }
    }

    fn finish(&mut self, result: GameResult) {
        info!(
            "game over: {:?} after {} human / {} computer shots",
            result, self.human_shots, self.computer_shots
        );
        self.phase = GamePhase::GameOver;
        self.result = Some(result);
    }
}
