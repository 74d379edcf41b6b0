//! Turn engine.
//!
//! Owns the board, decides whose turn it is, and drives the
//! select -> move/attack -> resolve -> switch-turn cycle. Every operation is
//! synchronous; a rejected call leaves the game exactly as it was.
//!
//! After the ally side completes a move or attack the opponent policy answers
//! immediately (unless auto-reply is off), so from the caller's point of view
//! control is back with the player when the call returns.

pub mod actor;
pub mod snapshot;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Side, Unit, MAX_HEALTH};
use crate::config::GameConfig;
use crate::error::{EngineError, Result};
use crate::policy::{self, Context, Decision};
use crate::resolve::{resolve_attack, Resolution};
use crate::roster::{deploy, generate_from, parse_archetypes};

pub use actor::{ActorPhase, TurnActor};
pub use snapshot::{BoardSnapshot, UnitRecord};

/// A completed action, as recorded in the game history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum TurnAction {
    Move {
        side: Side,
        from: usize,
        to: usize,
    },
    Attack {
        side: Side,
        from: usize,
        target: usize,
        damage: f64,
        target_died: bool,
    },
    Pass {
        side: Side,
        cell: usize,
    },
}

impl TurnAction {
    pub fn side(&self) -> Side {
        match *self {
            TurnAction::Move { side, .. }
            | TurnAction::Attack { side, .. }
            | TurnAction::Pass { side, .. } => side,
        }
    }

    /// Cell the acting unit stands on after the action.
    pub fn actor_cell(&self) -> usize {
        match *self {
            TurnAction::Move { to, .. } => to,
            TurnAction::Attack { from, .. } => from,
            TurnAction::Pass { cell, .. } => cell,
        }
    }
}

/// Result of a successful `move_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOutcome {
    pub snapshot: BoardSnapshot,
    /// The opponent's automatic answer, if one was played.
    pub reply: Option<TurnAction>,
}

/// Result of a successful `attack`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub snapshot: BoardSnapshot,
    pub damage: f64,
    pub target_died: bool,
    /// The opponent's automatic answer, if one was played.
    pub reply: Option<TurnAction>,
}

/// What a raw cell click turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Selected(TurnActor),
    Moved(MoveOutcome),
    Attacked(AttackOutcome),
}

const fn slot(side: Side) -> usize {
    match side {
        Side::Ally => 0,
        Side::Enemy => 1,
    }
}

/// One game in progress.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    turn: Side,
    winner: Option<Side>,
    actors: [TurnActor; 2],
    /// Cell of each side's most recently acting unit.
    last_actor: [Option<usize>; 2],
    auto_reply: bool,
    history: Vec<TurnAction>,
    rng: StdRng,
}

impl Game {
    /// Starts a new game: generates both rosters and deploys them.
    ///
    /// The ally side moves first.
    pub fn new(config: &GameConfig) -> Result<Self> {
        config.validate()?;
        let allies = parse_archetypes(&config.player_archetypes)?;
        let enemies = parse_archetypes(&config.enemy_archetypes)?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut board = Board::try_new(config.board_size)?;
        let ally_units = generate_from(&allies, config.unit_count, config.max_level, &mut rng)?;
        let enemy_units = generate_from(&enemies, config.unit_count, config.max_level, &mut rng)?;
        deploy(&mut board, Side::Ally, &ally_units, &mut rng)?;
        deploy(&mut board, Side::Enemy, &enemy_units, &mut rng)?;

        info!(
            size = config.board_size,
            units = config.unit_count,
            seed = ?config.seed,
            "new game"
        );

        let mut game = Game::from_board(board, Side::Ally, 0);
        game.rng = rng;
        game.auto_reply = config.auto_reply;
        Ok(game)
    }

    /// Wraps an already populated board. Useful for scripted positions.
    pub fn from_board(board: Board, turn: Side, seed: u64) -> Self {
        let mut game = Game {
            board,
            turn,
            winner: None,
            actors: [TurnActor::idle(Side::Ally), TurnActor::idle(Side::Enemy)],
            last_actor: [None; 2],
            auto_reply: true,
            history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        game.check_winner();
        game
    }

    /// Restores a game from a snapshot.
    ///
    /// The winner is recomputed from the units on the board; the snapshot's
    /// own `winner` field is not trusted.
    pub fn from_snapshot(snapshot: &BoardSnapshot, seed: u64) -> Result<Self> {
        let mut board = Board::try_new(snapshot.size)?;
        for record in &snapshot.units {
            let unit: Unit = record.to_unit();
            if !unit.is_alive() || unit.health > MAX_HEALTH {
                return Err(EngineError::InvalidConfig(format!(
                    "unit at cell {} has health {} outside (0, {}]",
                    record.cell, unit.health, MAX_HEALTH
                )));
            }
            if unit.level == 0 {
                return Err(EngineError::InvalidConfig(format!(
                    "unit at cell {} has level 0",
                    record.cell
                )));
            }
            if unit.side != unit.archetype.side() {
                return Err(EngineError::InvalidConfig(format!(
                    "{} cannot fight for {}",
                    unit.archetype, unit.side
                )));
            }
            board.place(unit, record.cell)?;
        }
        Ok(Game::from_board(board, snapshot.turn, seed))
    }

    pub fn set_auto_reply(&mut self, on: bool) {
        self.auto_reply = on;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side whose turn it is.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    /// Current selection state of a side.
    pub fn actor(&self, side: Side) -> &TurnActor {
        &self.actors[slot(side)]
    }

    /// Every action completed so far, oldest first.
    pub fn history(&self) -> &[TurnAction] {
        &self.history
    }

    /// Captures the current observable state.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::capture(&self.board, self.turn, self.winner)
    }

    fn ensure_running(&self) -> Result<()> {
        match self.winner {
            Some(winner) => Err(EngineError::GameAlreadyOver { winner }),
            None => Ok(()),
        }
    }

    fn check_bounds(&self, cell: usize) -> Result<()> {
        if cell >= self.board.cell_count() {
            return Err(EngineError::OutOfBounds {
                cell,
                size: self.board.size(),
            });
        }
        Ok(())
    }

    /// Records a winner if either side has been wiped out.
    fn check_winner(&mut self) {
        if self.winner.is_some() {
            return;
        }
        for side in [Side::Ally, Side::Enemy] {
            if self.board.count(side) == 0 {
                self.winner = Some(side.opponent());
                info!(winner = %side.opponent(), "game over");
                return;
            }
        }
    }

    /// Selects one of the acting side's units and computes its target sets.
    ///
    /// Selecting another own unit while one is already selected switches the
    /// selection.
    pub fn select_unit(&mut self, cell: usize) -> Result<TurnActor> {
        self.ensure_running()?;
        self.check_bounds(cell)?;
        let unit = self.board.unit_at(cell).ok_or(EngineError::NoUnitAtSource(cell))?;
        if unit.side != self.turn {
            return Err(EngineError::NotYourTurn {
                cell,
                turn: self.turn,
            });
        }

        let actor = &mut self.actors[slot(self.turn)];
        actor.select(&self.board, cell);
        debug!(
            side = %self.turn,
            cell,
            moves = actor.move_targets.len(),
            attacks = actor.attack_targets.len(),
            "unit selected"
        );
        Ok(actor.clone())
    }

    /// Moves the selected unit to an empty cell in its move set and ends the turn.
    pub fn move_to(&mut self, cell: usize) -> Result<MoveOutcome> {
        let side = self.turn;
        self.perform_move(cell)?;
        let reply = self.reply_after(side, None);
        Ok(MoveOutcome {
            snapshot: self.snapshot(),
            reply,
        })
    }

    /// Attacks an enemy in the selected unit's attack set and ends the turn.
    pub fn attack(&mut self, cell: usize) -> Result<AttackOutcome> {
        let side = self.turn;
        let (_, resolution) = self.perform_attack(cell)?;
        let trigger = (!resolution.target_died).then_some(cell);
        let reply = self.reply_after(side, trigger);
        Ok(AttackOutcome {
            snapshot: self.snapshot(),
            damage: resolution.damage,
            target_died: resolution.target_died,
            reply,
        })
    }

    /// Interprets a click on a cell: own unit selects, enemy unit attacks,
    /// empty cell moves.
    pub fn click(&mut self, cell: usize) -> Result<ClickOutcome> {
        self.ensure_running()?;
        self.check_bounds(cell)?;
        match self.board.unit_at(cell) {
            Some(u) if u.side == self.turn => self.select_unit(cell).map(ClickOutcome::Selected),
            Some(_) => self.attack(cell).map(ClickOutcome::Attacked),
            None => self.move_to(cell).map(ClickOutcome::Moved),
        }
    }

    /// Lets the policy play one action for the side on turn.
    pub fn play_policy_turn(&mut self) -> Result<TurnAction> {
        self.policy_turn(None)
    }

    fn policy_turn(&mut self, trigger: Option<usize>) -> Result<TurnAction> {
        self.ensure_running()?;
        let side = self.turn;
        let ctx = Context {
            trigger,
            focus: self.last_actor[slot(side.opponent())],
        };
        let Some(decision) = policy::choose(&self.board, side, ctx, &mut self.rng) else {
            self.check_winner();
            return Err(EngineError::GameAlreadyOver {
                winner: side.opponent(),
            });
        };

        self.select_unit(decision.actor())?;
        match decision {
            Decision::Attack { target, .. } => self.perform_attack(target).map(|(action, _)| action),
            Decision::Move { to, .. } => self.perform_move(to),
            Decision::Pass { from } => {
                let action = TurnAction::Pass { side, cell: from };
                self.end_turn(action);
                Ok(action)
            }
        }
    }

    fn selection(&self) -> Result<usize> {
        self.actors[slot(self.turn)]
            .selected
            .ok_or(EngineError::NoActiveSelection)
    }

    fn perform_move(&mut self, cell: usize) -> Result<TurnAction> {
        self.ensure_running()?;
        let from = self.selection()?;
        let actor = &self.actors[slot(self.turn)];
        if !actor.move_targets.contains(&cell) || !self.board.is_empty_cell(cell) {
            return Err(EngineError::IllegalMoveTarget(cell));
        }

        self.board.move_unit(from, cell)?;
        debug!(side = %self.turn, from, to = cell, "unit moved");
        let action = TurnAction::Move {
            side: self.turn,
            from,
            to: cell,
        };
        self.end_turn(action);
        Ok(action)
    }

    fn perform_attack(&mut self, cell: usize) -> Result<(TurnAction, Resolution)> {
        self.ensure_running()?;
        let from = self.selection()?;
        if !self.actors[slot(self.turn)].attack_targets.contains(&cell) {
            return Err(EngineError::IllegalAttackTarget(cell));
        }

        let resolution = resolve_attack(&mut self.board, from, cell)?;
        if resolution.target_died {
            self.check_winner();
        }
        let action = TurnAction::Attack {
            side: self.turn,
            from,
            target: cell,
            damage: resolution.damage,
            target_died: resolution.target_died,
        };
        self.end_turn(action);
        Ok((action, resolution))
    }

    /// Records the action and hands control to the other side.
    fn end_turn(&mut self, action: TurnAction) {
        let side = self.turn;
        self.last_actor[slot(side)] = Some(action.actor_cell());
        self.history.push(action);
        self.actors[slot(side)].reset();
        self.turn = side.opponent();
    }

    /// Plays the opponent's automatic answer after an ally action.
    fn reply_after(&mut self, acted: Side, trigger: Option<usize>) -> Option<TurnAction> {
        if acted != Side::Ally || !self.auto_reply || self.is_over() {
            return None;
        }
        match self.policy_turn(trigger) {
            Ok(action) => Some(action),
            Err(e) => {
                warn!(side = %self.turn, "automatic reply failed: {}", e);
                None
            }
        }
    }
}
