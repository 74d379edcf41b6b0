//! Protocol session state.
//!
//! Holds the game in progress and the setup used to start new ones, and
//! turns protocol commands into turn-engine calls and response lines.

use std::collections::BTreeSet;
use std::io::{self, Write};

use tracing::warn;

use crate::config::GameConfig;
use crate::error::EngineError;
use crate::game::{AttackOutcome, BoardSnapshot, ClickOutcome, Game, MoveOutcome, TurnAction, TurnActor};
use crate::protocol::Command;

/// Holds the mutable state of the driver between commands.
pub struct Engine {
    pub config: GameConfig,
    pub game: Option<Game>,
}

/// Formats a cell set as `a,b,c`, or `-` when empty.
fn cell_list(cells: &BTreeSet<usize>) -> String {
    if cells.is_empty() {
        return "-".to_string();
    }
    cells.iter().map(usize::to_string).collect::<Vec<_>>().join(",")
}

/// Formats a completed action as the tail of a `reply` line.
fn action_line(action: &TurnAction) -> String {
    match *action {
        TurnAction::Move { from, to, .. } => format!("move {} {}", from, to),
        TurnAction::Attack {
            from,
            target,
            damage,
            target_died,
            ..
        } => format!("attack {} {} damage {} died {}", from, target, damage, target_died),
        TurnAction::Pass { cell, .. } => format!("pass {}", cell),
    }
}

impl Engine {
    /// Creates a session with no game in progress.
    pub fn new(config: GameConfig) -> Self {
        Engine { config, game: None }
    }

    /// Starts a new game, overriding the configured seed if one is given.
    pub fn new_game(&mut self, seed: Option<u64>) -> Result<(), EngineError> {
        let mut config = self.config.clone();
        if seed.is_some() {
            config.seed = seed;
        }
        self.game = Some(Game::new(&config)?);
        Ok(())
    }

    /// Replaces the current game with one restored from a JSON snapshot.
    pub fn load(&mut self, json: &str) -> Result<(), String> {
        let snapshot: BoardSnapshot =
            serde_json::from_str(json).map_err(|e| format!("failed to parse snapshot: {}", e))?;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut game = Game::from_snapshot(&snapshot, seed).map_err(|e| e.to_string())?;
        game.set_auto_reply(self.config.auto_reply);
        self.game = Some(game);
        Ok(())
    }

    /// Dispatches one command. Returns `Ok(false)` when the session should end.
    pub fn handle<W: Write>(&mut self, cmd: Command, out: &mut W) -> io::Result<bool> {
        match cmd {
            Command::IsReady => self.handle_isready(out)?,
            Command::NewGame { seed } => {
                if let Err(e) = self.new_game(seed) {
                    write_error(out, &e)?;
                }
            }
            Command::Select { cell } => self.handle_select(cell, out)?,
            Command::Move { cell } => self.handle_move(cell, out)?,
            Command::Attack { cell } => self.handle_attack(cell, out)?,
            Command::Click { cell } => self.handle_click(cell, out)?,
            Command::Snapshot => self.handle_snapshot(out)?,
            Command::Load { json } => {
                if let Err(msg) = self.load(&json) {
                    warn!("{}", msg);
                    writeln!(out, "error load: {}", msg)?;
                } else {
                    self.write_status(out)?;
                }
            }
            Command::Quit => return Ok(false),
        }
        out.flush()?;
        Ok(true)
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")
    }

    /// Handles `select <cell>`: prints the legal target sets.
    pub fn handle_select<W: Write>(&mut self, cell: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return write_no_game(out);
        };
        match game.select_unit(cell) {
            Ok(actor) => write_selected(out, cell, &actor),
            Err(e) => write_error(out, &e),
        }
    }

    /// Handles `move <cell>`.
    pub fn handle_move<W: Write>(&mut self, cell: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return write_no_game(out);
        };
        let from = game.actor(game.turn()).selected;
        match game.move_to(cell) {
            Ok(outcome) => {
                write_moved(out, from.unwrap_or(cell), cell, &outcome)?;
                self.write_status(out)
            }
            Err(e) => write_error(out, &e),
        }
    }

    /// Handles `attack <cell>`.
    pub fn handle_attack<W: Write>(&mut self, cell: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return write_no_game(out);
        };
        match game.attack(cell) {
            Ok(outcome) => {
                write_attacked(out, cell, &outcome)?;
                self.write_status(out)
            }
            Err(e) => write_error(out, &e),
        }
    }

    /// Handles `click <cell>` by dispatching on the cell's occupant.
    pub fn handle_click<W: Write>(&mut self, cell: usize, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_mut() else {
            return write_no_game(out);
        };
        let turn = game.turn();
        let from = game.actor(turn).selected;
        match game.click(cell) {
            Ok(ClickOutcome::Selected(actor)) => write_selected(out, cell, &actor),
            Ok(ClickOutcome::Moved(outcome)) => {
                write_moved(out, from.unwrap_or(cell), cell, &outcome)?;
                self.write_status(out)
            }
            Ok(ClickOutcome::Attacked(outcome)) => {
                write_attacked(out, cell, &outcome)?;
                self.write_status(out)
            }
            Err(e) => {
                if e.is_user_facing() {
                    warn!(cell, %turn, "click rejected: {}", e);
                }
                write_error(out, &e)
            }
        }
    }

    /// Handles `snapshot`: prints the game as one line of JSON.
    pub fn handle_snapshot<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let Some(game) = self.game.as_ref() else {
            return write_no_game(out);
        };
        let json = serde_json::to_string(&game.snapshot()).map_err(io::Error::other)?;
        writeln!(out, "snapshot {}", json)
    }

    /// Prints `gameover <winner>` or `turn <side>`.
    fn write_status<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.game {
            Some(game) => match game.winner() {
                Some(winner) => writeln!(out, "gameover {}", winner),
                None => writeln!(out, "turn {}", game.turn()),
            },
            None => Ok(()),
        }
    }
}

fn write_selected<W: Write>(out: &mut W, cell: usize, actor: &TurnActor) -> io::Result<()> {
    writeln!(
        out,
        "selected {} moves {} attacks {} reselect {}",
        cell,
        cell_list(&actor.move_targets),
        cell_list(&actor.attack_targets),
        cell_list(&actor.reselect_targets)
    )
}

fn write_moved<W: Write>(out: &mut W, from: usize, to: usize, outcome: &MoveOutcome) -> io::Result<()> {
    writeln!(out, "moved {} {}", from, to)?;
    if let Some(reply) = &outcome.reply {
        writeln!(out, "reply {}", action_line(reply))?;
    }
    Ok(())
}

fn write_attacked<W: Write>(out: &mut W, cell: usize, outcome: &AttackOutcome) -> io::Result<()> {
    writeln!(
        out,
        "attacked {} damage {} died {}",
        cell, outcome.damage, outcome.target_died
    )?;
    if let Some(reply) = &outcome.reply {
        writeln!(out, "reply {}", action_line(reply))?;
    }
    Ok(())
}

fn write_error<W: Write>(out: &mut W, e: &EngineError) -> io::Result<()> {
    writeln!(out, "error {}: {}", e.kind(), e)
}

fn write_no_game<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "error no_game: start a game with 'newgame' first")
}
