//! Single-action opponent heuristic.
//!
//! Picks one unit of the acting side, attacks if anything is in reach, and
//! otherwise steps to a random empty cell in its movement range. There is no
//! lookahead; each call is bounded by one scan of the board.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, Side};
use crate::movegen::{attack_targets, move_targets};

/// An action chosen for one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Decision {
    Attack { from: usize, target: usize },
    Move { from: usize, to: usize },
    Pass { from: usize },
}

impl Decision {
    /// Cell of the acting unit.
    pub fn actor(&self) -> usize {
        match *self {
            Decision::Attack { from, .. } | Decision::Move { from, .. } | Decision::Pass { from } => from,
        }
    }
}

/// Hints describing the event that handed the turn to `side`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Context {
    /// Cell associated with the triggering event, e.g. the unit just attacked.
    pub trigger: Option<usize>,
    /// Cell of the opposing side's most recently acting unit.
    pub focus: Option<usize>,
}

/// Chooses one action for `side`, or `None` if the side has no units.
pub fn choose(board: &Board, side: Side, ctx: Context, rng: &mut impl Rng) -> Option<Decision> {
    let actor = pick_actor(board, side, ctx.trigger)?;

    let targets = attack_targets(board, actor);
    if !targets.is_empty() {
        let target = ctx
            .focus
            .filter(|f| targets.contains(f))
            .or_else(|| targets.last().copied())?;
        debug!(%side, actor, target, "policy attacks");
        return Some(Decision::Attack { from: actor, target });
    }

    let moves: Vec<usize> = move_targets(board, actor).into_iter().collect();
    let Some(&to) = moves.choose(rng) else {
        debug!(%side, actor, "policy passes");
        return Some(Decision::Pass { from: actor });
    };
    debug!(%side, actor, to, "policy moves");
    Some(Decision::Move { from: actor, to })
}

/// The triggering unit if it belongs to `side`, else the first in row-major order.
fn pick_actor(board: &Board, side: Side, trigger: Option<usize>) -> Option<usize> {
    if let Some(cell) = trigger {
        if board.unit_at(cell).is_some_and(|u| u.side == side) {
            return Some(cell);
        }
    }
    board.units().find(|p| p.unit.side == side).map(|p| p.cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Archetype, Unit};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn board_with(units: &[(Archetype, usize)]) -> Board {
        let mut board = Board::new(8);
        for &(a, cell) in units {
            board.place(Unit::new(a, 1), cell).unwrap();
        }
        board
    }

    #[test]
    fn no_units_means_no_decision() {
        let board = board_with(&[(Archetype::Swordsman, 0)]);
        assert_eq!(choose(&board, Side::Enemy, Context::default(), &mut seeded_rng()), None);
    }

    #[test]
    fn triggered_unit_acts_first() {
        let board = board_with(&[
            (Archetype::Swordsman, 0),
            (Archetype::Undead, 7),
            (Archetype::Undead, 9),
        ]);
        let ctx = Context { trigger: Some(9), focus: None };
        let d = choose(&board, Side::Enemy, ctx, &mut seeded_rng()).unwrap();
        assert_eq!(d, Decision::Attack { from: 9, target: 0 });
    }

    #[test]
    fn first_unit_acts_without_trigger() {
        let board = board_with(&[
            (Archetype::Swordsman, 56),
            (Archetype::Daemon, 7),
            (Archetype::Daemon, 63),
        ]);
        let d = choose(&board, Side::Enemy, Context::default(), &mut seeded_rng()).unwrap();
        assert_eq!(d.actor(), 7);
    }

    #[test]
    fn trigger_on_foreign_unit_is_ignored() {
        let board = board_with(&[(Archetype::Swordsman, 0), (Archetype::Undead, 63)]);
        let ctx = Context { trigger: Some(0), focus: None };
        let d = choose(&board, Side::Enemy, ctx, &mut seeded_rng()).unwrap();
        assert_eq!(d.actor(), 63);
    }

    #[test]
    fn focus_target_is_preferred() {
        let board = board_with(&[
            (Archetype::Swordsman, 0),
            (Archetype::Bowman, 2),
            (Archetype::Daemon, 9),
        ]);
        let ctx = Context { trigger: None, focus: Some(0) };
        let d = choose(&board, Side::Enemy, ctx, &mut seeded_rng()).unwrap();
        assert_eq!(d, Decision::Attack { from: 9, target: 0 });
    }

    #[test]
    fn last_candidate_without_focus() {
        let board = board_with(&[
            (Archetype::Swordsman, 0),
            (Archetype::Bowman, 2),
            (Archetype::Daemon, 9),
        ]);
        let d = choose(&board, Side::Enemy, Context::default(), &mut seeded_rng()).unwrap();
        assert_eq!(d, Decision::Attack { from: 9, target: 2 });
    }

    #[test]
    fn moves_to_empty_cell_when_nothing_in_reach() {
        let board = board_with(&[(Archetype::Swordsman, 0), (Archetype::Daemon, 63)]);
        for seed in 0..20 {
            let d = choose(&board, Side::Enemy, Context::default(), &mut StdRng::seed_from_u64(seed)).unwrap();
            match d {
                Decision::Move { from, to } => {
                    assert_eq!(from, 63);
                    assert!([54, 55, 62].contains(&to), "unexpected target {to}");
                }
                other => panic!("expected a move, got {other:?}"),
            }
        }
    }

    #[test]
    fn boxed_in_unit_passes() {
        let board = board_with(&[
            (Archetype::Swordsman, 0),
            (Archetype::Daemon, 63),
            (Archetype::Daemon, 62),
            (Archetype::Daemon, 55),
            (Archetype::Daemon, 54),
        ]);
        let ctx = Context { trigger: Some(63), focus: None };
        let d = choose(&board, Side::Enemy, ctx, &mut seeded_rng()).unwrap();
        assert_eq!(d, Decision::Pass { from: 63 });
    }

    #[test]
    fn same_seed_same_move() {
        let board = board_with(&[(Archetype::Swordsman, 0), (Archetype::Undead, 63)]);
        let a = choose(&board, Side::Enemy, Context::default(), &mut StdRng::seed_from_u64(9));
        let b = choose(&board, Side::Enemy, Context::default(), &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
