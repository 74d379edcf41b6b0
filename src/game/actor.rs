//! Per-side turn bookkeeping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::{Archetype, Board, Side};
use crate::movegen::{attack_targets, move_targets, reselect_targets};

/// Whether a side currently has a unit selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorPhase {
    Idle,
    UnitSelected,
}

/// Selection state and legal target sets for one side.
///
/// Recomputed whenever the selection changes and cleared whenever control
/// passes to the other side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnActor {
    pub side: Side,
    pub phase: ActorPhase,
    pub selected: Option<usize>,
    pub archetype: Option<Archetype>,
    /// Empty cells the selected unit may move to.
    pub move_targets: BTreeSet<usize>,
    /// Opposing units the selected unit may attack.
    pub attack_targets: BTreeSet<usize>,
    /// Other own units the side may switch its selection to.
    pub reselect_targets: BTreeSet<usize>,
}

impl TurnActor {
    /// Creates an idle actor for `side`.
    pub fn idle(side: Side) -> Self {
        TurnActor {
            side,
            phase: ActorPhase::Idle,
            selected: None,
            archetype: None,
            move_targets: BTreeSet::new(),
            attack_targets: BTreeSet::new(),
            reselect_targets: BTreeSet::new(),
        }
    }

    pub fn is_idle(&self) -> bool {
        self.phase == ActorPhase::Idle
    }

    /// Selects the unit on `cell` and computes its target sets.
    pub(crate) fn select(&mut self, board: &Board, cell: usize) {
        self.phase = ActorPhase::UnitSelected;
        self.selected = Some(cell);
        self.archetype = board.unit_at(cell).map(|u| u.archetype);
        self.move_targets = move_targets(board, cell);
        self.attack_targets = attack_targets(board, cell);
        self.reselect_targets = reselect_targets(board, cell);
    }

    pub(crate) fn reset(&mut self) {
        *self = TurnActor::idle(self.side);
    }
}
