use crate::{
    state::{Goal, StartingProfile},
    types::{ChoiceId, DecisionId, DecisionIndex},
};
use serde::{Deserialize, Serialize};

/// All player-issued commands.
/// Variants are appended: never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum PlayerCommand {
    // ── Setup ─────────────────────────────────────
    SetProfile { profile: StartingProfile },
    SetGoal { goal: Goal },
    SetEducatorMode { enabled: bool },

    // ── Play ──────────────────────────────────────
    MakeChoice {
        decision_id: DecisionId,
        choice_id:   ChoiceId,
    },
    Undo,
    Reset,

    // ── Educator mode ─────────────────────────────
    GoToDecision { index: DecisionIndex },
}
