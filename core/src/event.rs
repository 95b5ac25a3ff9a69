//! Session events: the observable record of every state change.
//!
//! RULE: The Session emits an event for every command it applies.
//! Presentation layers react to events; they never diff states.

use crate::{
    badge::BadgeId,
    state::{Goal, StartingProfile},
    types::{ChoiceId, DecisionId, DecisionIndex, SessionId},
};
use serde::{Deserialize, Serialize};

/// Every event emitted by a session.
/// Variants are appended: never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Session lifecycle ──────────────────────────
    SessionStarted {
        session_id: SessionId,
    },
    ProfileSelected {
        profile: StartingProfile,
    },
    GoalSelected {
        goal:       Goal,
        risk_level: f64,
    },
    EducatorModeChanged {
        enabled: bool,
    },

    // ── Decisions ──────────────────────────────────
    ChoiceMade {
        decision_index: DecisionIndex,
        decision_id:    DecisionId,
        choice_id:      ChoiceId,
    },
    TimeStepCompleted {
        decision_index:    DecisionIndex,
        seed:              u32,
        cash:              f64,
        net_worth:         f64,
        investment_change: f64,
        interest_accrued:  f64,
    },
    CashShortfallCharged {
        decision_index: DecisionIndex,
        amount:         f64,
    },
    ScenarioTriggered {
        decision_index: DecisionIndex,
        scenario:       Scenario,
    },
    BadgeUnlocked {
        decision_index: DecisionIndex,
        badge:          BadgeId,
    },
    RunCompleted {
        net_worth: f64,
    },

    // ── Navigation ─────────────────────────────────
    ChoiceUndone {
        decision_index: DecisionIndex,
        decision_id:    DecisionId,
    },
    DecisionRevisited {
        decision_index: DecisionIndex,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    Recession,
    InflationSpike,
}

impl SimEvent {
    /// Stable string name of the variant, used as the log's event_type.
    pub fn type_name(&self) -> &'static str {
        match self {
            SimEvent::SessionStarted { .. }       => "session_started",
            SimEvent::ProfileSelected { .. }      => "profile_selected",
            SimEvent::GoalSelected { .. }         => "goal_selected",
            SimEvent::EducatorModeChanged { .. }  => "educator_mode_changed",
            SimEvent::ChoiceMade { .. }           => "choice_made",
            SimEvent::TimeStepCompleted { .. }    => "time_step_completed",
            SimEvent::CashShortfallCharged { .. } => "cash_shortfall_charged",
            SimEvent::ScenarioTriggered { .. }    => "scenario_triggered",
            SimEvent::BadgeUnlocked { .. }        => "badge_unlocked",
            SimEvent::RunCompleted { .. }         => "run_completed",
            SimEvent::ChoiceUndone { .. }         => "choice_undone",
            SimEvent::DecisionRevisited { .. }    => "decision_revisited",
        }
    }
}

/// One entry of a session's event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub seq:            u64,
    pub decision_index: DecisionIndex,
    pub event_type:     String,
    pub payload:        String, // JSON-serialized SimEvent
}
