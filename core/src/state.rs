//! The game state: the single root entity of a session.
//!
//! RULE: Engine functions never mutate a GameState in place.
//! They take `&GameState` and return a new value. Only the Session
//! holds the live instance.

use crate::{
    badge::{initial_badges, Badge},
    clock,
    config::SimConfig,
    finance,
    snapshot::StateSnapshot,
    types::{ChoiceId, DecisionId, DecisionIndex, SessionId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DebtBalances {
    pub credit_card:  f64,
    pub student_loan: f64,
    pub auto_loan:    f64,
    pub mortgage:     f64,
}

/// Annual rates per debt category. Fixed for the life of a session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRates {
    pub credit_card:  f64,
    pub student_loan: f64,
    pub auto_loan:    f64,
    pub mortgage:     f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartingProfile {
    Scratch,
    SafetyNet,
    DebtStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Stability,
    Growth,
    Freedom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRecord {
    pub decision_id: DecisionId,
    pub choice_id:   ChoiceId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    // ── Session ────────────────────────────────────
    pub session_id:    SessionId,
    /// Unix milliseconds.
    pub started_at:    i64,
    pub profile:       Option<StartingProfile>,
    pub goal:          Option<Goal>,
    pub educator_mode: bool,

    // ── Progression ────────────────────────────────
    pub current_decision: DecisionIndex,
    pub age:              f64,
    /// Simulated years elapsed since the session started.
    pub year:             f64,

    // ── Money ──────────────────────────────────────
    pub cash:             f64,
    pub monthly_income:   f64,
    pub monthly_expenses: f64,
    pub debt:             DebtBalances,
    pub interest_rates:   InterestRates,
    pub investments:      f64,

    // ── Behavioral ─────────────────────────────────
    pub credit_score:   f64,
    pub stress:         f64,
    pub risk_level:     f64,
    pub inflation_rate: f64,

    // ── Derived ────────────────────────────────────
    pub net_worth:             f64,
    pub real_purchasing_power: f64,

    // ── Tracking ───────────────────────────────────
    pub badges:            Vec<Badge>,
    pub history:           Vec<StateSnapshot>,
    pub choices_made:      Vec<ChoiceRecord>,
    pub long_term_choices: u32,

    // ── Scenario flags (sticky) ────────────────────
    pub recession_active:       bool,
    pub inflation_spike_active: bool,

    pub completed: bool,
}

impl GameState {
    /// Fresh state for a new session, before profile or goal selection.
    pub fn new(session_id: SessionId, started_at: i64, config: &SimConfig) -> Self {
        let init = &config.initial;
        let debt = DebtBalances::default();
        Self {
            session_id,
            started_at,
            profile: None,
            goal: None,
            educator_mode: false,
            current_decision: 0,
            age: init.age,
            year: 0.0,
            cash: init.cash,
            monthly_income: init.monthly_income,
            monthly_expenses: init.monthly_expenses,
            debt,
            interest_rates: config.interest_rates,
            investments: init.investments,
            credit_score: init.credit_score,
            stress: init.stress,
            risk_level: init.risk_level,
            inflation_rate: init.inflation_rate,
            net_worth: finance::net_worth(init.cash, init.investments, &debt),
            real_purchasing_power: 100.0,
            badges: initial_badges(),
            history: Vec::new(),
            choices_made: Vec::new(),
            long_term_choices: 0,
            recession_active: false,
            inflation_spike_active: false,
            completed: false,
        }
    }

    pub fn total_debt(&self) -> f64 {
        finance::total_debt(&self.debt)
    }

    pub fn monthly_cash_flow(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }

    /// 1-based chapter of the current decision.
    pub fn chapter(&self) -> u32 {
        clock::chapter_for_decision(self.current_decision)
    }

    /// Percentage of `total_decisions` already made.
    pub fn progress(&self, total_decisions: usize) -> f64 {
        if total_decisions == 0 {
            return 0.0;
        }
        self.current_decision as f64 / total_decisions as f64 * 100.0
    }

    pub fn unlocked_badges(&self) -> impl Iterator<Item = &Badge> {
        self.badges.iter().filter(|b| b.unlocked)
    }

    /// Three months of expenses held in cash.
    pub fn has_emergency_fund(&self) -> bool {
        self.cash >= self.monthly_expenses * 3.0
    }
}
