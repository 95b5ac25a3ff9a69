//! History snapshots and undo.
//!
//! A snapshot is taken of the pre-choice state on every decision.
//! It is display-grade: currency and score fields are rounded to whole
//! units and purchasing power to 2 decimals. Undo restores these
//! rounded values verbatim: it does NOT recover full float precision.
//!
//! Undo does not touch fields outside the snapshot: badges, risk level,
//! the long-term counter and the scenario flags stay as they are.

use crate::{
    state::{DebtBalances, GameState},
    types::DecisionId,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub decision_id:           DecisionId,
    pub age:                   f64,
    pub year:                  f64,
    pub cash:                  f64,
    pub monthly_income:        f64,
    pub monthly_expenses:      f64,
    pub debt:                  DebtBalances,
    pub credit_score:          f64,
    pub investments:           f64,
    pub net_worth:             f64,
    pub stress:                f64,
    pub inflation_rate:        f64,
    pub real_purchasing_power: f64,
}

/// Round half towards positive infinity, so -2.5 becomes -2.
pub fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

fn round_cents(value: f64) -> f64 {
    round_half_up(value * 100.0) / 100.0
}

pub fn take_snapshot(state: &GameState, decision_id: &str) -> StateSnapshot {
    StateSnapshot {
        decision_id:      decision_id.to_string(),
        age:              state.age,
        year:             state.year,
        cash:             round_half_up(state.cash),
        monthly_income:   round_half_up(state.monthly_income),
        monthly_expenses: round_half_up(state.monthly_expenses),
        debt: DebtBalances {
            credit_card:  round_half_up(state.debt.credit_card),
            student_loan: round_half_up(state.debt.student_loan),
            auto_loan:    round_half_up(state.debt.auto_loan),
            mortgage:     round_half_up(state.debt.mortgage),
        },
        credit_score:          round_half_up(state.credit_score),
        investments:           round_half_up(state.investments),
        net_worth:             round_half_up(state.net_worth),
        stress:                round_half_up(state.stress),
        inflation_rate:        state.inflation_rate,
        real_purchasing_power: round_cents(state.real_purchasing_power),
    }
}

/// Roll back the most recent decision. Returns None when history is empty.
pub fn undo(state: &GameState) -> Option<GameState> {
    let (last, rest) = state.history.split_last()?;

    let mut prev = state.clone();
    prev.current_decision = state.current_decision.saturating_sub(1);
    prev.age = last.age;
    prev.year = last.year;
    prev.cash = last.cash;
    prev.monthly_income = last.monthly_income;
    prev.monthly_expenses = last.monthly_expenses;
    prev.debt = last.debt;
    prev.credit_score = last.credit_score;
    prev.investments = last.investments;
    prev.net_worth = last.net_worth;
    prev.stress = last.stress;
    prev.inflation_rate = last.inflation_rate;
    prev.real_purchasing_power = last.real_purchasing_power;

    prev.history = rest.to_vec();
    prev.choices_made.pop();
    prev.completed = false;
    Some(prev)
}
