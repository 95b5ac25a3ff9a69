//! Effect bundles and their immediate application to state.
//!
//! Every numeric field is an additive delta EXCEPT `inflation_rate`,
//! which is the new absolute rate (floored at 0).
//! `trigger_inflation_spike` is defined to also set the inflation rate
//! to INFLATION_SPIKE_RATE, overriding any `inflation_rate` in the bundle.
//! An absent field means "no change"; a zero delta still runs the clamp.

use crate::{finance, state::GameState};
use serde::{Deserialize, Serialize};

/// Annual inflation rate forced by an inflation spike.
pub const INFLATION_SPIKE_RATE: f64 = 0.08;

pub const CREDIT_SCORE_MIN: f64 = 300.0;
pub const CREDIT_SCORE_MAX: f64 = 850.0;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Effects {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cash:             Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_income:   Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_expenses: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_card_debt: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_loan:     Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_loan:        Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mortgage:         Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credit_score:     Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investments:      Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress:           Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level:       Option<f64>,
    /// Absolute new rate, not a delta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_rate:   Option<f64>,

    #[serde(default)]
    pub trigger_recession:       bool,
    #[serde(default)]
    pub trigger_inflation_spike: bool,
    /// Counts towards the long-term-thinking badge.
    #[serde(default)]
    pub long_term_choice:        bool,
}

fn floor_zero(base: f64, delta: Option<f64>) -> f64 {
    match delta {
        Some(d) => (base + d).max(0.0),
        None => base,
    }
}

fn bounded(base: f64, delta: Option<f64>, min: f64, max: f64) -> f64 {
    match delta {
        Some(d) => (base + d).clamp(min, max),
        None => base,
    }
}

/// Apply a choice's effect bundle. Net worth is always recomputed.
pub fn apply_effects(state: &GameState, effects: &Effects) -> GameState {
    let mut next = state.clone();

    next.cash = floor_zero(state.cash, effects.cash);
    next.monthly_income = floor_zero(state.monthly_income, effects.monthly_income);
    next.monthly_expenses = floor_zero(state.monthly_expenses, effects.monthly_expenses);
    next.investments = floor_zero(state.investments, effects.investments);

    next.debt.credit_card = floor_zero(state.debt.credit_card, effects.credit_card_debt);
    next.debt.student_loan = floor_zero(state.debt.student_loan, effects.student_loan);
    next.debt.auto_loan = floor_zero(state.debt.auto_loan, effects.auto_loan);
    next.debt.mortgage = floor_zero(state.debt.mortgage, effects.mortgage);

    next.credit_score = bounded(
        state.credit_score,
        effects.credit_score,
        CREDIT_SCORE_MIN,
        CREDIT_SCORE_MAX,
    );
    next.stress = bounded(state.stress, effects.stress, 0.0, 100.0);
    next.risk_level = bounded(state.risk_level, effects.risk_level, 0.0, 100.0);

    if let Some(rate) = effects.inflation_rate {
        next.inflation_rate = rate.max(0.0);
    }
    if effects.trigger_recession {
        next.recession_active = true;
    }
    if effects.trigger_inflation_spike {
        next.inflation_spike_active = true;
        next.inflation_rate = INFLATION_SPIKE_RATE;
    }
    if effects.long_term_choice {
        next.long_term_choices += 1;
    }

    next.net_worth = finance::net_worth(next.cash, next.investments, &next.debt);
    next
}
