//! The time-step reducer: "6 months pass".
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Cash flow          (income - expenses) x 6, may go negative
//!   2. Expense inflation  monthly compounding at the current rate
//!   3. Debt interest      credit card + mortgage compound,
//!                         student + auto loan simple
//!   4. Investment growth  exactly one RNG draw, only if investments > 0
//!   5. Negative cash      shortfall rolls onto the credit card
//!   6. Age / year         +0.5 each
//!   7. Net worth
//!   8. Real purchasing power
//!
//! RULES:
//!   - Steps 2-4 read the pre-step balances.
//!   - Step 5 runs after interest and growth, never before.
//!   - The caller owns the RNG; advance_time never builds its own.

use crate::{
    clock::{MONTHS_PER_STEP, YEARS_PER_STEP},
    effects::CREDIT_SCORE_MIN,
    finance,
    rng::SessionRng,
    state::GameState,
};
use serde::{Deserialize, Serialize};

/// Credit score lost when a shortfall is charged to the credit card.
pub const SHORTFALL_CREDIT_PENALTY: f64 = 15.0;
/// Stress added when a shortfall is charged to the credit card.
pub const SHORTFALL_STRESS_PENALTY: f64 = 10.0;
/// Net worth that maps to a purchasing-power index of 100.
pub const PURCHASING_POWER_BASELINE: f64 = 10_000.0;

/// What happened during one time step, beyond the new state itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeStepReport {
    pub cash_flow:           f64,
    pub interest_accrued:    f64,
    pub investment_change:   f64,
    /// Negative cash moved onto the credit card, if any.
    pub shortfall:           Option<f64>,
}

/// Advance `state` by one six-month step.
pub fn advance_time(state: &GameState, rng: &mut SessionRng) -> GameState {
    advance_time_with_report(state, rng).0
}

/// Same as advance_time(), also returning the step's cash movements.
pub fn advance_time_with_report(
    state: &GameState,
    rng: &mut SessionRng,
) -> (GameState, TimeStepReport) {
    let mut next = state.clone();
    let mut report = TimeStepReport::default();

    // 1. Cash flow
    report.cash_flow = state.monthly_cash_flow() * f64::from(MONTHS_PER_STEP);
    next.cash = state.cash + report.cash_flow;

    // 2. Expense inflation
    next.monthly_expenses =
        finance::adjust_for_inflation(state.monthly_expenses, state.inflation_rate, MONTHS_PER_STEP);

    // 3. Debt interest
    let rates = &state.interest_rates;
    if state.debt.credit_card > 0.0 {
        next.debt.credit_card =
            finance::compound_interest(state.debt.credit_card, rates.credit_card, MONTHS_PER_STEP);
    }
    if state.debt.student_loan > 0.0 {
        next.debt.student_loan = state.debt.student_loan
            + finance::simple_interest(state.debt.student_loan, rates.student_loan, MONTHS_PER_STEP);
    }
    if state.debt.auto_loan > 0.0 {
        next.debt.auto_loan = state.debt.auto_loan
            + finance::simple_interest(state.debt.auto_loan, rates.auto_loan, MONTHS_PER_STEP);
    }
    if state.debt.mortgage > 0.0 {
        next.debt.mortgage =
            finance::compound_interest(state.debt.mortgage, rates.mortgage, MONTHS_PER_STEP);
    }
    report.interest_accrued = next.total_debt() - state.total_debt();

    // 4. Investment growth
    if state.investments > 0.0 {
        next.investments = finance::investment_growth(
            state.investments,
            state.risk_level,
            MONTHS_PER_STEP,
            rng,
            state.recession_active,
        );
        report.investment_change = next.investments - state.investments;
    }

    // 5. Negative cash
    if next.cash < 0.0 {
        let shortfall = next.cash.abs();
        next.debt.credit_card += shortfall;
        next.cash = 0.0;
        next.credit_score = (next.credit_score - SHORTFALL_CREDIT_PENALTY).max(CREDIT_SCORE_MIN);
        next.stress = (next.stress + SHORTFALL_STRESS_PENALTY).min(100.0);
        report.shortfall = Some(shortfall);
    }

    // 6. Age / year
    next.age = state.age + YEARS_PER_STEP;
    next.year = state.year + YEARS_PER_STEP;

    // 7. Net worth
    next.net_worth = finance::net_worth(next.cash, next.investments, &next.debt);

    // 8. Real purchasing power.
    // Cumulative inflation uses the current rate over all elapsed years,
    // not the product of historical rates.
    let cumulative_inflation = (1.0 + state.inflation_rate).powf(next.year);
    next.real_purchasing_power = finance::real_purchasing_power(
        100.0 * (next.net_worth / PURCHASING_POWER_BASELINE),
        cumulative_inflation,
    );

    log::debug!(
        "step age={:.1} cash={:.2} debt={:.2} investments={:.2} net_worth={:.2} rpp={:.2}",
        next.age,
        next.cash,
        next.total_debt(),
        next.investments,
        next.net_worth,
        next.real_purchasing_power,
    );

    (next, report)
}
