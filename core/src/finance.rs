//! Financial math primitives.
//!
//! All rates are annual decimals (0.18 = 18%). All functions are pure.

use crate::{rng::SessionRng, state::DebtBalances};

/// Expected annual return at risk level 0.
pub const BASE_ANNUAL_RETURN: f64 = 0.04;
/// Extra expected annual return at risk level 100.
pub const RISK_RETURN_PREMIUM: f64 = 0.06;
/// Annual volatility at risk level 100.
pub const MAX_VOLATILITY: f64 = 0.15;
/// Annual return lost while a recession is active.
pub const RECESSION_PENALTY: f64 = 0.08;

/// Balance after `months` of monthly compounding.
pub fn compound_interest(principal: f64, annual_rate: f64, months: u32) -> f64 {
    if annual_rate == 0.0 || months == 0 {
        return principal;
    }
    principal * (1.0 + annual_rate / 12.0).powi(months as i32)
}

/// Interest accrued over `months`. Returns the interest only, not the new balance.
pub fn simple_interest(principal: f64, annual_rate: f64, months: u32) -> f64 {
    principal * (annual_rate / 12.0) * f64::from(months)
}

/// Grow `value` by `months` of monthly-compounded inflation.
pub fn adjust_for_inflation(value: f64, annual_rate: f64, months: u32) -> f64 {
    compound_interest(value, annual_rate, months)
}

pub fn real_purchasing_power(nominal_value: f64, cumulative_inflation: f64) -> f64 {
    nominal_value / cumulative_inflation
}

pub fn total_debt(debt: &DebtBalances) -> f64 {
    debt.credit_card + debt.student_loan + debt.auto_loan + debt.mortgage
}

pub fn net_worth(cash: f64, investments: f64, debt: &DebtBalances) -> f64 {
    cash + investments - total_debt(debt)
}

/// Risk-adjusted growth of an investment balance.
///
/// Expected return scales from 4% (risk 0) to 10% (risk 100); one draw from
/// `rng` perturbs it by up to ±15% at risk 100. Consumes exactly one sample.
pub fn investment_growth(
    principal: f64,
    risk_level: f64,
    months: u32,
    rng: &mut SessionRng,
    recession_active: bool,
) -> f64 {
    let risk = risk_level / 100.0;
    let expected = BASE_ANNUAL_RETURN + risk * RISK_RETURN_PREMIUM;
    let volatility = risk * MAX_VOLATILITY;
    let shock = (rng.next_f64() - 0.5) * 2.0 * volatility;
    let penalty = if recession_active { RECESSION_PENALTY } else { 0.0 };

    let annual_return = expected + shock - penalty;
    principal * (1.0 + annual_return / 12.0).powi(months as i32)
}
