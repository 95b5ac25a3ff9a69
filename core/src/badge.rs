//! Achievement badges.
//!
//! RULE: A badge is a one-way latch. Once unlocked it is never
//! re-evaluated, even if its predicate later stops holding.

use crate::{state::GameState, types::DecisionIndex};
use serde::{Deserialize, Serialize};

pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;
pub const INVESTOR_THRESHOLD: f64 = 1_000.0;
pub const CREDIT_BUILDER_SCORE: f64 = 720.0;
pub const LONG_TERM_CHOICES_REQUIRED: u32 = 5;

/// Badge identities. Order is display order: append only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeId {
    EmergencyReady,
    DebtSlayer,
    Investor,
    CreditBuilder,
    AntiPresentBias,
}

impl BadgeId {
    pub const ALL: [BadgeId; 5] = [
        BadgeId::EmergencyReady,
        BadgeId::DebtSlayer,
        BadgeId::Investor,
        BadgeId::CreditBuilder,
        BadgeId::AntiPresentBias,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::EmergencyReady  => "Emergency Ready",
            Self::DebtSlayer      => "Debt Slayer",
            Self::Investor        => "Investor",
            Self::CreditBuilder   => "Credit Builder",
            Self::AntiPresentBias => "Future Thinker",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::EmergencyReady  => "Built an emergency fund covering 3+ months of expenses",
            Self::DebtSlayer      => "Paid off all credit card debt",
            Self::Investor        => "Grew investments to over $1,000",
            Self::CreditBuilder   => "Achieved a credit score of 720 or higher",
            Self::AntiPresentBias => "Chose long-term benefits over immediate gratification 5 times",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::EmergencyReady  => "🛡️",
            Self::DebtSlayer      => "⚔️",
            Self::Investor        => "📈",
            Self::CreditBuilder   => "⭐",
            Self::AntiPresentBias => "🔮",
        }
    }

    /// Whether the unlock condition holds for `state`.
    pub fn is_earned(&self, state: &GameState) -> bool {
        match self {
            Self::EmergencyReady => {
                // Zero expenses count as 1 so the threshold is never zero.
                let expenses = if state.monthly_expenses == 0.0 { 1.0 } else { state.monthly_expenses };
                state.cash >= expenses * EMERGENCY_FUND_MONTHS
            }
            Self::DebtSlayer => state.debt.credit_card == 0.0 && state.current_decision > 0,
            Self::Investor => state.investments >= INVESTOR_THRESHOLD,
            Self::CreditBuilder => state.credit_score >= CREDIT_BUILDER_SCORE,
            Self::AntiPresentBias => state.long_term_choices >= LONG_TERM_CHOICES_REQUIRED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id:          BadgeId,
    pub unlocked:    bool,
    /// Decision index at which the badge was unlocked.
    pub unlocked_at: Option<DecisionIndex>,
}

impl Badge {
    pub fn locked(id: BadgeId) -> Self {
        Self { id, unlocked: false, unlocked_at: None }
    }
}

pub fn initial_badges() -> Vec<Badge> {
    BadgeId::ALL.into_iter().map(Badge::locked).collect()
}

/// Latch every badge whose condition now holds.
pub fn evaluate_badges(state: &GameState) -> Vec<Badge> {
    state
        .badges
        .iter()
        .map(|badge| {
            if !badge.unlocked && badge.id.is_earned(state) {
                Badge {
                    id:          badge.id,
                    unlocked:    true,
                    unlocked_at: Some(state.current_decision),
                }
            } else {
                badge.clone()
            }
        })
        .collect()
}

/// Badges unlocked in `after` that were still locked in `before`.
pub fn newly_unlocked(before: &[Badge], after: &[Badge]) -> Vec<BadgeId> {
    after
        .iter()
        .filter(|b| b.unlocked)
        .filter(|b| !before.iter().any(|old| old.id == b.id && old.unlocked))
        .map(|b| b.id)
        .collect()
}
