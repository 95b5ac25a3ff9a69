//! End-of-run lessons derived from the final state.

use crate::{
    catalog::ConceptTag,
    format::format_currency_full,
    state::{GameState, StartingProfile},
};
use serde::{Deserialize, Serialize};

pub const MAX_TAKEAWAYS: usize = 6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Takeaway {
    pub title:       String,
    pub description: String,
    pub concept_tag: ConceptTag,
}

impl Takeaway {
    fn new(title: &str, description: impl Into<String>, concept_tag: ConceptTag) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            concept_tag,
        }
    }
}

/// Up to MAX_TAKEAWAYS lessons, padded from a default list without
/// repeating a concept tag.
pub fn generate_takeaways(state: &GameState) -> Vec<Takeaway> {
    let mut takeaways = Vec::new();

    if state.investments > 5_000.0 {
        takeaways.push(Takeaway::new(
            "The Power of Compound Growth",
            format!(
                "Your investments grew to {}. Starting early and staying invested lets compound interest work its magic over time.",
                format_currency_full(state.investments)
            ),
            ConceptTag::CompoundInterest,
        ));
    }

    let total_debt = state.total_debt();
    if total_debt < 10_000.0 && state.profile == Some(StartingProfile::DebtStart) {
        takeaways.push(Takeaway::new(
            "Debt Freedom Achieved",
            "You started with significant debt but made choices that prioritized paying it down. High-interest debt is a wealth destroyer.",
            ConceptTag::DebtManagement,
        ));
    } else if total_debt > 50_000.0 {
        takeaways.push(Takeaway::new(
            "The Weight of Debt",
            format!(
                "You accumulated {} in debt. Remember: compound interest works against you with debt, especially at high rates.",
                format_currency_full(total_debt)
            ),
            ConceptTag::MinimumPayments,
        ));
    }

    if state.credit_score >= 720.0 {
        takeaways.push(Takeaway::new(
            "Credit Builder Success",
            "Your credit score reached excellent status. Good credit opens doors to better rates on mortgages, cars, and more.",
            ConceptTag::CreditScore,
        ));
    }

    if state.has_emergency_fund() {
        takeaways.push(Takeaway::new(
            "Emergency Fund Protected You",
            "Having 3+ months of expenses saved provided a safety net during life's uncertainties. This is foundational to financial security.",
            ConceptTag::EmergencyFund,
        ));
    } else {
        takeaways.push(Takeaway::new(
            "Emergency Fund Lesson",
            "Without adequate savings, unexpected expenses forced you into debt. An emergency fund is your first line of financial defense.",
            ConceptTag::EmergencyFund,
        ));
    }

    if state.stress > 60.0 {
        takeaways.push(Takeaway::new(
            "Financial Stress Takes a Toll",
            "High financial stress affects health, relationships, and decision-making. Building security reduces this burden over time.",
            ConceptTag::Budgeting,
        ));
    }

    if state.long_term_choices >= 5 {
        takeaways.push(Takeaway::new(
            "Future-Focused Mindset",
            "You consistently chose long-term benefits over immediate gratification. This anti-present-bias thinking is key to building wealth.",
            ConceptTag::PresentBias,
        ));
    }

    if state.inflation_spike_active {
        takeaways.push(Takeaway::new(
            "Inflation: The Silent Tax",
            "You experienced how inflation erodes purchasing power. Investments in stocks historically beat inflation; cash loses value over time.",
            ConceptTag::Inflation,
        ));
    }

    for fallback in default_takeaways() {
        if takeaways.len() >= MAX_TAKEAWAYS {
            break;
        }
        if !takeaways.iter().any(|t| t.concept_tag == fallback.concept_tag) {
            takeaways.push(fallback);
        }
    }

    takeaways.truncate(MAX_TAKEAWAYS);
    takeaways
}

fn default_takeaways() -> [Takeaway; 3] {
    [
        Takeaway::new(
            "Pay Yourself First",
            "Automating savings before spending ensures you build wealth consistently. Even small amounts compound significantly over decades.",
            ConceptTag::Budgeting,
        ),
        Takeaway::new(
            "Understand Your Risk Tolerance",
            "Your investment strategy should match your ability to handle volatility. Higher returns require accepting higher short-term risk.",
            ConceptTag::RiskReturn,
        ),
        Takeaway::new(
            "Insurance Protects What You Build",
            "Proper insurance coverage transfers catastrophic risks to insurance companies. Protect against disasters, not minor inconveniences.",
            ConceptTag::Insurance,
        ),
    ]
}
