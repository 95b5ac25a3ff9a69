//! The decision catalog: static scenario content consumed by the engine.
//!
//! The engine assumes the catalog shape checked by validate():
//! 5 chapters of 6 decisions, 3 choices each, chapters in order.

use crate::{
    clock::{chapter_for_decision, CHAPTER_COUNT, TOTAL_DECISIONS},
    effects::Effects,
    error::{SimError, SimResult},
    types::{ChoiceId, DecisionId, DecisionIndex},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const CHOICES_PER_DECISION: usize = 3;
pub const MAX_EXPLANATION_CHARS: usize = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConceptTag {
    #[serde(rename = "Compound Interest")]
    CompoundInterest,
    #[serde(rename = "Inflation")]
    Inflation,
    #[serde(rename = "Opportunity Cost")]
    OpportunityCost,
    #[serde(rename = "Risk-Return")]
    RiskReturn,
    #[serde(rename = "Diversification")]
    Diversification,
    #[serde(rename = "APR vs APY")]
    AprVsApy,
    #[serde(rename = "Minimum Payments")]
    MinimumPayments,
    #[serde(rename = "Credit Utilization")]
    CreditUtilization,
    #[serde(rename = "Emergency Fund")]
    EmergencyFund,
    #[serde(rename = "Insurance")]
    Insurance,
    #[serde(rename = "Taxes")]
    Taxes,
    #[serde(rename = "Lifestyle Inflation")]
    LifestyleInflation,
    #[serde(rename = "Present Bias")]
    PresentBias,
    #[serde(rename = "Loss Aversion")]
    LossAversion,
    #[serde(rename = "Unemployment")]
    Unemployment,
    #[serde(rename = "Recession")]
    Recession,
    #[serde(rename = "Budgeting")]
    Budgeting,
    #[serde(rename = "Debt Management")]
    DebtManagement,
    #[serde(rename = "Investment Growth")]
    InvestmentGrowth,
    #[serde(rename = "Credit Score")]
    CreditScore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id:             ChoiceId,
    pub label:          String,
    pub short_tradeoff: String,
    pub effects:        Effects,
    pub explanation:    String,
    #[serde(default)]
    pub hidden_cost:    Option<String>,
    #[serde(default)]
    pub educator_note:  Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    pub id:             DecisionId,
    pub chapter:        u32,
    pub title:          String,
    pub scenario_text:  String,
    pub concept_tags:   Vec<ConceptTag>,
    pub why_it_matters: String,
    #[serde(default)]
    pub bias_nudge:     Option<String>,
    pub choices:        Vec<Choice>,
}

impl Decision {
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub number:      u32,
    pub title:       String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionCatalog {
    pub chapters:  Vec<ChapterInfo>,
    pub decisions: Vec<Decision>,
}

impl DecisionCatalog {
    /// Load and validate `decisions/decisions.json` under `data_dir`.
    pub fn load(data_dir: &str) -> SimResult<Self> {
        let path = format!("{data_dir}/decisions/decisions.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let catalog = Self::from_json(&content)?;
        log::debug!("Loaded {} decisions from {path}", catalog.len());
        Ok(catalog)
    }

    pub fn from_json(json: &str) -> SimResult<Self> {
        let catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> SimResult<()> {
        let invalid = |reason: String| Err(SimError::InvalidCatalog { reason });

        if self.decisions.len() != TOTAL_DECISIONS {
            return invalid(format!(
                "expected {TOTAL_DECISIONS} decisions, found {}",
                self.decisions.len()
            ));
        }

        let mut seen = HashSet::new();
        for (index, decision) in self.decisions.iter().enumerate() {
            if !seen.insert(decision.id.as_str()) {
                return invalid(format!("duplicate decision id '{}'", decision.id));
            }
            if !(1..=CHAPTER_COUNT).contains(&decision.chapter) {
                return invalid(format!(
                    "decision '{}' has chapter {} outside 1..={CHAPTER_COUNT}",
                    decision.id, decision.chapter
                ));
            }
            let expected = chapter_for_decision(index);
            if decision.chapter != expected {
                return invalid(format!(
                    "decision '{}' at index {index} belongs to chapter {expected}, not {}",
                    decision.id, decision.chapter
                ));
            }
            if decision.choices.len() != CHOICES_PER_DECISION {
                return invalid(format!(
                    "decision '{}' has {} choices, expected {CHOICES_PER_DECISION}",
                    decision.id,
                    decision.choices.len()
                ));
            }
            let mut choice_ids = HashSet::new();
            for choice in &decision.choices {
                if !choice_ids.insert(choice.id.as_str()) {
                    return invalid(format!(
                        "decision '{}' repeats choice id '{}'",
                        decision.id, choice.id
                    ));
                }
                if choice.explanation.chars().count() > MAX_EXPLANATION_CHARS {
                    return invalid(format!(
                        "choice '{}' explanation exceeds {MAX_EXPLANATION_CHARS} characters",
                        choice.id
                    ));
                }
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }

    pub fn decision(&self, index: DecisionIndex) -> Option<&Decision> {
        self.decisions.get(index)
    }

    /// Position and record of `decision_id`.
    pub fn find(&self, decision_id: &str) -> Option<(DecisionIndex, &Decision)> {
        self.decisions
            .iter()
            .enumerate()
            .find(|(_, d)| d.id == decision_id)
    }

    pub fn find_choice(&self, decision_id: &str, choice_id: &str) -> SimResult<(&Decision, &Choice)> {
        let (_, decision) = self.find(decision_id).ok_or_else(|| SimError::UnknownDecision {
            decision_id: decision_id.to_string(),
        })?;
        let choice = decision.choice(choice_id).ok_or_else(|| SimError::UnknownChoice {
            decision_id: decision_id.to_string(),
            choice_id:   choice_id.to_string(),
        })?;
        Ok((decision, choice))
    }

    pub fn chapter(&self, number: u32) -> Option<&ChapterInfo> {
        self.chapters.iter().find(|c| c.number == number)
    }
}
