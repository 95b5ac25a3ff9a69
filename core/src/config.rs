use crate::state::{DebtBalances, Goal, InterestRates, StartingProfile};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Values every new session starts from, before a profile is chosen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialConditions {
    pub age:              f64,
    pub cash:             f64,
    pub monthly_income:   f64,
    pub monthly_expenses: f64,
    pub credit_score:     f64,
    pub investments:      f64,
    pub stress:           f64,
    pub inflation_rate:   f64,
    pub risk_level:       f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    pub profile:          StartingProfile,
    pub label:            String,
    pub cash:             f64,
    pub monthly_income:   f64,
    pub monthly_expenses: f64,
    pub debt:             DebtBalances,
    pub credit_score:     f64,
    pub investments:      f64,
    pub stress:           f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalConfig {
    pub goal:       Goal,
    pub label:      String,
    pub risk_level: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct SimConfigFile {
    initial:        InitialConditions,
    interest_rates: InterestRates,
    profiles:       Vec<ProfileConfig>,
    goals:          Vec<GoalConfig>,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
    pub initial:        InitialConditions,
    pub interest_rates: InterestRates,
    pub profiles:       HashMap<StartingProfile, ProfileConfig>,
    pub goals:          HashMap<Goal, GoalConfig>,
}

impl SimConfig {
    /// Load from the data/ directory.
    /// In tests, use SimConfig::default_test().
    pub fn load(data_dir: &str) -> anyhow::Result<Self> {
        let path = format!("{data_dir}/config/sim_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let file: SimConfigFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Cannot parse {path}: {e}"))?;

        let config = Self::from_parts(file.initial, file.interest_rates, file.profiles, file.goals);
        for profile in [StartingProfile::Scratch, StartingProfile::SafetyNet, StartingProfile::DebtStart] {
            if !config.profiles.contains_key(&profile) {
                anyhow::bail!("{path}: missing starting profile {profile:?}");
            }
        }
        for goal in [Goal::Stability, Goal::Growth, Goal::Freedom] {
            if !config.goals.contains_key(&goal) {
                anyhow::bail!("{path}: missing goal {goal:?}");
            }
        }
        Ok(config)
    }

    fn from_parts(
        initial: InitialConditions,
        interest_rates: InterestRates,
        profiles: Vec<ProfileConfig>,
        goals: Vec<GoalConfig>,
    ) -> Self {
        Self {
            initial,
            interest_rates,
            profiles: profiles.into_iter().map(|p| (p.profile, p)).collect(),
            goals: goals.into_iter().map(|g| (g.goal, g)).collect(),
        }
    }

    pub fn profile(&self, profile: StartingProfile) -> Option<&ProfileConfig> {
        self.profiles.get(&profile)
    }

    pub fn goal(&self, goal: Goal) -> Option<&GoalConfig> {
        self.goals.get(&goal)
    }

    /// Built-in values matching data/config/sim_config.json.
    pub fn default_test() -> Self {
        let no_debt = DebtBalances::default();
        Self::from_parts(
            InitialConditions {
                age:              22.0,
                cash:             1000.0,
                monthly_income:   2800.0,
                monthly_expenses: 2200.0,
                credit_score:     650.0,
                investments:      0.0,
                stress:           30.0,
                inflation_rate:   0.03,
                risk_level:       30.0,
            },
            InterestRates {
                credit_card:  0.1999,
                student_loan: 0.055,
                auto_loan:    0.065,
                mortgage:     0.065,
            },
            vec![
                ProfileConfig {
                    profile:          StartingProfile::Scratch,
                    label:            "Starting from Scratch".into(),
                    cash:             1000.0,
                    monthly_income:   2800.0,
                    monthly_expenses: 2200.0,
                    debt:             no_debt,
                    credit_score:     650.0,
                    investments:      0.0,
                    stress:           30.0,
                },
                ProfileConfig {
                    profile:          StartingProfile::SafetyNet,
                    label:            "Safety Net".into(),
                    cash:             5000.0,
                    monthly_income:   3200.0,
                    monthly_expenses: 2400.0,
                    debt:             no_debt,
                    credit_score:     700.0,
                    investments:      2000.0,
                    stress:           20.0,
                },
                ProfileConfig {
                    profile:          StartingProfile::DebtStart,
                    label:            "Debt Start".into(),
                    cash:             500.0,
                    monthly_income:   2800.0,
                    monthly_expenses: 2300.0,
                    debt: DebtBalances {
                        credit_card:  2000.0,
                        student_loan: 28000.0,
                        auto_loan:    0.0,
                        mortgage:     0.0,
                    },
                    credit_score: 620.0,
                    investments:  0.0,
                    stress:       45.0,
                },
            ],
            vec![
                GoalConfig { goal: Goal::Stability, label: "Stability".into(), risk_level: 20.0 },
                GoalConfig { goal: Goal::Growth,    label: "Growth".into(),    risk_level: 50.0 },
                GoalConfig { goal: Goal::Freedom,   label: "Freedom".into(),   risk_level: 35.0 },
            ],
        )
    }
}
