//! The session: sole owner of the live GameState.
//!
//! A Session is a reducer: every change arrives as a PlayerCommand,
//! is computed against the current state without mutating it, and is
//! committed together with the events it produced. A command that
//! fails leaves both the state and the event log untouched.
//!
//! MAKE-CHOICE ORDER (fixed, documented, never reordered):
//!   1. Resolve decision + choice from the catalog
//!   2. Snapshot the pre-choice state
//!   3. Apply the choice's effects
//!   4. Advance time with the RNG for (session_id, decision index)
//!   5. Final-chapter inflation shock check
//!   6. Advance the decision index, then evaluate badges
//!   7. Append history + choice record, mark completion

use crate::{
    badge::{evaluate_badges, newly_unlocked, BadgeId},
    catalog::{ChapterInfo, Decision, DecisionCatalog},
    clock::SHOCK_CHAPTER_START,
    command::PlayerCommand,
    config::SimConfig,
    effects::{apply_effects, INFLATION_SPIKE_RATE},
    engine::advance_time_with_report,
    error::{SimError, SimResult},
    event::{EventLogEntry, Scenario, SimEvent},
    finance,
    rng::{create_seed, SessionRng},
    snapshot::{take_snapshot, undo},
    state::{ChoiceRecord, GameState, Goal, StartingProfile},
    takeaway::{generate_takeaways, Takeaway},
    types::{DecisionIndex, SessionId},
};

pub struct Session {
    state:     GameState,
    config:    SimConfig,
    catalog:   DecisionCatalog,
    event_log: Vec<EventLogEntry>,
}

impl Session {
    /// Start a session with a fresh random id and the current time.
    pub fn new(config: SimConfig, catalog: DecisionCatalog) -> SimResult<Self> {
        Self::with_session_id(fresh_session_id(), now_millis(), config, catalog)
    }

    /// Start a session with a caller-chosen id. Replays of the same id
    /// and command sequence are bit-for-bit identical.
    pub fn with_session_id(
        session_id: SessionId,
        started_at: i64,
        config: SimConfig,
        catalog: DecisionCatalog,
    ) -> SimResult<Self> {
        let state = GameState::new(session_id.clone(), started_at, &config);
        let mut session = Self {
            state,
            config,
            catalog,
            event_log: Vec::new(),
        };
        let events = vec![SimEvent::SessionStarted { session_id }];
        let entries = log_entries(&events, 0, 0)?;
        session.event_log.extend(entries);
        Ok(session)
    }

    /// Load config and catalog from `data_dir` and start a session.
    pub fn load(data_dir: &str) -> SimResult<Self> {
        let config = SimConfig::load(data_dir)?;
        let catalog = DecisionCatalog::load(data_dir)?;
        Self::new(config, catalog)
    }

    /// Resume from a state the host saved earlier.
    ///
    /// The event log is not part of GameState, so it starts empty and the
    /// next entry gets seq 0. Hosts that keep an earlier log must offset
    /// the new entries themselves.
    pub fn resume(state: GameState, config: SimConfig, catalog: DecisionCatalog) -> Self {
        Self {
            state,
            config,
            catalog,
            event_log: Vec::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn catalog(&self) -> &DecisionCatalog {
        &self.catalog
    }

    pub fn event_log(&self) -> &[EventLogEntry] {
        &self.event_log
    }

    pub fn session_id(&self) -> &str {
        &self.state.session_id
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    /// The decision awaiting a choice, if the run is not over.
    pub fn current_decision(&self) -> Option<&Decision> {
        self.catalog.decision(self.state.current_decision)
    }

    pub fn current_chapter(&self) -> Option<&ChapterInfo> {
        self.catalog.chapter(self.state.chapter())
    }

    pub fn progress(&self) -> f64 {
        self.state.progress(self.catalog.len())
    }

    pub fn takeaways(&self) -> Vec<Takeaway> {
        generate_takeaways(&self.state)
    }

    // ── Commands ───────────────────────────────────────────────

    /// Apply one command and return the events it produced.
    pub fn dispatch(&mut self, command: PlayerCommand) -> SimResult<Vec<SimEvent>> {
        let (next, events) = match &command {
            PlayerCommand::SetProfile { profile } => self.reduce_profile(*profile)?,
            PlayerCommand::SetGoal { goal } => self.reduce_goal(*goal)?,
            PlayerCommand::SetEducatorMode { enabled } => {
                let mut next = self.state.clone();
                next.educator_mode = *enabled;
                (next, vec![SimEvent::EducatorModeChanged { enabled: *enabled }])
            }
            PlayerCommand::MakeChoice { decision_id, choice_id } => {
                self.reduce_choice(decision_id, choice_id)?
            }
            PlayerCommand::Undo => self.reduce_undo(),
            PlayerCommand::Reset => {
                let session_id = fresh_session_id();
                log::info!("Session reset: {} -> {session_id}", self.state.session_id);
                let next = GameState::new(session_id.clone(), now_millis(), &self.config);
                (next, vec![SimEvent::SessionStarted { session_id }])
            }
            PlayerCommand::GoToDecision { index } => self.reduce_go_to(*index)?,
        };

        // A reset starts a new log.
        let restart = matches!(command, PlayerCommand::Reset);
        let base = if restart { 0 } else { self.event_log.len() as u64 };
        let entries = log_entries(&events, base, next.current_decision)?;
        if restart {
            self.event_log.clear();
        }
        self.state = next;
        self.event_log.extend(entries);
        Ok(events)
    }

    pub fn set_profile(&mut self, profile: StartingProfile) -> SimResult<()> {
        self.dispatch(PlayerCommand::SetProfile { profile }).map(|_| ())
    }

    pub fn set_goal(&mut self, goal: Goal) -> SimResult<()> {
        self.dispatch(PlayerCommand::SetGoal { goal }).map(|_| ())
    }

    pub fn set_educator_mode(&mut self, enabled: bool) -> SimResult<()> {
        self.dispatch(PlayerCommand::SetEducatorMode { enabled }).map(|_| ())
    }

    /// Make a choice and return the badges it unlocked.
    pub fn make_choice(&mut self, decision_id: &str, choice_id: &str) -> SimResult<Vec<BadgeId>> {
        let events = self.dispatch(PlayerCommand::MakeChoice {
            decision_id: decision_id.to_string(),
            choice_id:   choice_id.to_string(),
        })?;
        Ok(events
            .into_iter()
            .filter_map(|e| match e {
                SimEvent::BadgeUnlocked { badge, .. } => Some(badge),
                _ => None,
            })
            .collect())
    }

    /// Undo the last choice. Returns false when there is nothing to undo.
    pub fn undo_last_choice(&mut self) -> SimResult<bool> {
        let events = self.dispatch(PlayerCommand::Undo)?;
        Ok(!events.is_empty())
    }

    pub fn reset(&mut self) -> SimResult<()> {
        self.dispatch(PlayerCommand::Reset).map(|_| ())
    }

    pub fn go_to_decision(&mut self, index: DecisionIndex) -> SimResult<()> {
        self.dispatch(PlayerCommand::GoToDecision { index }).map(|_| ())
    }

    // ── Reducers ───────────────────────────────────────────────

    fn reduce_profile(&self, profile: StartingProfile) -> SimResult<(GameState, Vec<SimEvent>)> {
        let cfg = self
            .config
            .profile(profile)
            .ok_or_else(|| anyhow::anyhow!("No configuration for profile {profile:?}"))?;

        let mut next = self.state.clone();
        next.profile = Some(profile);
        next.cash = cfg.cash;
        next.monthly_income = cfg.monthly_income;
        next.monthly_expenses = cfg.monthly_expenses;
        next.debt = cfg.debt;
        next.credit_score = cfg.credit_score;
        next.investments = cfg.investments;
        next.stress = cfg.stress;
        next.net_worth = finance::net_worth(next.cash, next.investments, &next.debt);
        Ok((next, vec![SimEvent::ProfileSelected { profile }]))
    }

    fn reduce_goal(&self, goal: Goal) -> SimResult<(GameState, Vec<SimEvent>)> {
        let cfg = self
            .config
            .goal(goal)
            .ok_or_else(|| anyhow::anyhow!("No configuration for goal {goal:?}"))?;

        let mut next = self.state.clone();
        next.goal = Some(goal);
        next.risk_level = cfg.risk_level;
        Ok((next, vec![SimEvent::GoalSelected { goal, risk_level: cfg.risk_level }]))
    }

    fn reduce_choice(
        &self,
        decision_id: &str,
        choice_id: &str,
    ) -> SimResult<(GameState, Vec<SimEvent>)> {
        let state = &self.state;
        if state.completed {
            return Err(SimError::RunCompleted);
        }
        let (decision, choice) = self.catalog.find_choice(decision_id, choice_id)?;

        let index = state.current_decision;
        if self.catalog.decision(index).map(|d| d.id.as_str()) != Some(decision_id) {
            log::warn!("Decision '{decision_id}' chosen at index {index}, out of catalog order");
        }

        let snapshot = take_snapshot(state, &decision.id);
        let after_choice = apply_effects(state, &choice.effects);

        let seed = create_seed(&state.session_id, index);
        let mut rng = SessionRng::new(seed);
        let (mut next, report) = advance_time_with_report(&after_choice, &mut rng);

        let mut events = vec![
            SimEvent::ChoiceMade {
                decision_index: index,
                decision_id:    decision.id.clone(),
                choice_id:      choice.id.clone(),
            },
            SimEvent::TimeStepCompleted {
                decision_index:    index,
                seed,
                cash:              next.cash,
                net_worth:         next.net_worth,
                investment_change: report.investment_change,
                interest_accrued:  report.interest_accrued,
            },
        ];
        if let Some(amount) = report.shortfall {
            events.push(SimEvent::CashShortfallCharged { decision_index: index, amount });
        }
        if after_choice.recession_active && !state.recession_active {
            events.push(SimEvent::ScenarioTriggered {
                decision_index: index,
                scenario:       Scenario::Recession,
            });
        }
        if after_choice.inflation_spike_active && !state.inflation_spike_active {
            events.push(SimEvent::ScenarioTriggered {
                decision_index: index,
                scenario:       Scenario::InflationSpike,
            });
        }

        let next_index = index + 1;

        // Entering the final chapter without an emergency fund brings an inflation spike.
        if next_index == SHOCK_CHAPTER_START && !next.inflation_spike_active && !next.has_emergency_fund() {
            next.inflation_spike_active = true;
            next.inflation_rate = INFLATION_SPIKE_RATE;
            log::info!("Inflation spike triggered entering decision {next_index}");
            events.push(SimEvent::ScenarioTriggered {
                decision_index: index,
                scenario:       Scenario::InflationSpike,
            });
        }

        next.current_decision = next_index;
        next.badges = evaluate_badges(&next);
        for badge in newly_unlocked(&state.badges, &next.badges) {
            log::info!("Badge unlocked at decision {next_index}: {}", badge.name());
            events.push(SimEvent::BadgeUnlocked { decision_index: next_index, badge });
        }

        next.history.push(snapshot);
        next.choices_made.push(ChoiceRecord {
            decision_id: decision.id.clone(),
            choice_id:   choice.id.clone(),
        });
        next.completed = next_index >= self.catalog.len();
        if next.completed {
            log::info!(
                "Run {} completed: net worth {:.2}",
                next.session_id,
                next.net_worth
            );
            events.push(SimEvent::RunCompleted { net_worth: next.net_worth });
        }

        Ok((next, events))
    }

    fn reduce_undo(&self) -> (GameState, Vec<SimEvent>) {
        match (self.state.history.last(), undo(&self.state)) {
            (Some(last), Some(prev)) => {
                let events = vec![SimEvent::ChoiceUndone {
                    decision_index: prev.current_decision,
                    decision_id:    last.decision_id.clone(),
                }];
                (prev, events)
            }
            _ => {
                log::debug!("Undo ignored: history is empty");
                (self.state.clone(), Vec::new())
            }
        }
    }

    fn reduce_go_to(&self, index: DecisionIndex) -> SimResult<(GameState, Vec<SimEvent>)> {
        if !self.state.educator_mode {
            return Err(SimError::EducatorModeRequired);
        }
        let max = self.state.current_decision.min(self.catalog.len().saturating_sub(1));
        if index > max {
            return Err(SimError::DecisionOutOfRange { index, max });
        }
        let mut next = self.state.clone();
        next.current_decision = index;
        // Revisiting reopens a finished run so the decision can be replayed.
        next.completed = index >= self.catalog.len();
        Ok((next, vec![SimEvent::DecisionRevisited { decision_index: index }]))
    }
}

fn log_entries(
    events: &[SimEvent],
    base: u64,
    decision_index: DecisionIndex,
) -> SimResult<Vec<EventLogEntry>> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            Ok(EventLogEntry {
                seq:        base + i as u64,
                decision_index,
                event_type: event.type_name().to_string(),
                payload:    serde_json::to_string(event)?,
            })
        })
        .collect()
}

fn fresh_session_id() -> SessionId {
    uuid::Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
