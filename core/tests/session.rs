//! Session reducer: commands, ordering, shocks and the event log.

use lifesim_core::{
    catalog::DecisionCatalog,
    config::SimConfig,
    state::{Goal, StartingProfile},
    BadgeId, GameState, Session, SimError,
};
use std::collections::HashSet;

const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../data");

fn parts() -> (SimConfig, DecisionCatalog) {
    let config = SimConfig::load(DATA_DIR).expect("config loads");
    let catalog = DecisionCatalog::load(DATA_DIR).expect("catalog loads");
    (config, catalog)
}

fn new_session(id: &str) -> Session {
    let _ = env_logger::builder().is_test(true).try_init();
    let (config, catalog) = parts();
    Session::with_session_id(id.into(), 0, config, catalog).expect("session")
}

/// Choose option `i % 3` at every remaining decision.
fn play_to_end(session: &mut Session) {
    while let Some(decision) = session.current_decision() {
        let index = session.state().current_decision;
        let decision_id = decision.id.clone();
        let choice_id = decision.choices[index % 3].id.clone();
        session.make_choice(&decision_id, &choice_id).expect("choice applies");
    }
}

#[test]
fn new_session_logs_its_start() {
    let session = new_session("session-start");
    assert_eq!(session.session_id(), "session-start");
    assert_eq!(session.event_log().len(), 1);
    assert_eq!(session.event_log()[0].event_type, "session_started");
    assert_eq!(session.state().current_decision, 0);
    assert_eq!(session.progress(), 0.0);
}

#[test]
fn generated_session_ids_are_unique() {
    let (config, catalog) = parts();
    let a = Session::new(config.clone(), catalog.clone()).expect("session");
    let b = Session::new(config, catalog).expect("session");
    assert_ne!(a.session_id(), b.session_id());
}

#[test]
fn profile_sets_starting_finances() {
    let mut session = new_session("profile");
    session.set_profile(StartingProfile::DebtStart).expect("profile");
    let state = session.state();
    assert_eq!(state.profile, Some(StartingProfile::DebtStart));
    assert_eq!(state.cash, 500.0);
    assert_eq!(state.debt.credit_card, 2_000.0);
    assert_eq!(state.debt.student_loan, 28_000.0);
    assert_eq!(state.net_worth, -29_500.0);
}

#[test]
fn goal_sets_risk_level() {
    let mut session = new_session("goal");
    session.set_goal(Goal::Growth).expect("goal");
    assert_eq!(session.state().risk_level, 50.0);
    session.set_goal(Goal::Stability).expect("goal");
    assert_eq!(session.state().risk_level, 20.0);
}

#[test]
fn unknown_decision_or_choice_changes_nothing() {
    let mut session = new_session("unknown");
    let before = session.state().clone();
    let log_len = session.event_log().len();

    assert!(matches!(
        session.make_choice("nope", "ch1-d1-a"),
        Err(SimError::UnknownDecision { .. })
    ));
    assert!(matches!(
        session.make_choice("ch1-d1", "ch1-d1-z"),
        Err(SimError::UnknownChoice { .. })
    ));
    assert_eq!(session.state(), &before);
    assert_eq!(session.event_log().len(), log_len);
}

#[test]
fn first_choice_advances_and_unlocks_badges() {
    let mut session = new_session("first-choice");
    session.set_profile(StartingProfile::SafetyNet).expect("profile");
    session.set_goal(Goal::Growth).expect("goal");

    let unlocked = session.make_choice("ch1-d1", "ch1-d1-a").expect("choice");
    let state = session.state();

    assert_eq!(state.current_decision, 1);
    assert_eq!(state.age, 22.5);
    assert_eq!(state.year, 0.5);
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].decision_id, "ch1-d1");
    assert_eq!(state.history[0].cash, 5_000.0, "snapshot is the pre-choice state");
    assert_eq!(state.choices_made.len(), 1);
    assert_eq!(state.long_term_choices, 1);
    assert_eq!(state.cash, 5_000.0 + 560.0 - 600.0 * 6.0);

    assert!(unlocked.contains(&BadgeId::Investor));
    assert!(unlocked.contains(&BadgeId::DebtSlayer));
    assert!(!unlocked.contains(&BadgeId::EmergencyReady));

    let types: Vec<_> = session.event_log().iter().map(|e| e.event_type.as_str()).collect();
    assert!(types.contains(&"choice_made"));
    assert!(types.contains(&"time_step_completed"));
    assert!(types.contains(&"badge_unlocked"));

    let seqs: Vec<u64> = session.event_log().iter().map(|e| e.seq).collect();
    let expected: Vec<u64> = (0..seqs.len() as u64).collect();
    assert_eq!(seqs, expected);
}

#[test]
fn full_run_completes_after_thirty_choices() {
    let mut session = new_session("full-run");
    session.set_profile(StartingProfile::Scratch).expect("profile");
    session.set_goal(Goal::Freedom).expect("goal");

    let mut chapters = HashSet::new();
    while let Some(decision) = session.current_decision() {
        chapters.insert(decision.chapter);
        let index = session.state().current_decision;
        let (decision_id, choice_id) = (decision.id.clone(), decision.choices[index % 3].id.clone());
        session.make_choice(&decision_id, &choice_id).expect("choice");
    }

    assert_eq!(chapters.len(), 5);
    assert!(session.is_completed());
    assert_eq!(session.state().current_decision, 30);
    assert_eq!(session.state().history.len(), 30);
    assert_eq!(session.state().age, 37.0);
    assert_eq!(session.progress(), 100.0);
    assert!(session
        .event_log()
        .iter()
        .any(|e| e.event_type == "run_completed"));

    assert!(matches!(
        session.make_choice("ch5-d6", "ch5-d6-a"),
        Err(SimError::RunCompleted)
    ));
}

#[test]
fn takeaways_are_bounded_and_distinct() {
    let mut session = new_session("takeaways");
    play_to_end(&mut session);

    let takeaways = session.takeaways();
    assert!(!takeaways.is_empty());
    assert!(takeaways.len() <= 6);
    let tags: HashSet<_> = takeaways.iter().map(|t| t.concept_tag).collect();
    assert_eq!(tags.len(), takeaways.len());
}

fn state_before_final_chapter(cash: f64) -> GameState {
    let (config, _) = parts();
    let mut state = GameState::new("shock-test".into(), 0, &config);
    state.current_decision = 23;
    state.age = 33.5;
    state.year = 11.5;
    state.cash = cash;
    state
}

#[test]
fn final_chapter_shock_without_emergency_fund() {
    let (config, catalog) = parts();
    let mut session = Session::resume(state_before_final_chapter(0.0), config, catalog);

    session.make_choice("ch4-d6", "ch4-d6-c").expect("choice");
    let state = session.state();
    assert_eq!(state.current_decision, 24);
    assert!(state.inflation_spike_active);
    assert_eq!(state.inflation_rate, 0.08);
    assert!(session
        .event_log()
        .iter()
        .any(|e| e.event_type == "scenario_triggered"));
}

#[test]
fn final_chapter_shock_skipped_with_emergency_fund() {
    let (config, catalog) = parts();
    let mut session = Session::resume(state_before_final_chapter(100_000.0), config, catalog);

    session.make_choice("ch4-d6", "ch4-d6-c").expect("choice");
    let state = session.state();
    assert!(!state.inflation_spike_active);
    assert_eq!(state.inflation_rate, 0.03);
}

#[test]
fn undo_after_choices() {
    let mut session = new_session("undo");
    assert!(!session.undo_last_choice().expect("undo"), "nothing to undo yet");
    assert_eq!(session.event_log().len(), 1);

    for (d, c) in [("ch1-d1", "ch1-d1-a"), ("ch1-d2", "ch1-d2-b"), ("ch1-d3", "ch1-d3-c")] {
        session.make_choice(d, c).expect("choice");
    }
    let before = session.state().clone();
    let last = before.history.last().cloned().expect("history");

    assert!(session.undo_last_choice().expect("undo"));
    let state = session.state();
    assert_eq!(state.current_decision, 2);
    assert_eq!(state.cash, last.cash);
    assert_eq!(state.debt, last.debt);
    assert_eq!(state.age, last.age);
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.choices_made.len(), 2);
    assert_eq!(state.badges, before.badges);
    assert_eq!(state.long_term_choices, before.long_term_choices);
    assert_eq!(
        session.event_log().last().map(|e| e.event_type.as_str()),
        Some("choice_undone")
    );
}

#[test]
fn go_to_decision_requires_educator_mode() {
    let mut session = new_session("goto");
    assert!(matches!(
        session.go_to_decision(0),
        Err(SimError::EducatorModeRequired)
    ));

    session.set_educator_mode(true).expect("educator");
    session.go_to_decision(0).expect("current decision is reachable");
    assert!(matches!(
        session.go_to_decision(1),
        Err(SimError::DecisionOutOfRange { index: 1, max: 0 })
    ));

    for (d, c) in [("ch1-d1", "ch1-d1-a"), ("ch1-d2", "ch1-d2-a"), ("ch1-d3", "ch1-d3-a")] {
        session.make_choice(d, c).expect("choice");
    }
    session.go_to_decision(1).expect("earlier decision");
    assert_eq!(session.state().current_decision, 1);
    assert_eq!(
        session.current_decision().map(|d| d.id.as_str()),
        Some("ch1-d2")
    );
}

#[test]
fn reset_starts_a_fresh_session() {
    let mut session = new_session("reset-me");
    session.set_profile(StartingProfile::SafetyNet).expect("profile");
    session.make_choice("ch1-d1", "ch1-d1-b").expect("choice");

    session.reset().expect("reset");
    let state = session.state();
    assert_ne!(state.session_id, "reset-me");
    assert_eq!(state.current_decision, 0);
    assert_eq!(state.profile, None);
    assert!(state.history.is_empty());
    assert_eq!(session.event_log().len(), 1);
    assert_eq!(session.event_log()[0].seq, 0);
}

#[test]
fn revisiting_a_finished_run_allows_replay() {
    let mut session = new_session("replay-after-finish");
    session.set_educator_mode(true).expect("educator");
    play_to_end(&mut session);
    assert!(session.is_completed());

    session.go_to_decision(5).expect("go to earlier decision");
    assert_eq!(session.state().current_decision, 5);
    assert!(!session.is_completed());
    assert_eq!(
        session.current_decision().map(|d| d.id.as_str()),
        Some("ch1-d6")
    );

    session.make_choice("ch1-d6", "ch1-d6-a").expect("replayed choice applies");
    assert_eq!(session.state().current_decision, 6);
    assert!(!session.is_completed());
}

#[test]
fn resumed_session_starts_an_empty_log() {
    let (config, catalog) = parts();
    let saved = new_session("resume-me").into_state();
    let mut session = Session::resume(saved, config, catalog);
    assert!(session.event_log().is_empty());
    assert_eq!(session.session_id(), "resume-me");

    session.make_choice("ch1-d1", "ch1-d1-a").expect("choice");
    assert_eq!(session.event_log()[0].seq, 0);
    assert_eq!(session.event_log()[0].event_type, "choice_made");
}
