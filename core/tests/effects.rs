//! Immediate effect application.

use lifesim_core::{
    apply_effects, config::SimConfig, effects::INFLATION_SPIKE_RATE, Effects, GameState,
};

fn test_state() -> GameState {
    let mut state = GameState::new("test-session-123".into(), 0, &SimConfig::default_test());
    state.cash = 5000.0;
    state.monthly_income = 3000.0;
    state.monthly_expenses = 2000.0;
    state.credit_score = 700.0;
    state.investments = 1000.0;
    state.net_worth = 6000.0;
    state
}

fn assert_net_worth_consistent(state: &GameState) {
    let expected = state.cash + state.investments - state.total_debt();
    assert_eq!(state.net_worth, expected, "net worth out of sync");
}

#[test]
fn cash_delta_is_added() {
    let state = test_state();
    let next = apply_effects(&state, &Effects { cash: Some(500.0), ..Default::default() });
    assert_eq!(next.cash, 5500.0);
    assert_net_worth_consistent(&next);
}

#[test]
fn cash_never_goes_negative() {
    let mut state = test_state();
    state.cash = 500.0;
    let next = apply_effects(&state, &Effects { cash: Some(-1000.0), ..Default::default() });
    assert_eq!(next.cash, 0.0);
    assert_net_worth_consistent(&next);
}

#[test]
fn credit_score_is_clamped() {
    let state = test_state();
    let high = apply_effects(&state, &Effects { credit_score: Some(200.0), ..Default::default() });
    assert_eq!(high.credit_score, 850.0);

    let low = apply_effects(&state, &Effects { credit_score: Some(-900.0), ..Default::default() });
    assert_eq!(low.credit_score, 300.0);
}

#[test]
fn stress_and_risk_are_clamped() {
    let mut state = test_state();
    state.stress = 90.0;
    state.risk_level = 5.0;
    let next = apply_effects(
        &state,
        &Effects { stress: Some(20.0), risk_level: Some(-30.0), ..Default::default() },
    );
    assert_eq!(next.stress, 100.0);
    assert_eq!(next.risk_level, 0.0);
}

#[test]
fn debts_and_rates_floor_at_zero() {
    let mut state = test_state();
    state.debt.credit_card = 300.0;
    state.debt.mortgage = 100_000.0;
    let next = apply_effects(
        &state,
        &Effects {
            credit_card_debt: Some(-1000.0),
            student_loan: Some(25_000.0),
            auto_loan: Some(-5.0),
            mortgage: Some(-1000.0),
            monthly_income: Some(-5000.0),
            monthly_expenses: Some(-3000.0),
            investments: Some(-2000.0),
            ..Default::default()
        },
    );
    assert_eq!(next.debt.credit_card, 0.0);
    assert_eq!(next.debt.student_loan, 25_000.0);
    assert_eq!(next.debt.auto_loan, 0.0);
    assert_eq!(next.debt.mortgage, 99_000.0);
    assert_eq!(next.monthly_income, 0.0);
    assert_eq!(next.monthly_expenses, 0.0);
    assert_eq!(next.investments, 0.0);
    assert_net_worth_consistent(&next);
}

#[test]
fn absent_fields_leave_state_untouched() {
    let mut state = test_state();
    state.stress = 250.0; // out of range on purpose
    let next = apply_effects(&state, &Effects::default());
    assert_eq!(next.stress, 250.0, "absent field must not clamp");

    let clamped = apply_effects(&state, &Effects { stress: Some(0.0), ..Default::default() });
    assert_eq!(clamped.stress, 100.0, "zero delta still clamps");
}

#[test]
fn inflation_rate_is_absolute_not_delta() {
    let state = test_state();
    let next = apply_effects(&state, &Effects { inflation_rate: Some(0.05), ..Default::default() });
    assert_eq!(next.inflation_rate, 0.05);

    let floored = apply_effects(&state, &Effects { inflation_rate: Some(-0.02), ..Default::default() });
    assert_eq!(floored.inflation_rate, 0.0);
}

#[test]
fn long_term_choice_increments_counter() {
    let state = test_state();
    let effects = Effects { long_term_choice: true, ..Default::default() };
    let once = apply_effects(&state, &effects);
    let twice = apply_effects(&once, &effects);
    assert_eq!(once.long_term_choices, 1);
    assert_eq!(twice.long_term_choices, 2);
}

#[test]
fn recession_trigger_is_sticky() {
    let state = test_state();
    let next = apply_effects(&state, &Effects { trigger_recession: true, ..Default::default() });
    assert!(next.recession_active);

    let later = apply_effects(&next, &Effects::default());
    assert!(later.recession_active);
}

#[test]
fn inflation_spike_forces_rate() {
    let state = test_state();
    let next = apply_effects(
        &state,
        &Effects {
            trigger_inflation_spike: true,
            inflation_rate: Some(0.02),
            ..Default::default()
        },
    );
    assert!(next.inflation_spike_active);
    assert_eq!(next.inflation_rate, INFLATION_SPIKE_RATE);
}

#[test]
fn input_state_is_not_mutated() {
    let state = test_state();
    let before = state.clone();
    let _ = apply_effects(&state, &Effects { cash: Some(-99_999.0), ..Default::default() });
    assert_eq!(state, before);
}

#[test]
fn unknown_effect_fields_are_rejected() {
    let parsed: Result<Effects, _> = serde_json::from_str(r#"{ "cash": 10, "yacht": 1 }"#);
    assert!(parsed.is_err());

    let parsed: Effects = serde_json::from_str(r#"{ "cash": -800, "investments": 1000 }"#)
        .expect("valid bundle");
    assert_eq!(parsed.cash, Some(-800.0));
    assert_eq!(parsed.stress, None);
    assert!(!parsed.long_term_choice);
}
