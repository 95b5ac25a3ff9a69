//! sim-runner: headless driver for the life-choices simulation.
//!
//! Usage:
//!   sim-runner --session demo --profile debt_start --goal growth --strategy long-term
//!   sim-runner --data-dir ./data --ipc-mode

use anyhow::{bail, Result};
use lifesim_core::{
    badge::BadgeId,
    catalog::{Decision, DecisionCatalog},
    command::PlayerCommand,
    config::SimConfig,
    event::SimEvent,
    format::{format_currency, format_currency_full, format_percentage},
    state::{Goal, StartingProfile},
    Session,
};
use serde::de::DeserializeOwned;
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    GetState,
    Command { command: PlayerCommand },
    Takeaways,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState<'a> {
    session_id:       &'a str,
    decision_index:   usize,
    chapter:          u32,
    progress:         f64,
    completed:        bool,
    age:              f64,
    cash:             f64,
    investments:      f64,
    total_debt:       f64,
    net_worth:        f64,
    credit_score:     f64,
    stress:           f64,
    inflation_rate:   f64,
    real_purchasing_power: f64,
    unlocked_badges:  Vec<BadgeId>,
    current_decision: Option<&'a Decision>,
    events:           Vec<SimEvent>,
}

/// How the headless runner picks among a decision's three choices.
#[derive(Clone, Copy, Debug)]
enum Strategy {
    Index(usize),
    LongTerm,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let session_id = string_arg(&args, "--session");
    let profile: Option<StartingProfile> = string_arg(&args, "--profile").map(parse_enum).transpose()?;
    let goal: Option<Goal> = string_arg(&args, "--goal").map(parse_enum).transpose()?;
    let strategy = parse_strategy(string_arg(&args, "--strategy").unwrap_or("first"))?;

    let config = SimConfig::load(data_dir)?;
    let catalog = DecisionCatalog::load(data_dir)?;
    let decisions = parse_arg(&args, "--decisions", catalog.len());

    let mut session = match session_id {
        Some(id) => {
            let started_at = chrono::Utc::now().timestamp_millis();
            Session::with_session_id(id.to_string(), started_at, config, catalog)?
        }
        None => Session::new(config, catalog)?,
    };
    if let Some(profile) = profile {
        session.set_profile(profile)?;
    }
    if let Some(goal) = goal {
        session.set_goal(goal)?;
    }

    if ipc_mode {
        run_ipc_loop(&mut session)?;
    } else {
        println!("Life Choices sim-runner");
        println!("  session:   {}", session.session_id());
        println!("  profile:   {profile:?}");
        println!("  goal:      {goal:?}");
        println!("  strategy:  {strategy:?}");
        println!("  data_dir:  {data_dir}");
        println!();
        play(&mut session, strategy, decisions)?;
        print_summary(&session);
    }

    Ok(())
}

fn play(session: &mut Session, strategy: Strategy, decisions: usize) -> Result<()> {
    for _ in 0..decisions {
        let Some(decision) = session.current_decision() else { break };
        let choice = match strategy {
            Strategy::Index(i) => &decision.choices[i],
            Strategy::LongTerm => decision
                .choices
                .iter()
                .find(|c| c.effects.long_term_choice)
                .unwrap_or(&decision.choices[0]),
        };
        let (decision_id, choice_id, label) =
            (decision.id.clone(), choice.id.clone(), choice.label.clone());

        let new_badges = session.make_choice(&decision_id, &choice_id)?;
        let state = session.state();
        println!(
            "  {decision_id:<7} {label:<45} cash {:>8} | debt {:>8} | net {:>8}",
            format_currency(state.cash),
            format_currency(state.total_debt()),
            format_currency(state.net_worth),
        );
        for badge in new_badges {
            println!("          badge unlocked: {} {}", badge.icon(), badge.name());
        }
    }
    Ok(())
}

fn run_ipc_loop(session: &mut Session) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::GetState => {
                let state = build_ui_state(session, Vec::new());
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            }
            IpcCommand::Takeaways => {
                writeln!(stdout, "{}", serde_json::to_string(&session.takeaways())?)?;
            }
            IpcCommand::Command { command } => match session.dispatch(command) {
                Ok(events) => {
                    let state = build_ui_state(session, events);
                    writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
                }
                Err(e) => {
                    log::warn!("Command rejected: {e}");
                    writeln!(stdout, "{}", serde_json::json!({ "error": e.to_string() }))?;
                }
            },
        }
        stdout.flush()?;
    }
    Ok(())
}

fn build_ui_state(session: &Session, events: Vec<SimEvent>) -> UiState<'_> {
    let state = session.state();
    UiState {
        session_id:       session.session_id(),
        decision_index:   state.current_decision,
        chapter:          state.chapter(),
        progress:         session.progress(),
        completed:        state.completed,
        age:              state.age,
        cash:             state.cash,
        investments:      state.investments,
        total_debt:       state.total_debt(),
        net_worth:        state.net_worth,
        credit_score:     state.credit_score,
        stress:           state.stress,
        inflation_rate:   state.inflation_rate,
        real_purchasing_power: state.real_purchasing_power,
        unlocked_badges:  state.unlocked_badges().map(|b| b.id).collect(),
        current_decision: session.current_decision(),
        events,
    }
}

fn print_summary(session: &Session) {
    let state = session.state();
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  decisions made: {}", state.choices_made.len());
    println!("  completed:      {}", state.completed);
    println!("  age:            {:.1}", state.age);
    println!("  cash:           {}", format_currency_full(state.cash));
    println!("  investments:    {}", format_currency_full(state.investments));
    println!("  total debt:     {}", format_currency_full(state.total_debt()));
    println!("  net worth:      {}", format_currency_full(state.net_worth));
    println!("  credit score:   {:.0}", state.credit_score);
    println!("  stress:         {:.0}", state.stress);
    println!("  inflation:      {}", format_percentage(state.inflation_rate));
    println!("  purchasing pwr: {:.2}", state.real_purchasing_power);

    println!();
    println!("=== BADGES ===");
    for badge in &state.badges {
        let status = match badge.unlocked_at {
            Some(at) if badge.unlocked => format!("unlocked at decision {at}"),
            _ => "locked".to_string(),
        };
        println!("  {} {:<16} {status}", badge.id.icon(), badge.id.name());
    }

    println!();
    println!("=== TAKEAWAYS ===");
    for takeaway in session.takeaways() {
        println!("  * {}", takeaway.title);
    }
}

fn parse_strategy(raw: &str) -> Result<Strategy> {
    Ok(match raw {
        "first" | "a" => Strategy::Index(0),
        "second" | "b" => Strategy::Index(1),
        "third" | "c" => Strategy::Index(2),
        "long-term" | "long_term" => Strategy::LongTerm,
        other => bail!("Unknown strategy '{other}' (first|second|third|long-term)"),
    })
}

/// Parse a snake_case enum name such as `debt_start`.
fn parse_enum<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|e| anyhow::anyhow!("Invalid value '{raw}': {e}"))
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
