//! lifesim-core: the simulation engine behind a financial life-choices game.
//!
//! A player makes 30 decisions; each choice perturbs a running financial
//! state, then six simulated months pass. Everything here is pure and
//! deterministic per session id, except the Session, which owns the
//! live state and threads it through the engine.

pub mod badge;
pub mod catalog;
pub mod clock;
pub mod command;
pub mod config;
pub mod effects;
pub mod engine;
pub mod error;
pub mod event;
pub mod finance;
pub mod format;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod takeaway;
pub mod types;

pub use badge::{evaluate_badges, Badge, BadgeId};
pub use effects::{apply_effects, Effects};
pub use engine::advance_time;
pub use error::{SimError, SimResult};
pub use rng::{create_seed, SessionRng};
pub use session::Session;
pub use snapshot::{take_snapshot, undo, StateSnapshot};
pub use state::GameState;
