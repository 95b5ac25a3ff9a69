//! Shared primitive types used across the entire simulation.

/// Opaque identifier of one play session. Also the RNG seed source.
pub type SessionId = String;

/// 0-based position in the decision catalog.
pub type DecisionIndex = usize;

/// Stable catalog identifier of a decision (e.g. `ch1-d1`).
pub type DecisionId = String;

/// Stable catalog identifier of a choice (e.g. `ch1-d1-a`).
pub type ChoiceId = String;
