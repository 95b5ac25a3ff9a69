//! Deterministic random number generation.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through a SessionRng built from a seed that
//! create_seed() derives from (session id, decision index). This means:
//!   - Replaying the same session and step always reproduces the same
//!     market outcome.
//!   - Each time step's stream is independent of every other step.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

/// A restartable stream of floats in [0.0, 1.0) for a single time step.
#[derive(Debug, Clone)]
pub struct SessionRng {
    seed:  u32,
    inner: Pcg32,
}

impl SessionRng {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            inner: Pcg32::seed_from_u64(u64::from(seed)),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Derive the time-step seed for `step` of `session_id`.
///
/// Rolling `hash * 31 + unit` over the UTF-16 units of `"{session_id}-{step}"`,
/// wrapped to i32, then made non-negative.
pub fn create_seed(session_id: &str, step: usize) -> u32 {
    let key = format!("{session_id}-{step}");
    let hash = key.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    hash.unsigned_abs()
}
