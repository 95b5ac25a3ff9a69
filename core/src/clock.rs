//! Simulation calendar: step length and chapter boundaries.
//!
//! One decision = one time step = six simulated months.
//! Decisions are grouped into chapters of DECISIONS_PER_CHAPTER.

use crate::types::DecisionIndex;

pub const MONTHS_PER_STEP: u32 = 6;
pub const YEARS_PER_STEP: f64 = 0.5;

pub const DECISIONS_PER_CHAPTER: usize = 6;
pub const CHAPTER_COUNT: u32 = 5;
pub const TOTAL_DECISIONS: usize = DECISIONS_PER_CHAPTER * CHAPTER_COUNT as usize;

/// Decision index at which the final chapter's economic shock is checked.
pub const SHOCK_CHAPTER_START: DecisionIndex = 24;

/// 1-based chapter containing the 0-based decision `index`.
pub fn chapter_for_decision(index: DecisionIndex) -> u32 {
    (index / DECISIONS_PER_CHAPTER) as u32 + 1
}

/// True when `index` opens a chapter other than the first.
pub fn is_chapter_boundary(index: DecisionIndex) -> bool {
    index > 0 && index % DECISIONS_PER_CHAPTER == 0
}

/// Decision indices belonging to 1-based `chapter`.
pub fn chapter_decisions(chapter: u32) -> std::ops::Range<DecisionIndex> {
    let start = (chapter.saturating_sub(1) as usize) * DECISIONS_PER_CHAPTER;
    start..start + DECISIONS_PER_CHAPTER
}
