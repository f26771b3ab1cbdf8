//! Game layer for geoquiz.
//!
//! Implements the quiz rules on top of the catalog and distance function:
//! - Round state (target, score, remaining budget, guess markers)
//! - Round engine with pick / guess / restart transitions
//! - Debug-time invariant checks

mod engine;
mod invariants;
mod state;

pub use engine::RoundEngine;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use state::{
    is_game_over, GameConfig, GuessMarker, GuessOutcome, Phase, RoundState,
    DEFAULT_HIT_RADIUS_KM, DEFAULT_STARTING_BUDGET_KM, GUESS_MARKER_TITLE,
};
