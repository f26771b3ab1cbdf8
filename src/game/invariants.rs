//! Round-state invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for states produced by [`RoundEngine`]. If they
//! do, a transition is broken.
//!
//! [`RoundEngine`]: crate::game::RoundEngine

use crate::game::{GameConfig, RoundState};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all round-state invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &RoundState, config: &GameConfig) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut violation = |message: String| violations.push(InvariantViolation { message });

    if state.remaining_budget > config.starting_budget_km {
        violation(format!(
            "Remaining budget {} exceeds starting budget {}",
            state.remaining_budget, config.starting_budget_km
        ));
    }

    match state.markers.as_slice() {
        [] => {
            if state.last_outcome.is_some() {
                violation("Guess outcome recorded without markers".to_string());
            }
        }
        [target_marker, guess_marker] => {
            if state.last_outcome.is_none() {
                violation("Markers present without a guess outcome".to_string());
            }
            match &state.target_city {
                Some(city) => {
                    if target_marker.coordinate != city.position {
                        violation(format!(
                            "Target marker at {} but {} is at {}",
                            target_marker.coordinate, city.name, city.position
                        ));
                    }
                    if target_marker.label.as_deref() != Some(city.name.as_str()) {
                        violation(format!(
                            "Target marker labelled {:?}, expected {:?}",
                            target_marker.label, city.name
                        ));
                    }
                }
                None => violation("Markers present without a target city".to_string()),
            }
            if guess_marker.label.is_some() {
                violation(format!("Guess marker labelled {:?}", guess_marker.label));
            }
        }
        other => violation(format!("Expected 0 or 2 markers, found {}", other.len())),
    }

    if let Some(city) = &state.target_city
        && city.name.trim().is_empty()
    {
        violation("Target city has an empty name".to_string());
    }

    violations
}

/// Assert all round-state invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &RoundState, config: &GameConfig) {
    let violations = check_invariants(state, config);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Round invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &RoundState, _config: &GameConfig) {}
