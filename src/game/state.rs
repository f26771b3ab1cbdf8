//! Round state and scoring rules.

use crate::catalog::City;
use crate::geo::{Coordinate, DistanceModel};

/// Distance budget a fresh game starts with, in kilometres.
pub const DEFAULT_STARTING_BUDGET_KM: u32 = 1500;

/// Guesses within this distance of the target count as correct.
pub const DEFAULT_HIT_RADIUS_KM: f64 = 50.0;

/// Title shown for the player's own marker.
pub const GUESS_MARKER_TITLE: &str = "Your choice";

/// Tunable rules of a game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Budget at game start and after restart. Zero leaves the game in
    /// [`Phase::GameOver`] even after a restart.
    pub starting_budget_km: u32,
    /// Inclusive radius for a correct guess.
    pub hit_radius_km: f64,
    /// Distance model used to score guesses.
    pub distance_model: DistanceModel,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_budget_km: DEFAULT_STARTING_BUDGET_KM,
            hit_radius_km: DEFAULT_HIT_RADIUS_KM,
            distance_model: DistanceModel::Legacy,
        }
    }
}

impl GameConfig {
    /// Score a guess `distance_km` away from the target.
    ///
    /// Misses cost the distance rounded to a whole kilometre, with exact
    /// halves rounding down.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn evaluate(&self, distance_km: f64) -> GuessOutcome {
        if distance_km <= self.hit_radius_km {
            GuessOutcome::Hit { distance_km }
        } else {
            let penalty_km = (distance_km - 0.5).ceil() as u32;
            GuessOutcome::Miss {
                distance_km,
                penalty_km,
            }
        }
    }
}

/// Result of scoring a single guess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GuessOutcome {
    /// Within the hit radius; scores a point.
    Hit {
        /// Distance between guess and target.
        distance_km: f64,
    },
    /// Outside the hit radius; costs budget.
    Miss {
        /// Distance between guess and target.
        distance_km: f64,
        /// Budget deducted (before flooring at zero).
        penalty_km: u32,
    },
}

impl GuessOutcome {
    /// Distance between guess and target.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        match *self {
            GuessOutcome::Hit { distance_km } | GuessOutcome::Miss { distance_km, .. } => {
                distance_km
            }
        }
    }

    /// Whether the guess scored.
    #[must_use]
    pub fn is_hit(&self) -> bool {
        matches!(self, GuessOutcome::Hit { .. })
    }
}

/// A point to draw on the map.
#[derive(Debug, Clone, PartialEq)]
pub struct GuessMarker {
    /// Where the marker sits.
    pub coordinate: Coordinate,
    /// City name for the target marker, `None` for the player's guess.
    pub label: Option<String>,
}

impl GuessMarker {
    /// Text to show next to the marker.
    #[must_use]
    pub fn title(&self) -> &str {
        self.label.as_deref().unwrap_or(GUESS_MARKER_TITLE)
    }
}

/// Lifecycle phase, derived from the state rather than stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No target picked since the game (re)started.
    NotStarted,
    /// A target is active and budget remains.
    RoundActive,
    /// Budget exhausted; only a restart starts a new game.
    GameOver,
}

/// Complete state of one game session.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub(crate) target_city: Option<City>,
    pub(crate) remaining_budget: u32,
    pub(crate) score: u32,
    pub(crate) markers: Vec<GuessMarker>,
    pub(crate) last_outcome: Option<GuessOutcome>,
}

impl RoundState {
    /// Fresh state with the given budget, zero score and no target.
    #[must_use]
    pub fn new(starting_budget_km: u32) -> Self {
        Self {
            target_city: None,
            remaining_budget: starting_budget_km,
            score: 0,
            markers: Vec::new(),
            last_outcome: None,
        }
    }

    /// City the player is currently locating.
    #[must_use]
    pub fn target_city(&self) -> Option<&City> {
        self.target_city.as_ref()
    }

    /// Remaining distance budget in kilometres.
    #[must_use]
    pub const fn remaining_budget(&self) -> u32 {
        self.remaining_budget
    }

    /// Number of correct guesses.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Either empty, or exactly `[target, guess]`.
    #[must_use]
    pub fn markers(&self) -> &[GuessMarker] {
        &self.markers
    }

    /// Outcome of the guess the markers show, if any.
    #[must_use]
    pub const fn last_outcome(&self) -> Option<GuessOutcome> {
        self.last_outcome
    }

    /// Whether the budget is exhausted.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.remaining_budget == 0
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.is_game_over() {
            Phase::GameOver
        } else if self.target_city.is_some() {
            Phase::RoundActive
        } else {
            Phase::NotStarted
        }
    }

    /// Replace the target and clear the previous guess.
    pub(crate) fn set_target(&mut self, city: City) {
        self.target_city = Some(city);
        self.markers.clear();
        self.last_outcome = None;
    }

    /// Apply a scored guess against `target`.
    pub(crate) fn record_guess(&mut self, target: &City, guess: Coordinate, outcome: GuessOutcome) {
        match outcome {
            GuessOutcome::Hit { .. } => self.score += 1,
            GuessOutcome::Miss { penalty_km, .. } => {
                self.remaining_budget = self.remaining_budget.saturating_sub(penalty_km);
            }
        }

        self.markers = vec![
            GuessMarker {
                coordinate: target.position,
                label: Some(target.name.clone()),
            },
            GuessMarker {
                coordinate: guess,
                label: None,
            },
        ];
        self.last_outcome = Some(outcome);
    }
}

/// Whether `state` has run out of budget.
#[must_use]
pub const fn is_game_over(state: &RoundState) -> bool {
    state.is_game_over()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ljubljana() -> City {
        City::new("Ljubljana", Coordinate::new(46.05, 14.51))
    }

    #[test]
    fn test_new_state() {
        let state = RoundState::new(1500);
        assert_eq!(state.remaining_budget(), 1500);
        assert_eq!(state.score(), 0);
        assert!(state.target_city().is_none());
        assert!(state.markers().is_empty());
        assert_eq!(state.phase(), Phase::NotStarted);
        assert!(!is_game_over(&state));
    }

    #[test]
    fn test_evaluate_hit_boundary_is_inclusive() {
        let config = GameConfig::default();
        assert!(config.evaluate(0.0).is_hit());
        assert!(config.evaluate(50.0).is_hit());
        assert!(!config.evaluate(50.000_001).is_hit());
    }

    #[test]
    fn test_evaluate_miss_rounding() {
        let config = GameConfig::default();
        let penalty = |d: f64| match config.evaluate(d) {
            GuessOutcome::Miss { penalty_km, .. } => penalty_km,
            GuessOutcome::Hit { .. } => panic!("expected a miss for {d}"),
        };

        assert_eq!(penalty(1111.95), 1112);
        assert_eq!(penalty(690.9), 691);
        assert_eq!(penalty(100.4), 100);
        assert_eq!(penalty(100.5), 100);
        assert_eq!(penalty(100.51), 101);
    }

    #[test]
    fn test_record_hit() {
        let mut state = RoundState::new(1500);
        let city = ljubljana();
        state.set_target(city.clone());
        state.record_guess(&city, city.position, GuessOutcome::Hit { distance_km: 0.0 });

        assert_eq!(state.score(), 1);
        assert_eq!(state.remaining_budget(), 1500);
        assert_eq!(state.markers().len(), 2);
        assert_eq!(state.markers()[0].title(), "Ljubljana");
        assert_eq!(state.markers()[1].title(), GUESS_MARKER_TITLE);
    }

    #[test]
    fn test_record_miss_floors_at_zero() {
        let mut state = RoundState::new(300);
        let city = ljubljana();
        state.set_target(city.clone());
        state.record_guess(
            &city,
            Coordinate::new(0.0, 0.0),
            GuessOutcome::Miss {
                distance_km: 3000.0,
                penalty_km: 3000,
            },
        );

        assert_eq!(state.remaining_budget(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.phase(), Phase::GameOver);
    }

    #[test]
    fn test_set_target_clears_markers() {
        let mut state = RoundState::new(1500);
        let city = ljubljana();
        state.set_target(city.clone());
        state.record_guess(&city, city.position, GuessOutcome::Hit { distance_km: 0.0 });
        assert_eq!(state.phase(), Phase::RoundActive);

        state.set_target(city);
        assert!(state.markers().is_empty());
        assert!(state.last_outcome().is_none());
        assert_eq!(state.score(), 1);
    }
}
