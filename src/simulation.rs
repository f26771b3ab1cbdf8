//! Automated games for balancing and benchmarking.
//!
//! Provides a pure function interface: `(seed, catalog, guesser) -> GameResult`.
//! The same seed always yields the same sequence of targets and guesses.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::game::{GameConfig, GuessOutcome, RoundEngine};
use crate::geo::Coordinate;
use crate::rng::SeededRng;

/// Mixed into the game seed to derive an independent guess stream.
const GUESS_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Automated guessing strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Guesser {
    /// Always guesses the exact target position.
    Oracle,
    /// Guesses the target offset by up to `max_offset_deg` on each axis.
    Jitter {
        /// Largest offset in degrees.
        max_offset_deg: f64,
    },
    /// Guesses a uniformly random point on the lat/lon rectangle.
    Uniform,
}

impl Guesser {
    /// Produce a guess for a target at `target`.
    #[must_use]
    pub fn guess(&self, target: Coordinate, rng: &mut SeededRng) -> Coordinate {
        match *self {
            Guesser::Oracle => target,
            Guesser::Jitter { max_offset_deg } => {
                let lat = target.lat + rng.next_range(-max_offset_deg, max_offset_deg);
                let lon = target.lon + rng.next_range(-max_offset_deg, max_offset_deg);
                Coordinate::new(lat.clamp(-90.0, 90.0), wrap_longitude(lon))
            }
            Guesser::Uniform => Coordinate::new(
                rng.next_range(-90.0, 90.0),
                rng.next_range(-180.0, 180.0),
            ),
        }
    }
}

/// Fold a longitude back into [-180, 180].
fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Configuration for automated games.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Rules of each game.
    pub game: GameConfig,
    /// Rounds after which a game stops even with budget left.
    pub max_rounds: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            max_rounds: 1000,
        }
    }
}

/// Summary of one automated game.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameResult {
    /// Seed the game was played with.
    pub seed: u64,
    /// Rounds played (one guess each).
    pub rounds_played: u32,
    /// Final score.
    pub score: u32,
    /// Budget left at the end.
    pub remaining_budget: u32,
    /// Sum of guess distances.
    pub total_distance_km: f64,
    /// Whether the game ended by exhausting the budget.
    pub game_over: bool,
}

impl GameResult {
    /// Mean distance between guess and target.
    #[must_use]
    pub fn mean_distance_km(&self) -> f64 {
        if self.rounds_played == 0 {
            return 0.0;
        }
        self.total_distance_km / f64::from(self.rounds_played)
    }
}

/// Play one game to completion with the given guesser.
///
/// The game ends when the budget runs out or after `config.max_rounds`.
#[must_use]
pub fn run_game(
    seed: u64,
    catalog: &Arc<Catalog>,
    guesser: Guesser,
    config: &SimulationConfig,
) -> GameResult {
    let mut engine = RoundEngine::seeded(Arc::clone(catalog), seed, config.game);
    let mut guess_rng = SeededRng::new(seed ^ GUESS_SEED_SALT);

    let mut rounds_played = 0;
    let mut total_distance_km = 0.0;

    while rounds_played < config.max_rounds && !engine.is_game_over() {
        let target = match engine.pick_target().target_city() {
            Some(city) => city.position,
            None => break,
        };
        let guess = guesser.guess(target, &mut guess_rng);

        let Ok(state) = engine.submit_guess(guess) else {
            break;
        };
        total_distance_km += state
            .last_outcome()
            .as_ref()
            .map_or(0.0, GuessOutcome::distance_km);
        rounds_played += 1;
    }

    let state = engine.into_state();
    tracing::trace!(seed, rounds_played, score = state.score(), "Simulated game finished");

    GameResult {
        seed,
        rounds_played,
        score: state.score(),
        remaining_budget: state.remaining_budget(),
        total_distance_km,
        game_over: state.is_game_over(),
    }
}
