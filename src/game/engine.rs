//! Round engine: the only owner of a game's [`RoundState`].

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::GuessRejected;
use crate::game::{assert_invariants, GameConfig, RoundState};
use crate::geo::Coordinate;
use crate::rng::{RandomSource, SeededRng};

/// Drives one game session.
///
/// The catalog is shared read-only, so many engines can run side by side;
/// each owns its own state and random source.
#[derive(Debug, Clone)]
pub struct RoundEngine<R = SeededRng> {
    catalog: Arc<Catalog>,
    rng: R,
    config: GameConfig,
    state: RoundState,
}

impl RoundEngine<SeededRng> {
    /// Create an engine drawing targets from a seeded xorshift generator.
    #[must_use]
    pub fn seeded(catalog: Arc<Catalog>, seed: u64, config: GameConfig) -> Self {
        Self::new(catalog, SeededRng::new(seed), config)
    }
}

impl<R: RandomSource> RoundEngine<R> {
    /// Create an engine in the `NotStarted` phase.
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, rng: R, config: GameConfig) -> Self {
        Self {
            catalog,
            rng,
            config,
            state: RoundState::new(config.starting_budget_km),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Rules this engine plays by.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Catalog targets are drawn from.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Whether the budget is exhausted.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    /// Draw a new target city and clear the previous guess.
    ///
    /// Valid in every phase; consumes exactly one random draw.
    pub fn pick_target(&mut self) -> &RoundState {
        let len = self.catalog.len();
        // Wrap out-of-range draws from custom sources.
        let index = self.rng.next_index(len) % len;
        let city = self.catalog.cities()[index].clone();

        tracing::debug!(index, city = %city.name, "Picked target");
        self.state.set_target(city);

        assert_invariants(&self.state, &self.config);
        &self.state
    }

    /// Score a guess against the active target.
    ///
    /// Within the hit radius the score rises by one; otherwise the budget
    /// shrinks by the rounded distance, never below zero. Either way the
    /// state ends up with a target marker and a guess marker. No new target
    /// is picked.
    ///
    /// # Errors
    ///
    /// Returns [`GuessRejected`] if no target is active. The state is not
    /// modified.
    pub fn submit_guess(&mut self, guess: Coordinate) -> Result<&RoundState, GuessRejected> {
        let Some(target) = self.state.target_city.clone() else {
            tracing::debug!(%guess, "Guess rejected without an active target");
            return Err(GuessRejected);
        };

        let distance_km = self.config.distance_model.distance(guess, target.position);
        let outcome = self.config.evaluate(distance_km);
        self.state.record_guess(&target, guess, outcome);

        tracing::debug!(
            city = %target.name,
            %guess,
            distance_km,
            hit = outcome.is_hit(),
            score = self.state.score,
            remaining = self.state.remaining_budget,
            "Guess scored"
        );
        if self.state.is_game_over() {
            tracing::info!(score = self.state.score, "Budget exhausted, game over");
        }

        assert_invariants(&self.state, &self.config);
        Ok(&self.state)
    }

    /// Reset score, budget, target and markers.
    pub fn restart(&mut self) -> &RoundState {
        tracing::info!(final_score = self.state.score, "Game restarted");
        self.state = RoundState::new(self.config.starting_budget_km);
        &self.state
    }

    /// Consume the engine, keeping its final state.
    #[must_use]
    pub fn into_state(self) -> RoundState {
        self.state
    }
}
