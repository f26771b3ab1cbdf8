//! Output formatting utilities for CLI.

// Statistics use intentional integer -> float conversions
#![allow(clippy::cast_precision_loss)]

use geoquiz::simulation::GameResult;
use geoquiz::{GuessOutcome, RoundState};
use serde::Serialize;

/// Prompt shown when a guess arrives before any city was placed.
pub(super) const CHOOSE_CITY: &str = "Choose city first: press place to get a target.";

/// Title of the end-of-game dialog.
pub(super) const GAME_OVER_TITLE: &str = "Game Over";

/// Body of the end-of-game dialog.
pub(super) fn game_over_message(score: u32) -> String {
    format!("Your score is {score}")
}

/// One-line status: score and remaining budget.
pub(super) fn format_status(state: &RoundState) -> String {
    format!(
        "Score: {}  Budget: {} km",
        state.score(),
        state.remaining_budget()
    )
}

/// Describe the outcome of the most recent guess, if any.
pub(super) fn format_outcome(state: &RoundState) -> Option<String> {
    let outcome = state.last_outcome()?;
    let city = state.target_city().map_or("The city", |c| c.name.as_str());
    let position = state
        .target_city()
        .map(|c| c.position.to_string())
        .unwrap_or_default();

    Some(match outcome {
        GuessOutcome::Hit { distance_km } => {
            format!("Hit! {city} is at {position}, you were {distance_km:.0} km away. +1 point")
        }
        GuessOutcome::Miss {
            distance_km,
            penalty_km,
        } => format!(
            "Miss. {city} is at {position}, you were {distance_km:.0} km away. -{penalty_km} km"
        ),
    })
}

/// Aggregated statistics over many simulated games.
#[derive(Debug, Default, Clone)]
pub(super) struct SimulationStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that ended by exhausting the budget.
    pub(super) games_lost: u64,
    /// Sum of final scores.
    total_score: u64,
    /// Sum of squared final scores, for std dev.
    score_sq_sum: f64,
    /// Best final score seen.
    pub(super) best_score: u32,
    /// Total rounds across all games.
    total_rounds: u64,
    /// Sum of guess distances across all games.
    total_distance_km: f64,
}

impl SimulationStats {
    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        if result.game_over {
            self.games_lost += 1;
        }
        self.total_score += u64::from(result.score);
        self.score_sq_sum += f64::from(result.score) * f64::from(result.score);
        self.best_score = self.best_score.max(result.score);
        self.total_rounds += u64::from(result.rounds_played);
        self.total_distance_km += result.total_distance_km;
    }

    /// Merge another accumulator into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.games_lost += other.games_lost;
        self.total_score += other.total_score;
        self.score_sq_sum += other.score_sq_sum;
        self.best_score = self.best_score.max(other.best_score);
        self.total_rounds += other.total_rounds;
        self.total_distance_km += other.total_distance_km;
    }

    /// Average final score.
    pub(super) fn avg_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_score as f64 / self.games_played as f64
    }

    /// Final score standard deviation.
    pub(super) fn score_std_dev(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_score();
        let variance = (self.score_sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Average rounds per game.
    pub(super) fn avg_rounds(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_rounds as f64 / self.games_played as f64
    }

    /// Average distance per guess.
    pub(super) fn avg_distance_km(&self) -> f64 {
        if self.total_rounds == 0 {
            return 0.0;
        }
        self.total_distance_km / self.total_rounds as f64
    }

    /// Share of games that ran out of budget (0.0-1.0).
    pub(super) fn loss_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_lost as f64 / self.games_played as f64
    }
}

/// JSON-serializable simulation result.
#[derive(Debug, Serialize)]
pub(super) struct JsonSimulationResult {
    /// Guesser strategy name.
    guesser: String,
    /// Total games played.
    games_played: u64,
    /// Games that ran out of budget.
    games_lost: u64,
    /// Loss rate (0.0-1.0).
    loss_rate: f64,
    /// Average final score.
    avg_score: f64,
    /// Final score standard deviation.
    score_std_dev: f64,
    /// Best final score.
    best_score: u32,
    /// Average rounds per game.
    avg_rounds: f64,
    /// Average distance per guess.
    avg_distance_km: f64,
}

impl JsonSimulationResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &SimulationStats, guesser: &str) -> Self {
        Self {
            guesser: guesser.to_string(),
            games_played: stats.games_played,
            games_lost: stats.games_lost,
            loss_rate: stats.loss_rate(),
            avg_score: stats.avg_score(),
            score_std_dev: stats.score_std_dev(),
            best_score: stats.best_score,
            avg_rounds: stats.avg_rounds(),
            avg_distance_km: stats.avg_distance_km(),
        }
    }
}

/// Format simulation stats as human-readable text.
pub(super) fn format_simulation_text(stats: &SimulationStats, guesser: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Simulation Results ({} games, guesser: {guesser})\n",
        stats.games_played
    ));
    output.push_str("========================================\n\n");
    output.push_str(&format!(
        "  Average score:    {:.2} (+/- {:.2})\n",
        stats.avg_score(),
        stats.score_std_dev()
    ));
    output.push_str(&format!("  Best score:       {}\n", stats.best_score));
    output.push_str(&format!(
        "  Games lost:       {} ({:.1}%)\n",
        stats.games_lost,
        stats.loss_rate() * 100.0
    ));
    output.push_str(&format!("  Average rounds:   {:.1}\n", stats.avg_rounds()));
    output.push_str(&format!(
        "  Average distance: {:.0} km per guess\n",
        stats.avg_distance_km()
    ));

    output
}

/// Format simulation stats as CSV.
pub(super) fn format_simulation_csv(stats: &SimulationStats, guesser: &str) -> String {
    let mut output = String::new();

    output.push_str(
        "guesser,games,games_lost,loss_rate,avg_score,score_std_dev,best_score,avg_rounds,avg_distance_km\n",
    );
    output.push_str(&format!(
        "{},{},{},{:.4},{:.2},{:.2},{},{:.2},{:.2}\n",
        guesser,
        stats.games_played,
        stats.games_lost,
        stats.loss_rate(),
        stats.avg_score(),
        stats.score_std_dev(),
        stats.best_score,
        stats.avg_rounds(),
        stats.avg_distance_km()
    ));

    output
}
