//! CLI command implementations for geoquiz.

pub(crate) mod catalog;
pub(crate) mod console;
pub(crate) mod distance;
pub(crate) mod play;
pub(crate) mod simulate;

mod output;

use clap::ValueEnum;
use geoquiz::game::{DEFAULT_HIT_RADIUS_KM, DEFAULT_STARTING_BUDGET_KM};
use geoquiz::rng::entropy_seed;
use geoquiz::{Catalog, CatalogError, DistanceModel, GameConfig};
use std::error::Error;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Distance model selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ModelArg {
    /// 69.09 units per degree, the classic scoring scale.
    Legacy,
    /// Kilometres on a sphere of mean Earth radius.
    MeanEarthRadius,
}

impl From<ModelArg> for DistanceModel {
    fn from(model: ModelArg) -> Self {
        match model {
            ModelArg::Legacy => DistanceModel::Legacy,
            ModelArg::MeanEarthRadius => DistanceModel::MeanEarthRadius,
        }
    }
}

/// Output format for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SimulateFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// Output format for the `catalog` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum CatalogFormat {
    /// One city per line.
    Text,
    /// The catalog file format.
    Json,
}

/// Guessing strategy for the `simulate` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum GuesserArg {
    /// Always exact.
    Oracle,
    /// Exact position plus random offset (see --spread).
    Jitter,
    /// Uniformly random point on the map.
    Uniform,
}

/// Options shared by every command that plays games.
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct GameArgs {
    /// City catalog JSON file (default: bundled catalog)
    #[arg(short, long)]
    pub(crate) catalog: Option<PathBuf>,

    /// Random seed (default: random)
    #[arg(short, long)]
    pub(crate) seed: Option<u64>,

    /// Starting distance budget in km
    #[arg(short, long, default_value_t = DEFAULT_STARTING_BUDGET_KM)]
    pub(crate) budget: u32,

    /// Guesses within this many km score a point
    #[arg(short, long, default_value_t = DEFAULT_HIT_RADIUS_KM)]
    pub(crate) radius: f64,

    /// Distance model used for scoring
    #[arg(short, long, value_enum, default_value = "legacy")]
    pub(crate) model: ModelArg,
}

impl GameArgs {
    /// Load the requested catalog, or the bundled one.
    pub(crate) fn load_catalog(&self) -> Result<Arc<Catalog>, CliError> {
        let catalog = match &self.catalog {
            Some(path) => Catalog::load(path).map_err(|e| {
                CliError::new(format!("Failed to load catalog {}: {e}", path.display()))
            })?,
            None => Catalog::builtin()?,
        };
        Ok(Arc::new(catalog))
    }

    /// Game rules from the command-line options.
    pub(crate) fn config(&self) -> Result<GameConfig, CliError> {
        // A zero budget starts (and restarts) in game over.
        if self.budget == 0 {
            return Err(CliError::new("Budget must be at least 1 km"));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(CliError::new(format!(
                "Hit radius must be a non-negative number, got {}",
                self.radius
            )));
        }
        Ok(GameConfig {
            starting_budget_km: self.budget,
            hit_radius_km: self.radius,
            distance_model: self.model.into(),
        })
    }

    /// The explicit seed, or one derived from the clock.
    pub(crate) fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(entropy_seed)
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<geoquiz::CoordinateError> for CliError {
    fn from(e: geoquiz::CoordinateError) -> Self {
        Self::new(e.to_string())
    }
}
