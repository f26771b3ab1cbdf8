// Allow unwrap and exact float comparison in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::float_cmp))]
//! geoquiz: a deterministic city location-guessing quiz engine.
//!
//! The player is shown a city name and guesses its position on a world map.
//! Guesses within the hit radius score a point; misses spend a distance
//! budget. The game is over once the budget reaches zero.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Presentation (TUI / console)      │
//! ├─────────────────────────────────────┤
//! │   Round Engine (game::RoundEngine)  │
//! ├──────────────────┬──────────────────┤
//! │  Catalog + RNG   │  Great-circle    │
//! │                  │  distance (geo)  │
//! └──────────────────┴──────────────────┘
//! ```
//!
//! Everything below the presentation layer is synchronous, in-memory and
//! deterministic for a given seed.

pub mod catalog;
pub mod error;
pub mod game;
pub mod geo;
pub mod rng;
pub mod simulation;

pub use catalog::{Catalog, City};
pub use error::{CatalogError, CoordinateError, GuessRejected};

// Re-export key game types at crate root for convenience
pub use game::{GameConfig, GuessMarker, GuessOutcome, Phase, RoundEngine, RoundState};
pub use geo::{distance, Coordinate, DistanceModel};
pub use rng::{RandomSource, SeededRng};
