//! Error types for the quiz core.

use std::fmt;
use std::io;

/// A guess was submitted while no target city is active.
///
/// Recoverable: the caller should prompt the player to pick a city first.
/// The rejected call leaves the round state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessRejected;

impl fmt::Display for GuessRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no active target city, pick a city first")
    }
}

impl std::error::Error for GuessRejected {}

/// Which half of a coordinate failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Latitude, valid in [-90, 90].
    Latitude,
    /// Longitude, valid in [-180, 180].
    Longitude,
}

/// A coordinate supplied at the boundary is out of range or not finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateError {
    /// The offending axis.
    pub axis: Axis,
    /// The rejected value.
    pub value: f64,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis {
            Axis::Latitude => write!(f, "latitude {} outside [-90, 90]", self.value),
            Axis::Longitude => write!(f, "longitude {} outside [-180, 180]", self.value),
        }
    }
}

impl std::error::Error for CoordinateError {}

/// Errors raised while loading or validating a city catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    Io(io::Error),
    /// The catalog JSON is malformed.
    Parse(serde_json::Error),
    /// The catalog contains no cities.
    Empty,
    /// A city has an empty (or whitespace-only) name.
    EmptyName {
        /// Position of the city in the catalog.
        index: usize,
    },
    /// A city has an out-of-range position.
    InvalidPosition {
        /// Name of the offending city.
        name: String,
        /// The underlying coordinate error.
        error: CoordinateError,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Io(e) => write!(f, "failed to read catalog: {e}"),
            CatalogError::Parse(e) => write!(f, "failed to parse catalog: {e}"),
            CatalogError::Empty => write!(f, "catalog contains no cities"),
            CatalogError::EmptyName { index } => {
                write!(f, "city #{index} has an empty name")
            }
            CatalogError::InvalidPosition { name, error } => {
                write!(f, "city {name:?} has an invalid position: {error}")
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Io(e) => Some(e),
            CatalogError::Parse(e) => Some(e),
            CatalogError::InvalidPosition { error, .. } => Some(error),
            CatalogError::Empty | CatalogError::EmptyName { .. } => None,
        }
    }
}

impl From<io::Error> for CatalogError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
