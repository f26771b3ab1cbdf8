//! Coordinates and great-circle distance.
//!
//! Distances use the spherical law of cosines. The central angle is
//! computed in degrees and scaled by a per-degree factor chosen through
//! [`DistanceModel`]. The default model reproduces the historical
//! `60 * 1.1515` constant chain so that scores stay comparable with earlier
//! releases of the game.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Axis, CoordinateError};

/// Mean Earth radius in kilometres (IUGG).
pub const MEAN_EARTH_RADIUS_KM: f64 = 6371.0088;

/// Minutes of arc per degree.
const MINUTES_PER_DEGREE: f64 = 60.0;

/// Historical scale applied on top of one nautical mile per arc minute.
const LEGACY_SCALE: f64 = 1.1515;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees, north positive.
    pub lat: f64,
    /// Longitude in degrees, east positive.
    #[serde(rename = "lng", alias = "lon")]
    pub lon: f64,
}

impl Coordinate {
    /// Create a coordinate without range checks.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Create a coordinate, rejecting non-finite or out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the first invalid axis.
    pub fn checked(lat: f64, lon: f64) -> Result<Self, CoordinateError> {
        let coord = Self::new(lat, lon);
        coord.validate()?;
        Ok(coord)
    }

    /// Check that both axes are finite and within range.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] naming the first invalid axis.
    pub fn validate(&self) -> Result<(), CoordinateError> {
        if !self.lat.is_finite() || !(-90.0..=90.0).contains(&self.lat) {
            return Err(CoordinateError {
                axis: Axis::Latitude,
                value: self.lat,
            });
        }
        if !self.lon.is_finite() || !(-180.0..=180.0).contains(&self.lon) {
            return Err(CoordinateError {
                axis: Axis::Longitude,
                value: self.lon,
            });
        }
        Ok(())
    }

    /// Distance to `other` under the default model.
    #[must_use]
    pub fn distance_to(&self, other: Coordinate) -> f64 {
        distance(*self, other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lon)
    }
}

/// How central-angle degrees are converted into a distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DistanceModel {
    /// `60 * 1.1515` per degree, the scale the game has always scored with.
    #[default]
    Legacy,
    /// Arc length on a sphere of [`MEAN_EARTH_RADIUS_KM`].
    MeanEarthRadius,
}

impl DistanceModel {
    /// Distance units per degree of central angle.
    #[must_use]
    pub fn km_per_degree(self) -> f64 {
        match self {
            DistanceModel::Legacy => MINUTES_PER_DEGREE * LEGACY_SCALE,
            DistanceModel::MeanEarthRadius => 2.0 * PI * MEAN_EARTH_RADIUS_KM / 360.0,
        }
    }

    /// Largest distance this model can return (antipodal points).
    #[must_use]
    pub fn max_distance(self) -> f64 {
        180.0 * self.km_per_degree()
    }

    /// Great-circle distance between `a` and `b` under this model.
    ///
    /// Identical points return exactly `0.0` without touching the
    /// trigonometric path.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn distance(self, a: Coordinate, b: Coordinate) -> f64 {
        if a.lat == b.lat && a.lon == b.lon {
            return 0.0;
        }

        let rad_lat1 = PI * a.lat / 180.0;
        let rad_lat2 = PI * b.lat / 180.0;
        let rad_theta = PI * (a.lon - b.lon) / 180.0;

        let cos_central = rad_lat1.sin() * rad_lat2.sin()
            + rad_lat1.cos() * rad_lat2.cos() * rad_theta.cos();

        // Rounding can push the argument just outside acos's domain for
        // near-identical and near-antipodal points.
        let cos_central = cos_central.clamp(-1.0, 1.0);

        let central_deg = cos_central.acos() * 180.0 / PI;
        central_deg * self.km_per_degree()
    }
}

/// Great-circle distance between two coordinates under [`DistanceModel::Legacy`].
#[must_use]
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    DistanceModel::Legacy.distance(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_are_zero() {
        let p = Coordinate::new(46.05, 14.51);
        assert_eq!(distance(p, p), 0.0);
        assert_eq!(DistanceModel::MeanEarthRadius.distance(p, p), 0.0);
    }

    #[test]
    fn test_ten_degrees_on_equator() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 10.0);

        let legacy = distance(a, b);
        assert!((legacy - 690.9).abs() < 1e-6, "legacy = {legacy}");

        let km = DistanceModel::MeanEarthRadius.distance(a, b);
        assert!((km - 1111.95).abs() < 0.01, "km = {km}");
    }

    #[test]
    fn test_antipodal_is_finite_maximum() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance(a, b);
        assert!(d.is_finite());
        assert!((d - DistanceModel::Legacy.max_distance()).abs() < 1e-6);

        let poles = distance(Coordinate::new(90.0, 0.0), Coordinate::new(-90.0, 0.0));
        assert!((poles - DistanceModel::Legacy.max_distance()).abs() < 1e-6);
    }

    #[test]
    fn test_near_identical_points_do_not_produce_nan() {
        let a = Coordinate::new(51.5074, -0.1278);
        let b = Coordinate::new(51.5074, -0.127_800_000_000_1);
        let d = distance(a, b);
        assert!(d.is_finite());
        assert!(d >= 0.0);
    }

    #[test]
    fn test_ljubljana_to_vienna() {
        let ljubljana = Coordinate::new(46.0569, 14.5058);
        let vienna = Coordinate::new(48.2082, 16.3738);
        let km = DistanceModel::MeanEarthRadius.distance(ljubljana, vienna);
        // Roughly 277 km as the crow flies.
        assert!((270.0..285.0).contains(&km), "km = {km}");
    }

    #[test]
    fn test_distance_to_uses_legacy_model() {
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(10.0, 0.0);
        assert_eq!(a.distance_to(b), distance(a, b));
        assert_eq!(a.distance_to(b), b.distance_to(a));
        assert_eq!(a.distance_to(a), 0.0);
    }

    #[test]
    fn test_checked_rejects_out_of_range() {
        assert!(Coordinate::checked(45.0, 10.0).is_ok());
        assert!(Coordinate::checked(90.0, -180.0).is_ok());

        let err = Coordinate::checked(91.0, 0.0).unwrap_err();
        assert_eq!(err.axis, Axis::Latitude);

        let err = Coordinate::checked(0.0, -180.5).unwrap_err();
        assert_eq!(err.axis, Axis::Longitude);

        assert!(Coordinate::checked(f64::NAN, 0.0).is_err());
        assert!(Coordinate::checked(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_coordinate_reads_lng_alias() {
        let coord: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lng": 2.5}"#).unwrap();
        assert_eq!(coord, Coordinate::new(1.5, 2.5));
    }

    #[test]
    fn test_coordinate_writes_lng_and_reads_lon() {
        let json = serde_json::to_string(&Coordinate::new(1.5, 2.5)).unwrap();
        assert_eq!(json, r#"{"lat":1.5,"lng":2.5}"#);

        let coord: Coordinate = serde_json::from_str(r#"{"lat": 1.5, "lon": 2.5}"#).unwrap();
        assert_eq!(coord, Coordinate::new(1.5, 2.5));
    }

    #[test]
    fn test_model_serde_names() {
        let json = serde_json::to_string(&DistanceModel::MeanEarthRadius).unwrap();
        assert_eq!(json, "\"mean-earth-radius\"");
    }
}
