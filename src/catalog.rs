//! City catalog: the fixed set of candidate targets.
//!
//! Catalogs are loaded once and never mutated. The JSON format is:
//!
//! ```json
//! { "cities": [ { "name": "Ljubljana", "position": { "lat": 46.05, "lng": 14.51 } } ] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::geo::Coordinate;

/// Bundled default dataset.
const BUILTIN_JSON: &str = include_str!("../data/cities.json");

/// A named location that can be chosen as a round target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Display name, never empty.
    pub name: String,
    /// True location of the city.
    pub position: Coordinate,
}

impl City {
    /// Create a city.
    #[must_use]
    pub fn new(name: impl Into<String>, position: Coordinate) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// On-disk layout of a catalog file.
#[derive(Debug, Serialize, Deserialize)]
struct CatalogFile {
    cities: Vec<City>,
}

/// A validated, non-empty list of cities.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    cities: Vec<City>,
}

impl Catalog {
    /// Build a catalog, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Empty`] for an empty list,
    /// [`CatalogError::EmptyName`] for a blank name and
    /// [`CatalogError::InvalidPosition`] for an out-of-range position.
    pub fn new(cities: Vec<City>) -> Result<Self, CatalogError> {
        if cities.is_empty() {
            return Err(CatalogError::Empty);
        }

        for (index, city) in cities.iter().enumerate() {
            if city.name.trim().is_empty() {
                return Err(CatalogError::EmptyName { index });
            }
            city.position
                .validate()
                .map_err(|error| CatalogError::InvalidPosition {
                    name: city.name.clone(),
                    error,
                })?;
        }

        Ok(Self { cities })
    }

    /// Parse and validate a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed JSON, or any validation
    /// error from [`Catalog::new`].
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::new(file.cities)
    }

    /// Load and validate a catalog file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise as
    /// [`Catalog::from_json_str`].
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&json)?;
        tracing::info!(
            "Loaded catalog {} with {} cities",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    /// The bundled catalog of European cities.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data is corrupt.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Serialize the catalog in the file format accepted by [`Catalog::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            cities: self.cities.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Number of cities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; an empty catalog cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// City at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// All cities in catalog order.
    #[must_use]
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Look up a city by name, ignoring ASCII case.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&City> {
        self.cities
            .iter()
            .find(|city| city.name.eq_ignore_ascii_case(name))
    }

    /// Whether `city` is a member of this catalog.
    #[must_use]
    pub fn contains(&self, city: &City) -> bool {
        self.cities.iter().any(|c| c == city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = Catalog::builtin().unwrap();
        assert!(catalog.len() >= 40);
        assert!(!catalog.is_empty());

        let ljubljana = catalog.find("ljubljana").unwrap();
        assert!((ljubljana.position.lat - 46.0569).abs() < 1e-9);
        assert!((ljubljana.position.lon - 14.5058).abs() < 1e-9);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
        assert!(matches!(
            Catalog::from_json_str(r#"{"cities": []}"#),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let cities = vec![
            City::new("Graz", Coordinate::new(47.07, 15.44)),
            City::new("  ", Coordinate::new(0.0, 0.0)),
        ];
        assert!(matches!(
            Catalog::new(cities),
            Err(CatalogError::EmptyName { index: 1 })
        ));
    }

    #[test]
    fn test_out_of_range_position_rejected() {
        let cities = vec![City::new("Nowhere", Coordinate::new(95.0, 0.0))];
        match Catalog::new(cities) {
            Err(CatalogError::InvalidPosition { name, error }) => {
                assert_eq!(name, "Nowhere");
                assert_eq!(error.axis, Axis::Latitude);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Catalog::from_json_str("{\"cities\": [{\"name\": \"X\"}]}"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_json_round_trip_preserves_order() {
        let catalog = Catalog::builtin().unwrap();
        let json = catalog.to_json_string().unwrap();
        let reloaded = Catalog::from_json_str(&json).unwrap();
        assert_eq!(catalog, reloaded);
    }

    #[test]
    fn test_exported_json_uses_file_format_keys() {
        let catalog = Catalog::new(vec![City::new("Graz", Coordinate::new(47.07, 15.44))]).unwrap();
        let json = catalog.to_json_string().unwrap();
        assert!(json.contains("\"lng\""), "{json}");
        assert!(!json.contains("\"lon\""), "{json}");
        assert!(json.contains("\"position\""));
    }

    #[test]
    fn test_contains() {
        let city = City::new("Ljubljana", Coordinate::new(46.05, 14.51));
        let catalog = Catalog::new(vec![city.clone()]).unwrap();
        assert!(catalog.contains(&city));
        assert!(!catalog.contains(&City::new("Graz", Coordinate::new(47.07, 15.44))));
        assert_eq!(catalog.get(0), Some(&city));
        assert_eq!(catalog.get(1), None);
    }
}
