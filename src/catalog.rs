//! Destination catalog
//!
//! Static per-city data (selectable destinations, country codes used to
//! disambiguate geocoding, attraction lists and fallback descriptions). The
//! default catalog ships inside the binary; a JSON file with the same shape can
//! replace it through configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::models::PlaceOfInterest;
use crate::{Result, TripPlannerError};

const EMBEDDED_CATALOG: &str = include_str!("../data/destinations.json");

/// One destination entry of the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Destination {
    pub name: String,
    /// ISO 3166-1 alpha-2 code passed to the geocoder
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub attractions: Vec<PlaceOfInterest>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    destinations: Vec<Destination>,
}

/// Lookup tables keyed by city name (matching ignores case and surrounding whitespace)
#[derive(Debug, Clone)]
pub struct Catalog {
    destinations: Vec<Destination>,
}

impl Catalog {
    /// Load the catalog shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load from `path` when given, otherwise the embedded catalog
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                info!("Loading destination catalog from {}", path.display());
                let raw = std::fs::read_to_string(path).map_err(|e| {
                    TripPlannerError::catalog(format!("cannot read {}: {e}", path.display()))
                })?;
                Self::from_json(&raw)
            }
            None => {
                debug!("Using embedded destination catalog");
                Self::embedded()
            }
        }
    }

    /// Parse and validate a catalog document
    pub fn from_json(raw: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| TripPlannerError::catalog(format!("invalid catalog JSON: {e}")))?;
        let catalog = Self {
            destinations: file.destinations,
        };
        catalog.validate()?;
        debug!("Catalog holds {} destinations", catalog.destinations.len());
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        let mut seen: Vec<String> = Vec::with_capacity(self.destinations.len());
        for destination in &self.destinations {
            let key = normalize(&destination.name);
            if key.is_empty() {
                return Err(TripPlannerError::catalog("destination with empty name"));
            }
            if seen.contains(&key) {
                return Err(TripPlannerError::catalog(format!(
                    "duplicate destination '{}'",
                    destination.name
                )));
            }
            if let Some(place) = destination
                .attractions
                .iter()
                .find(|place| !(0.0..=5.0).contains(&place.rating))
            {
                return Err(TripPlannerError::catalog(format!(
                    "rating of '{}' must be between 0 and 5, got {}",
                    place.name, place.rating
                )));
            }
            seen.push(key);
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, city: &str) -> Option<&Destination> {
        let key = normalize(city);
        self.destinations
            .iter()
            .find(|destination| normalize(&destination.name) == key)
    }

    #[must_use]
    pub fn country_code(&self, city: &str) -> Option<&str> {
        self.get(city)
            .and_then(|destination| destination.country_code.as_deref())
    }

    /// Attractions in table order; `None` when the city has no entry
    #[must_use]
    pub fn attractions(&self, city: &str) -> Option<&[PlaceOfInterest]> {
        self.get(city)
            .map(|destination| destination.attractions.as_slice())
            .filter(|attractions| !attractions.is_empty())
    }

    #[must_use]
    pub fn description(&self, city: &str) -> Option<&str> {
        self.get(city)
            .and_then(|destination| destination.description.as_deref())
    }

    /// Destination names in catalog order, as offered by the form
    #[must_use]
    pub fn city_names(&self) -> Vec<&str> {
        self.destinations
            .iter()
            .map(|destination| destination.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.destinations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.destinations.is_empty()
    }
}

/// Lookup key for a city name
pub(crate) fn normalize(city: &str) -> String {
    city.trim().to_lowercase()
}
