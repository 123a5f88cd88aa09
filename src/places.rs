//! Points of interest for a destination

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::PlaceOfInterest;

/// Placeholder attractions used for cities the catalog does not know:
/// (name template, category, rating)
const GENERIC_ATTRACTIONS: [(&str, &str, f32); 5] = [
    ("{city} Main Square", "landmark", 4.5),
    ("{city} Museum", "museum", 4.4),
    ("{city} Old Town", "neighborhood", 4.6),
    ("{city} Cathedral", "church", 4.5),
    ("{city} Market", "market", 4.3),
];

/// Catalog-backed attraction lookup
#[derive(Debug, Clone)]
pub struct PlacesProvider {
    catalog: Arc<Catalog>,
}

impl PlacesProvider {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Attractions for `city`: the catalog list in table order, or five
    /// placeholders named after the city
    #[must_use]
    pub fn places_for(&self, city: &str) -> Vec<PlaceOfInterest> {
        match self.catalog.attractions(city) {
            Some(places) => places.to_vec(),
            None => {
                debug!("No attractions on record for '{}', synthesizing", city);
                generic_places(city)
            }
        }
    }
}

/// Deterministic placeholder attractions for an unknown city
#[must_use]
pub fn generic_places(city: &str) -> Vec<PlaceOfInterest> {
    GENERIC_ATTRACTIONS
        .iter()
        .map(|(template, category, rating)| {
            PlaceOfInterest::new(template.replace("{city}", city), *category, *rating)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> PlacesProvider {
        PlacesProvider::new(Arc::new(Catalog::embedded().unwrap()))
    }

    #[rstest]
    fn test_tokyo_returns_catalog_entries(provider: PlacesProvider) {
        let places = provider.places_for("Tokyo");
        let names: Vec<&str> = places.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Senso-ji Temple",
                "Tokyo Skytree",
                "Meiji Shrine",
                "Shibuya Crossing",
                "Tsukiji Outer Market"
            ]
        );
        assert_eq!(places[0].category, "temple");
        assert_eq!(places[1].rating, 4.7);
    }

    #[rstest]
    #[case("Udaipur", "City Palace")]
    #[case("Paris", "Eiffel Tower")]
    #[case("London", "Tower of London")]
    #[case("New York", "Statue of Liberty")]
    #[case("Dubai", "Burj Khalifa")]
    #[case("Singapore", "Marina Bay Sands")]
    #[case("Bangkok", "Grand Palace")]
    #[case("Rome", "Colosseum")]
    #[case("Barcelona", "Sagrada Familia")]
    fn test_known_cities_return_five_in_order(
        provider: PlacesProvider,
        #[case] city: &str,
        #[case] first: &str,
    ) {
        let places = provider.places_for(city);
        assert_eq!(places.len(), 5);
        assert_eq!(places[0].name, first);
        assert_eq!(
            places,
            provider.catalog.attractions(city).unwrap().to_vec()
        );
    }

    #[rstest]
    #[case("Kyoto")]
    #[case("Istanbul")]
    #[case("Santorini")]
    fn test_unknown_cities_are_synthesized(provider: PlacesProvider, #[case] city: &str) {
        let places = provider.places_for(city);
        assert_eq!(places.len(), 5);
        assert_eq!(places[0], PlaceOfInterest::new(format!("{city} Main Square"), "landmark", 4.5));
        assert_eq!(places[1].name, format!("{city} Museum"));
        assert_eq!(places[2].name, format!("{city} Old Town"));
        assert_eq!(places[3].name, format!("{city} Cathedral"));
        assert_eq!(places[4].name, format!("{city} Market"));
        assert_eq!(places, provider.places_for(city));
    }
}
