//! Catalog-backed narration used without a model, and as the model's fallback

use std::fmt::Write as _;
use std::sync::Arc;

use async_trait::async_trait;

use super::NarrativeSource;
use crate::catalog::Catalog;
use crate::models::{PlaceOfInterest, WeatherReport};

/// Places scheduled per day by the fallback itinerary
pub const PLACES_PER_DAY: usize = 2;

#[derive(Debug, Clone)]
pub struct TemplateNarrator {
    catalog: Arc<Catalog>,
}

impl TemplateNarrator {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Catalog paragraph for the city, or a generic one
    #[must_use]
    pub fn description(&self, city: &str) -> String {
        self.catalog
            .description(city)
            .map_or_else(|| generic_description(city), str::to_string)
    }
}

#[async_trait]
impl NarrativeSource for TemplateNarrator {
    fn kind(&self) -> &'static str {
        "template"
    }

    async fn describe_city(&self, city: &str, _duration: u8) -> String {
        self.description(city)
    }

    async fn itinerary(
        &self,
        city: &str,
        duration: u8,
        _weather: &WeatherReport,
        places: &[PlaceOfInterest],
    ) -> String {
        fallback_itinerary(city, duration, places)
    }
}

#[must_use]
pub fn generic_description(city: &str) -> String {
    format!(
        "{city} is a fascinating destination with rich cultural heritage and historical significance. \
         This vibrant city offers unique experiences, local traditions, and memorable attractions that \
         showcase its distinctive character. Visitors can explore historical sites, enjoy local cuisine, \
         and immerse themselves in the authentic culture of this remarkable destination."
    )
}

/// Spread `places` over `duration` days, two per day in list order.
///
/// Always emits exactly `duration` day sections; days after the list runs out
/// stay empty.
#[must_use]
pub fn fallback_itinerary(city: &str, duration: u8, places: &[PlaceOfInterest]) -> String {
    let mut plan = format!("**Day-by-Day Itinerary for {city}**\n\n");
    let mut buckets = places.chunks(PLACES_PER_DAY);

    for day in 1..=duration {
        let _ = writeln!(plan, "**Day {day}:**");
        for place in buckets.next().unwrap_or_default() {
            let _ = writeln!(plan, "- Visit {} ({})", place.name, place.category);
        }
        plan.push('\n');
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn places(count: usize) -> Vec<PlaceOfInterest> {
        (1..=count)
            .map(|i| PlaceOfInterest::new(format!("Place {i}"), "landmark", 4.0))
            .collect()
    }

    /// Split the itinerary into (day number, visited place names)
    fn sections(itinerary: &str) -> Vec<(u8, Vec<String>)> {
        let mut sections: Vec<(u8, Vec<String>)> = Vec::new();
        for line in itinerary.lines() {
            if let Some(day) = line
                .strip_prefix("**Day ")
                .and_then(|rest| rest.strip_suffix(":**"))
            {
                sections.push((day.parse().unwrap(), Vec::new()));
            } else if let Some(visit) = line.strip_prefix("- Visit ") {
                let name = visit.rsplit_once(" (").unwrap().0.to_string();
                sections.last_mut().unwrap().1.push(name);
            }
        }
        sections
    }

    #[rstest]
    #[case(2, 5)]
    #[case(3, 5)]
    #[case(3, 6)]
    #[case(4, 5)]
    #[case(7, 5)]
    #[case(2, 0)]
    #[case(7, 14)]
    #[case(2, 9)]
    fn test_fallback_itinerary_buckets(#[case] duration: u8, #[case] place_count: usize) {
        let places = places(place_count);
        let itinerary = fallback_itinerary("Kyoto", duration, &places);
        let sections = sections(&itinerary);

        assert_eq!(sections.len(), usize::from(duration));
        for (index, (day, visits)) in sections.iter().enumerate() {
            assert_eq!(usize::from(*day), index + 1);
            assert!(visits.len() <= PLACES_PER_DAY);
        }

        // Consumed in order, no repetition, no gaps
        let visited: Vec<String> = sections.into_iter().flat_map(|(_, v)| v).collect();
        let expected_count = place_count.min(usize::from(duration) * PLACES_PER_DAY);
        let expected: Vec<String> = places
            .iter()
            .take(expected_count)
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(visited, expected);
    }

    #[test]
    fn test_fallback_itinerary_layout() {
        let places = vec![
            PlaceOfInterest::new("City Palace", "palace", 4.7),
            PlaceOfInterest::new("Lake Pichola", "lake", 4.6),
            PlaceOfInterest::new("Jag Mandir", "palace", 4.5),
        ];
        let itinerary = fallback_itinerary("Udaipur", 2, &places);
        assert_eq!(
            itinerary,
            "**Day-by-Day Itinerary for Udaipur**\n\n\
             **Day 1:**\n- Visit City Palace (palace)\n- Visit Lake Pichola (lake)\n\n\
             **Day 2:**\n- Visit Jag Mandir (palace)\n\n"
        );
    }

    #[tokio::test]
    async fn test_template_descriptions() {
        let narrator = TemplateNarrator::new(Arc::new(Catalog::embedded().unwrap()));

        let tokyo = narrator.describe_city("Tokyo", 3).await;
        assert!(tokyo.starts_with("Tokyo, Japan's bustling capital"));

        let kyoto = narrator.describe_city("Kyoto", 3).await;
        assert_eq!(kyoto, generic_description("Kyoto"));
        assert!(kyoto.starts_with("Kyoto is a fascinating destination"));
    }
}
