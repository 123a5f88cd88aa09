//! Narrative generation
//!
//! Produces the destination description and the day-by-day itinerary. Two
//! sources implement [`NarrativeSource`]:
//! - [`TemplateNarrator`]: deterministic text from the destination catalog
//! - [`GeminiNarrator`]: generative model, degrading to the template on failure
//!
//! The source is picked once, from credential availability, by
//! [`narrator_from_config`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::Result;
use crate::catalog::Catalog;
use crate::config::ModelConfig;
use crate::models::{PlaceOfInterest, WeatherReport};

pub mod gemini;
pub mod template;

pub use gemini::{GeminiClient, GeminiNarrator};
pub use template::{TemplateNarrator, fallback_itinerary};

/// At most this many attraction names are embedded in the itinerary prompt
pub const MAX_PROMPT_PLACES: usize = 8;

/// Something that can write the prose parts of a trip plan.
///
/// Implementations never fail: whatever goes wrong is absorbed into
/// template text.
#[async_trait]
pub trait NarrativeSource: Send + Sync {
    /// Short identifier used in logs
    fn kind(&self) -> &'static str;

    /// One paragraph on the city's cultural and historic significance
    async fn describe_city(&self, city: &str, duration: u8) -> String;

    /// Day-by-day itinerary text
    async fn itinerary(
        &self,
        city: &str,
        duration: u8,
        weather: &WeatherReport,
        places: &[PlaceOfInterest],
    ) -> String;
}

/// Model-backed narration when a model key is configured, template otherwise
pub fn narrator_from_config(
    config: &ModelConfig,
    catalog: Arc<Catalog>,
) -> Result<Box<dyn NarrativeSource>> {
    let template = TemplateNarrator::new(catalog);
    match config.api_key.as_deref() {
        Some(api_key) => {
            let client = GeminiClient::new(config, api_key)?;
            info!("Narration uses model '{}'", config.model);
            Ok(Box::new(GeminiNarrator::new(client, template)))
        }
        None => {
            info!("No model API key configured, narration uses templates");
            Ok(Box::new(template))
        }
    }
}

#[must_use]
pub fn description_prompt(city: &str, duration: u8) -> String {
    format!(
        "Write a concise 1-paragraph description (100-120 words) about {city}'s cultural and historic significance.\n\
         Focus on what makes it unique, its historical importance, architectural heritage, and cultural attractions.\n\
         Make it engaging and informative for travelers planning a {duration}-day trip."
    )
}

#[must_use]
pub fn itinerary_prompt(
    city: &str,
    duration: u8,
    weather: &WeatherReport,
    places: &[PlaceOfInterest],
) -> String {
    let weather_context = weather.prompt_summary().unwrap_or_default();
    let places_list = places
        .iter()
        .take(MAX_PROMPT_PLACES)
        .map(|place| place.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Create a detailed {duration}-day trip itinerary for {city}.\n\
         {weather_context}\n\
         Include these attractions: {places_list}\n\
         \n\
         Format the response as:\n\
         **Day 1:**\n\
         - Morning: [activity]\n\
         - Afternoon: [activity]\n\
         - Evening: [activity]\n\
         \n\
         Make it practical, well-paced, and engaging. Include timing suggestions and brief descriptions."
    )
}
