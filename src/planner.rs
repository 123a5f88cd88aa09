//! Trip planning orchestration
//!
//! Gathers weather, attractions, flights and hotels for a request, then has
//! the narrative source write the description and itinerary. Steps run one
//! after another and a plan is always produced: weather failures become
//! [`WeatherReport::Unavailable`] and narration never fails.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::Result;
use crate::catalog::Catalog;
use crate::config::TripPlannerConfig;
use crate::models::{TripPlan, TripRequest, WeatherReport};
use crate::narrative::{NarrativeSource, narrator_from_config};
use crate::offers::{flight_options, hotel_options};
use crate::places::PlacesProvider;
use crate::weather::{OpenWeatherClient, WeatherProvider};

pub struct TripPlanner {
    weather: Box<dyn WeatherProvider>,
    catalog: Arc<Catalog>,
    places: PlacesProvider,
    narrator: Box<dyn NarrativeSource>,
}

impl TripPlanner {
    #[must_use]
    pub fn new(
        weather: Box<dyn WeatherProvider>,
        catalog: Arc<Catalog>,
        narrator: Box<dyn NarrativeSource>,
    ) -> Self {
        let places = PlacesProvider::new(Arc::clone(&catalog));
        Self {
            weather,
            catalog,
            places,
            narrator,
        }
    }

    /// Wire the production sources; fails fast on missing weather credentials
    /// or an unreadable catalog
    pub fn from_config(config: &TripPlannerConfig) -> Result<Self> {
        let catalog = Arc::new(Catalog::load(config.catalog.path.as_deref())?);
        let weather = OpenWeatherClient::from_config(config)?;
        let narrator = narrator_from_config(&config.model, Arc::clone(&catalog))?;
        Ok(Self::new(Box::new(weather), catalog, narrator))
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build the plan for one request
    #[instrument(skip(self), fields(city = request.city(), duration = request.duration()))]
    pub async fn plan_trip(&self, request: &TripRequest) -> TripPlan {
        let start = Instant::now();
        let city = request.city();
        let duration = request.duration();
        info!(
            "Planning {}-day trip to {} in {} ({} narration)",
            duration,
            city,
            request.month(),
            self.narrator.kind()
        );

        let country_code = self.catalog.country_code(city);
        debug!("Country code for {}: {:?}", city, country_code);

        let weather = match self.weather.fetch(city, country_code).await {
            Ok(snapshot) => WeatherReport::Available(snapshot),
            Err(e) => {
                warn!("Weather unavailable for {}: {}", city, e);
                WeatherReport::unavailable(e.to_string())
            }
        };

        let places = self.places.places_for(city);
        let flights = flight_options(city);
        let hotels = hotel_options(city);

        let description = self.narrator.describe_city(city, duration).await;
        let itinerary = self
            .narrator
            .itinerary(city, duration, &weather, &places)
            .await;

        info!(
            "Plan for {} ready in {:.3}s",
            city,
            start.elapsed().as_secs_f64()
        );

        TripPlan {
            city: city.to_string(),
            description,
            weather,
            places,
            flights,
            hotels,
            itinerary,
            duration,
            month: request.month(),
        }
    }
}
