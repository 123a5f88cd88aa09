//! Weather API client for OpenWeather
//!
//! Resolves a city to coordinates through the geocoding API, then reads the
//! current conditions and the 5-day / 3-hour forecast. There is no retry: the
//! first failure is returned and the planner reports the weather as
//! unavailable.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info, instrument, warn};

use crate::config::TripPlannerConfig;
use crate::models::{CurrentConditions, ForecastDay, Location, WeatherSnapshot};
use crate::{Result, TripPlannerError};

/// The forecast endpoint returns one sample every three hours
const SAMPLES_PER_DAY: usize = 8;
/// Number of daily samples kept from the forecast
pub const FORECAST_DAYS: usize = 5;

/// Source of weather for a destination
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Geocode `city` (optionally narrowed by an ISO country code) and fetch
    /// current conditions plus daily forecast samples
    async fn fetch(&self, city: &str, country_code: Option<&str>) -> Result<WeatherSnapshot>;
}

/// HTTP client for the OpenWeather geocoding, weather and forecast APIs
pub struct OpenWeatherClient {
    client: Client,
    api_key: String,
    geo_base_url: String,
    base_url: String,
}

impl OpenWeatherClient {
    /// Create a client from configuration; fails when no API key is configured
    pub fn from_config(config: &TripPlannerConfig) -> Result<Self> {
        let api_key = config.require_weather_key()?.to_string();
        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("trip-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TripPlannerError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            // Stored query-encoded, it is only ever placed in URLs
            api_key: urlencoding::encode(&api_key).into_owned(),
            geo_base_url: config.weather.geo_base_url.trim_end_matches('/').to_string(),
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a city name to coordinates
    #[instrument(skip(self))]
    pub async fn geocode(&self, city: &str, country_code: Option<&str>) -> Result<Location> {
        let query = match country_code {
            Some(code) => format!("{city},{code}"),
            None => city.to_string(),
        };
        let url = format!(
            "{}/direct?q={}&limit=1&appid={}",
            self.geo_base_url,
            urlencoding::encode(&query),
            self.api_key
        );

        let start_time = Instant::now();
        let response = self.send(&url).await?;
        if !response.status().is_success() {
            warn!("Geocoding returned HTTP {} for '{}'", response.status(), query);
            return Err(TripPlannerError::city_not_found(city));
        }

        let results: Vec<openweather::GeocodingResult> = parse(response, "geocoding").await?;
        let Some(result) = results.into_iter().next() else {
            warn!("No geocoding results for '{}'", query);
            return Err(TripPlannerError::city_not_found(city));
        };

        info!(
            "Geocoded '{}' to ({:.4}, {:.4}) in {:.3}s",
            query,
            result.lat,
            result.lon,
            start_time.elapsed().as_secs_f64()
        );
        Ok(result.into())
    }

    /// Current conditions at the given coordinates, metric units
    #[instrument(skip(self))]
    pub async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions> {
        let url = format!(
            "{}/weather?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        let response = self.send_checked(&url).await?;
        let current: openweather::CurrentResponse = parse(response, "current weather").await?;
        current.try_into()
    }

    /// Daily forecast samples at the given coordinates, oldest first
    #[instrument(skip(self))]
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Vec<ForecastDay>> {
        let url = format!(
            "{}/forecast?lat={lat}&lon={lon}&appid={}&units=metric",
            self.base_url, self.api_key
        );

        let response = self.send_checked(&url).await?;
        let forecast: openweather::ForecastResponse = parse(response, "forecast").await?;
        let days = forecast.daily_samples();
        debug!(
            "Reduced {} forecast samples to {} days",
            forecast.list.len(),
            days.len()
        );
        Ok(days)
    }

    async fn send(&self, url: &str) -> Result<Response> {
        debug!("GET {}", redact(url));
        let start = Instant::now();
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            error!("Weather request failed: {}", e);
            TripPlannerError::api(format!("Weather API error: {e}"))
        })?;

        let elapsed = start.elapsed();
        debug!(
            "HTTP {} in {:.3}s",
            response.status(),
            elapsed.as_secs_f64()
        );
        if elapsed.as_secs() > 5 {
            warn!("Slow weather API response: {:.3}s", elapsed.as_secs_f64());
        }
        Ok(response)
    }

    /// Send and turn any non-success status into an API error
    async fn send_checked(&self, url: &str) -> Result<Response> {
        let response = self.send(url).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        warn!("Weather API returned HTTP {}", status);
        Err(match status {
            StatusCode::UNAUTHORIZED => TripPlannerError::api(
                "Invalid API key. Please check your OpenWeather API key.",
            ),
            _ => TripPlannerError::api(format!(
                "Failed to fetch weather data: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            )),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn fetch(&self, city: &str, country_code: Option<&str>) -> Result<WeatherSnapshot> {
        let location = self.geocode(city, country_code).await?;
        let current = self.current(location.latitude, location.longitude).await?;
        let forecast = self.forecast(location.latitude, location.longitude).await?;

        info!(
            "Weather for {}: {} ({} forecast days)",
            location.name,
            current.format_temperature(),
            forecast.len()
        );

        Ok(WeatherSnapshot {
            current,
            forecast,
            location,
        })
    }
}

async fn parse<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
    response.json::<T>().await.map_err(|e| {
        let e = e.without_url();
        error!("Failed to parse {} response: {}", what, e);
        TripPlannerError::api(format!("Invalid {what} data received from OpenWeather"))
    })
}

/// Strip the credential from a URL before it reaches the logs
fn redact(url: &str) -> &str {
    url.split("appid=").next().unwrap_or(url)
}

/// OpenWeather API response structures and conversion utilities
mod openweather {
    use super::{
        CurrentConditions, DateTime, FORECAST_DAYS, ForecastDay, Location, SAMPLES_PER_DAY, Utc,
    };
    use crate::TripPlannerError;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct GeocodingResult {
        pub name: String,
        pub lat: f64,
        pub lon: f64,
        pub country: Option<String>,
        pub state: Option<String>,
    }

    impl From<GeocodingResult> for Location {
        fn from(geocoding: GeocodingResult) -> Self {
            let name = match geocoding.state {
                Some(state) => format!("{}, {}", geocoding.name, state),
                None => geocoding.name,
            };
            match geocoding.country {
                Some(country) => Location::with_country(geocoding.lat, geocoding.lon, name, country),
                None => Location::new(geocoding.lat, geocoding.lon, name),
            }
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct MainBlock {
        pub temp: f32,
        pub feels_like: f32,
        pub humidity: u8,
    }

    #[derive(Debug, Deserialize)]
    pub struct ConditionBlock {
        pub main: String,
        pub description: String,
    }

    /// `/weather` response
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub main: MainBlock,
        #[serde(default)]
        pub weather: Vec<ConditionBlock>,
    }

    impl TryFrom<CurrentResponse> for CurrentConditions {
        type Error = TripPlannerError;

        fn try_from(response: CurrentResponse) -> Result<Self, Self::Error> {
            let condition = response.weather.into_iter().next().ok_or_else(|| {
                TripPlannerError::api("Current weather response has no conditions")
            })?;
            Ok(CurrentConditions {
                temperature: response.main.temp,
                feels_like: response.main.feels_like,
                humidity: response.main.humidity,
                condition: condition.main,
                description: condition.description,
            })
        }
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f32,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        /// Unix timestamp (seconds)
        pub dt: i64,
        pub main: ForecastMain,
        #[serde(default)]
        pub weather: Vec<ConditionBlock>,
    }

    /// `/forecast` response
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        #[serde(default)]
        pub list: Vec<ForecastEntry>,
    }

    impl ForecastResponse {
        /// Every eighth three-hour sample, one per day
        pub fn daily_samples(&self) -> Vec<ForecastDay> {
            self.list
                .iter()
                .step_by(SAMPLES_PER_DAY)
                .take(FORECAST_DAYS)
                .map(|entry| ForecastDay {
                    timestamp: DateTime::<Utc>::from_timestamp(entry.dt, 0).unwrap_or_default(),
                    temperature: entry.main.temp,
                    condition: entry
                        .weather
                        .first()
                        .map_or_else(|| "Unknown".to_string(), |c| c.main.clone()),
                })
                .collect()
        }
    }

}
