//! Weather data model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Location;

/// Current conditions at the destination
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temperature: f32,
    /// Apparent temperature in Celsius
    pub feels_like: f32,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Short condition group (e.g. "Clouds")
    pub condition: String,
    /// Longer condition text (e.g. "scattered clouds")
    pub description: String,
}

/// One forecast sample per day
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ForecastDay {
    pub timestamp: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature: f32,
    pub condition: String,
}

/// Successful weather lookup
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Daily samples, oldest first
    pub forecast: Vec<ForecastDay>,
    pub location: Location,
}

/// Outcome of the weather step of a plan.
///
/// Failures are kept as data so that a plan is always produced; renderers have
/// to match on the variant before they can reach any measurement.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum WeatherReport {
    Available(WeatherSnapshot),
    Unavailable { reason: String },
}

impl WeatherReport {
    #[must_use]
    pub fn unavailable<S: Into<String>>(reason: S) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        match self {
            Self::Available(snapshot) => Some(snapshot),
            Self::Unavailable { .. } => None,
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// One-line summary used to give the itinerary prompt some context
    #[must_use]
    pub fn prompt_summary(&self) -> Option<String> {
        self.snapshot().map(|snapshot| {
            format!(
                "Current weather: {}°C, {}. ",
                snapshot.current.temperature, snapshot.current.description
            )
        })
    }
}

impl CurrentConditions {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature)
    }

    #[must_use]
    pub fn format_feels_like(&self) -> String {
        format!("{:.1}°C", self.feels_like)
    }

    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity)
    }
}
