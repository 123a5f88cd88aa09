//! Trip Planner - weather-aware city trip planning
//!
//! This library assembles a trip plan for a city: live weather from
//! OpenWeatherMap, curated or generic attractions, illustrative flight and
//! hotel options, and a description plus day-by-day itinerary written by a
//! generative model or by templates.

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod narrative;
pub mod offers;
pub mod places;
pub mod planner;
pub mod report;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use catalog::{Catalog, Destination};
pub use config::TripPlannerConfig;
pub use error::TripPlannerError;
pub use models::{TravelDates, TripPlan, TripRequest, WeatherReport};
pub use narrative::{NarrativeSource, TemplateNarrator};
pub use planner::TripPlanner;
pub use weather::{OpenWeatherClient, WeatherProvider};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TripPlannerError>;
