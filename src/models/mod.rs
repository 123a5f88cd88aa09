//! Data models for the trip planner
//!
//! This module contains the core domain models organized by concern:
//! - Location: Geographic coordinates of a resolved destination
//! - Weather: Current conditions, daily forecast samples and the report wrapper
//! - Place: Points of interest
//! - Offer: Flight and hotel options
//! - Trip: The request, the assembled plan and the travel dates

pub mod location;
pub mod offer;
pub mod place;
pub mod trip;
pub mod weather;

// Re-export all public types for convenient access
pub use location::Location;
pub use offer::{FlightOption, HotelOption};
pub use place::PlaceOfInterest;
pub use trip::{
    DEFAULT_DURATION_DAYS, MAX_DURATION_DAYS, MIN_DURATION_DAYS, Month, TravelDates, TripPlan,
    TripRequest,
};
pub use weather::{CurrentConditions, ForecastDay, WeatherReport, WeatherSnapshot};
