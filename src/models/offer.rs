//! Flight and hotel options shown in the report

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct FlightOption {
    pub airline: String,
    /// IATA-style departure code
    pub departure: String,
    pub arrival: String,
    /// Human readable flight time, e.g. "6h 45m"
    pub duration: String,
    pub price: String,
    pub stops: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HotelOption {
    pub name: String,
    /// Rating between 0 and 5
    pub rating: f32,
    pub price_per_night: String,
    pub amenities: Vec<String>,
}

impl FlightOption {
    /// Format the route as "DEL → TOK"
    #[must_use]
    pub fn route(&self) -> String {
        format!("{} → {}", self.departure, self.arrival)
    }
}

impl HotelOption {
    #[must_use]
    pub fn amenities_list(&self) -> String {
        self.amenities.join(", ")
    }
}
