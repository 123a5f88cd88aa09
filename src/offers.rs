//! Flight and hotel options
//!
//! There is no booking backend behind these: the records only give the report
//! realistic shape. Prices and durations switch to the short-haul set for the
//! one regional destination, and use the long-haul defaults otherwise.

use crate::catalog::normalize;
use crate::models::{FlightOption, HotelOption};

/// Destination served by the short-haul price and duration set
pub const REGIONAL_DESTINATION: &str = "Udaipur";

/// Matches the way catalog lookups treat case and surrounding whitespace
fn is_regional(destination: &str) -> bool {
    normalize(destination) == normalize(REGIONAL_DESTINATION)
}

/// Three-letter arrival code derived from the destination name
#[must_use]
pub fn arrival_code(destination: &str) -> String {
    destination
        .chars()
        .take(3)
        .collect::<String>()
        .to_uppercase()
}

/// Two flight options to `destination`
#[must_use]
pub fn flight_options(destination: &str) -> Vec<FlightOption> {
    let regional = is_regional(destination);
    let arrival = arrival_code(destination);
    let pick = |short: &str, long: &str| (if regional { short } else { long }).to_string();

    vec![
        FlightOption {
            airline: "Air India".to_string(),
            departure: "DEL".to_string(),
            arrival: arrival.clone(),
            duration: pick("2h 30m", "6h 45m"),
            price: pick("₹8,500", "₹18,500"),
            stops: "Non-stop".to_string(),
        },
        FlightOption {
            airline: "IndiGo".to_string(),
            departure: "BLR".to_string(),
            arrival,
            duration: pick("2h 15m", "7h 20m"),
            price: pick("₹7,200", "₹22,000"),
            stops: pick("Non-stop", "1 stop"),
        },
    ]
}

/// Three hotel options in `city`, from mid-range to luxury
#[must_use]
pub fn hotel_options(city: &str) -> Vec<HotelOption> {
    let regional = is_regional(city);
    let pick = |short: &str, long: &str| (if regional { short } else { long }).to_string();
    let amenities =
        |list: &[&str]| -> Vec<String> { list.iter().map(|a| (*a).to_string()).collect() };

    vec![
        HotelOption {
            name: format!("{city} Grand Hotel"),
            rating: 4.5,
            price_per_night: pick("₹5,500", "₹8,500"),
            amenities: amenities(&["WiFi", "Breakfast", "Pool", "Spa"]),
        },
        HotelOption {
            name: format!("Budget Inn {city}"),
            rating: 4.0,
            price_per_night: pick("₹2,800", "₹4,200"),
            amenities: amenities(&["WiFi", "Breakfast"]),
        },
        HotelOption {
            name: format!("Luxury Palace {city}"),
            rating: 5.0,
            price_per_night: pick("₹12,000", "₹18,000"),
            amenities: amenities(&["WiFi", "Breakfast", "Pool", "Spa", "Restaurant", "Gym"]),
        },
    ]
}
