//! Report rendering
//!
//! Turns a [`TripPlan`] into the terminal panels and into the downloadable
//! plain-text export.

use std::fmt::Write as _;

use crate::models::{TravelDates, TripPlan, WeatherReport, place::stars};

/// Number of attractions shown in the "Top Attractions" panel
pub const TOP_ATTRACTIONS: usize = 6;

pub const WEATHER_UNAVAILABLE: &str = "Weather data unavailable. Please check API key.";

/// File name offered for the text export
#[must_use]
pub fn export_filename(city: &str, duration: u8) -> String {
    format!("trip_plan_{city}_{duration}days.txt")
}

/// Capitalize the first letter of every word ("broken clouds" -> "Broken Clouds")
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn heading(out: &mut String, title: &str) {
    let _ = writeln!(out, "\n{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
}

/// Render every panel of the plan for the terminal
#[must_use]
pub fn render_panels(plan: &TripPlan, dates: &TravelDates) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✅ Trip plan generated for {}!", plan.city);

    heading(&mut out, &format!("🏙️ About {}", plan.city));
    let _ = writeln!(out, "{}", plan.description);

    heading(&mut out, "🌤️ Weather Information");
    render_weather(&mut out, &plan.weather);

    heading(&mut out, "📅 Travel Dates");
    let _ = writeln!(out, "Departure: {}", TravelDates::format_date(dates.departure));
    let _ = writeln!(out, "Return:    {}", TravelDates::format_date(dates.return_date));
    let _ = writeln!(out, "Duration:  {} days", dates.duration);

    heading(&mut out, "✈️ Flight Options");
    for (idx, flight) in plan.flights.iter().enumerate() {
        let _ = writeln!(out, "Option {}: {} - {}", idx + 1, flight.airline, flight.price);
        let _ = writeln!(
            out,
            "  Route: {} | Duration: {} | Stops: {}",
            flight.route(),
            flight.duration,
            flight.stops
        );
    }

    heading(&mut out, "🏨 Hotel Recommendations");
    for hotel in &plan.hotels {
        let _ = writeln!(out, "{} - {} ({})", hotel.name, stars(hotel.rating), hotel.rating);
        let _ = writeln!(
            out,
            "  Price: {} per night | Amenities: {}",
            hotel.price_per_night,
            hotel.amenities_list()
        );
    }

    heading(&mut out, "🗺️ Day-by-Day Itinerary");
    let _ = writeln!(out, "{}", plan.itinerary.trim_end());

    heading(&mut out, "🎯 Top Attractions");
    for place in plan.places.iter().take(TOP_ATTRACTIONS) {
        let _ = writeln!(out, "{}", place.name);
        let _ = writeln!(out, "  Type: {}", title_case(&place.category));
        let _ = writeln!(out, "  Rating: {} ({})", place.stars(), place.rating);
    }

    out
}

fn render_weather(out: &mut String, weather: &WeatherReport) {
    let snapshot = match weather {
        WeatherReport::Available(snapshot) => snapshot,
        WeatherReport::Unavailable { reason } => {
            let _ = writeln!(out, "⚠️ {WEATHER_UNAVAILABLE}");
            let _ = writeln!(out, "  ({reason})");
            return;
        }
    };

    let current = &snapshot.current;
    let _ = writeln!(
        out,
        "Temperature: {} | Feels Like: {} | Humidity: {} | Condition: {}",
        current.format_temperature(),
        current.format_feels_like(),
        current.format_humidity(),
        current.condition
    );
    let _ = writeln!(out, "Current Weather: {}", title_case(&current.description));

    if !snapshot.forecast.is_empty() {
        let _ = writeln!(out, "\n{}-Day Forecast", snapshot.forecast.len());
        for day in &snapshot.forecast {
            let _ = writeln!(
                out,
                "  {}  {:.1}°C  {}",
                day.timestamp.format("%b %d"),
                day.temperature,
                day.condition
            );
        }
    }
}

/// Flattened plain-text version of the plan, as written by the export
#[must_use]
pub fn export_text(plan: &TripPlan, dates: &TravelDates) -> String {
    let flights = plan
        .flights
        .iter()
        .map(|f| format!("- {}: {} ({})", f.airline, f.price, f.duration))
        .collect::<Vec<_>>()
        .join("\n");
    let hotels = plan
        .hotels
        .iter()
        .map(|h| format!("- {}: {}/night", h.name, h.price_per_night))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\nTRIP PLAN: {duration}-day trip to {city} in {month}\n\
         \n\
         {description}\n\
         \n\
         TRAVEL DATES:\n\
         Departure: {departure}\n\
         Return: {return_date}\n\
         \n\
         ITINERARY:\n\
         {itinerary}\n\
         \n\
         FLIGHTS:\n\
         {flights}\n\
         \n\
         HOTELS:\n\
         {hotels}\n",
        duration = plan.duration,
        city = plan.city,
        month = plan.month,
        description = plan.description,
        departure = TravelDates::format_date(dates.departure),
        return_date = TravelDates::format_date(dates.return_date),
        itinerary = plan.itinerary,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CurrentConditions, ForecastDay, Location, Month, PlaceOfInterest, WeatherSnapshot,
    };
    use crate::offers::{flight_options, hotel_options};
    use crate::places::generic_places;
    use chrono::{DateTime, NaiveDate, Utc};

    fn plan(weather: WeatherReport) -> TripPlan {
        TripPlan {
            city: "Kyoto".to_string(),
            description: "Kyoto is old.".to_string(),
            weather,
            places: generic_places("Kyoto")
                .into_iter()
                .chain([
                    PlaceOfInterest::new("Fushimi Inari", "shrine", 4.8),
                    PlaceOfInterest::new("Kinkaku-ji", "temple", 4.7),
                ])
                .collect(),
            flights: flight_options("Kyoto"),
            hotels: hotel_options("Kyoto"),
            itinerary: "**Day 1:**\n- Visit Kyoto Museum (museum)\n".to_string(),
            duration: 2,
            month: Month::May,
        }
    }

    fn dates() -> TravelDates {
        TravelDates::from_request_date(NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(), 2)
    }

    fn available() -> WeatherReport {
        WeatherReport::Available(WeatherSnapshot {
            current: CurrentConditions {
                temperature: 18.25,
                feels_like: 17.5,
                humidity: 55,
                condition: "Clouds".to_string(),
                description: "broken clouds".to_string(),
            },
            forecast: vec![ForecastDay {
                timestamp: DateTime::<Utc>::from_timestamp(1_777_680_000, 0).unwrap(),
                temperature: 19.0,
                condition: "Rain".to_string(),
            }],
            location: Location::new(35.01, 135.77, "Kyoto".to_string()),
        })
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename("Tokyo", 3), "trip_plan_Tokyo_3days.txt");
        assert_eq!(export_filename("New York", 5), "trip_plan_New York_5days.txt");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("broken clouds"), "Broken Clouds");
        assert_eq!(title_case("LANDMARK"), "Landmark");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_unavailable_weather_branch() {
        let text = render_panels(&plan(WeatherReport::unavailable("City not found: Kyoto")), &dates());
        assert!(text.contains(WEATHER_UNAVAILABLE));
        assert!(text.contains("City not found: Kyoto"));
        assert!(!text.contains("Temperature:"));
    }

    #[test]
    fn test_available_weather_panel() {
        let text = render_panels(&plan(available()), &dates());
        assert!(text.contains("Temperature: 18.2°C") || text.contains("Temperature: 18.3°C"));
        assert!(text.contains("Humidity: 55%"));
        assert!(text.contains("Current Weather: Broken Clouds"));
        assert!(text.contains("1-Day Forecast"));
        assert!(text.contains("May 02  19.0°C  Rain"));
        assert!(!text.contains(WEATHER_UNAVAILABLE));
    }

    #[test]
    fn test_panels_cover_every_section() {
        let text = render_panels(&plan(available()), &dates());
        for section in [
            "About Kyoto",
            "Weather Information",
            "Travel Dates",
            "Flight Options",
            "Hotel Recommendations",
            "Day-by-Day Itinerary",
            "Top Attractions",
        ] {
            assert!(text.contains(section), "missing section {section}");
        }
        assert!(text.contains("Departure: May 01, 2026"));
        assert!(text.contains("Return:    May 02, 2026"));
        assert!(text.contains("Option 1: Air India - ₹18,500"));
        assert!(text.contains("Route: DEL → KYO"));
        assert!(text.contains("Luxury Palace Kyoto - ⭐⭐⭐⭐⭐ (5)"));
    }

    #[test]
    fn test_top_attractions_limited_to_six() {
        let text = render_panels(&plan(available()), &dates());
        assert!(text.contains("Fushimi Inari"));
        assert!(!text.contains("Kinkaku-ji"));
        assert!(text.contains("Type: Neighborhood"));
    }

    #[test]
    fn test_export_text() {
        let text = export_text(&plan(available()), &dates());
        assert!(text.starts_with("\nTRIP PLAN: 2-day trip to Kyoto in May\n\nKyoto is old.\n"));
        assert!(text.contains("TRAVEL DATES:\nDeparture: May 01, 2026\nReturn: May 02, 2026\n"));
        assert!(text.contains("ITINERARY:\n**Day 1:**\n- Visit Kyoto Museum (museum)\n"));
        assert!(text.contains("FLIGHTS:\n- Air India: ₹18,500 (6h 45m)\n- IndiGo: ₹22,000 (7h 20m)\n"));
        assert!(text.ends_with(
            "HOTELS:\n- Kyoto Grand Hotel: ₹8,500/night\n- Budget Inn Kyoto: ₹4,200/night\n- Luxury Palace Kyoto: ₹18,000/night\n"
        ));
    }
}
