//! Trip request, assembled plan and travel dates

use std::fmt;
use std::str::FromStr;

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{FlightOption, HotelOption, PlaceOfInterest, WeatherReport};
use crate::TripPlannerError;

/// Shortest trip the planner accepts, in days
pub const MIN_DURATION_DAYS: u8 = 2;
/// Longest trip the planner accepts, in days
pub const MAX_DURATION_DAYS: u8 = 7;
/// Duration preselected by the form
pub const DEFAULT_DURATION_DAYS: u8 = 3;
/// Departure is always this many days after the request date
pub const DEPARTURE_LEAD_DAYS: i64 = 30;

/// Travel month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Month {
    January,
    February,
    March,
    April,
    #[default]
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = TripPlannerError;

    /// Accepts full month names and three-letter abbreviations, ignoring case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        Month::ALL
            .into_iter()
            .find(|month| {
                let name = month.name().to_lowercase();
                name == input || (input.len() == 3 && name.starts_with(&input))
            })
            .ok_or_else(|| TripPlannerError::validation(format!("Unknown travel month: '{s}'")))
    }
}

/// A submitted trip request. Only constructible through [`TripRequest::new`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRequest {
    city: String,
    duration: u8,
    month: Month,
}

impl TripRequest {
    /// Validate form input into a request
    pub fn new(city: &str, duration: u8, month: Month) -> crate::Result<Self> {
        let city = city.trim();
        if city.is_empty() {
            return Err(TripPlannerError::validation(
                "Please select or enter a valid city name.",
            ));
        }

        if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&duration) {
            return Err(TripPlannerError::validation(format!(
                "Trip duration must be between {MIN_DURATION_DAYS} and {MAX_DURATION_DAYS} days, got: {duration}"
            )));
        }

        Ok(Self {
            city: city.to_string(),
            duration,
            month,
        })
    }

    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    #[must_use]
    pub fn duration(&self) -> u8 {
        self.duration
    }

    #[must_use]
    pub fn month(&self) -> Month {
        self.month
    }
}

/// Everything the planner gathered for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripPlan {
    pub city: String,
    pub description: String,
    pub weather: WeatherReport,
    pub places: Vec<PlaceOfInterest>,
    pub flights: Vec<FlightOption>,
    pub hotels: Vec<HotelOption>,
    pub itinerary: String,
    pub duration: u8,
    pub month: Month,
}

/// Departure and return dates derived from the request date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelDates {
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    pub duration: u8,
}

impl TravelDates {
    /// Dates for a trip requested on `requested_on`
    #[must_use]
    pub fn from_request_date(requested_on: NaiveDate, duration: u8) -> Self {
        let departure = requested_on + Duration::days(DEPARTURE_LEAD_DAYS);
        let return_date = departure + Duration::days(i64::from(duration.saturating_sub(1)));
        Self {
            departure,
            return_date,
            duration,
        }
    }

    /// Dates for a trip requested now, in local time
    #[must_use]
    pub fn from_today(duration: u8) -> Self {
        Self::from_request_date(Local::now().date_naive(), duration)
    }

    /// e.g. "June 16, 2026"
    #[must_use]
    pub fn format_date(date: NaiveDate) -> String {
        date.format("%B %d, %Y").to_string()
    }
}
