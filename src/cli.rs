//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::models::{DEFAULT_DURATION_DAYS, Month, TripRequest};

/// Trip Planner - weather-aware city trip plans
#[derive(Parser, Debug)]
#[command(
    name = "trip-planner",
    about = "Plan a city trip with live weather, attractions, flights and hotels",
    version,
    after_help = "Credentials: OPENWEATHER_API_KEY (required for planning), GEMINI_API_KEY (optional)"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a trip plan and print it
    Plan {
        /// Destination city
        #[arg(long, required_unless_present = "sample")]
        city: Option<String>,

        /// Trip length in days (2-7)
        #[arg(short, long, default_value_t = DEFAULT_DURATION_DAYS)]
        days: u8,

        /// Travel month, full name or three-letter abbreviation
        #[arg(short, long, default_value_t = Month::May)]
        month: Month,

        /// Use one of the sample prompts instead of --city/--days/--month
        #[arg(long, value_enum, conflicts_with = "city")]
        sample: Option<SamplePrompt>,

        /// Also write the plain-text export; defaults to trip_plan_{city}_{days}days.txt
        #[arg(long, value_name = "PATH", num_args = 0..=1)]
        export: Option<Option<PathBuf>>,
    },

    /// List the destinations with curated data
    Cities,

    /// Start the HTTP API and form page
    Serve {
        /// Port to listen on (overrides server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Ready-made prompts
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplePrompt {
    /// 3-day trip to Tokyo in May
    Tokyo,
    /// 2-day trip to Udaipur in May
    Udaipur,
    /// 4-day trip to Paris in June
    Paris,
}

impl SamplePrompt {
    pub fn request(self) -> crate::Result<TripRequest> {
        match self {
            Self::Tokyo => TripRequest::new("Tokyo", 3, Month::May),
            Self::Udaipur => TripRequest::new("Udaipur", 2, Month::May),
            Self::Paris => TripRequest::new("Paris", 4, Month::June),
        }
    }
}

/// Resolve the `plan` arguments into a validated request
pub fn plan_request(
    city: Option<&str>,
    days: u8,
    month: Month,
    sample: Option<SamplePrompt>,
) -> crate::Result<TripRequest> {
    match sample {
        Some(sample) => sample.request(),
        None => TripRequest::new(city.unwrap_or_default(), days, month),
    }
}
