//! Trip Planner CLI entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use trip_planner::cli::{Cli, Command, plan_request};
use trip_planner::config::{LoggingConfig, TripPlannerConfig};
use trip_planner::models::TravelDates;
use trip_planner::report::{export_filename, export_text, render_panels};
use trip_planner::{Catalog, TripPlanner, TripPlannerError, web};

fn setup_logging(config: &LoggingConfig, verbose: bool) {
    // RUST_LOG wins over the config file; --verbose wins over both
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false);

    if config.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<TripPlannerError>() {
                Some(err) => eprintln!("❌ {}", err.user_message()),
                None => eprintln!("❌ {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = TripPlannerConfig::load_from_path(cli.config.as_deref())?;
    setup_logging(&config.logging, cli.verbose);
    debug!("Configuration loaded");

    match cli.command {
        Command::Plan {
            city,
            days,
            month,
            sample,
            export,
        } => {
            let request = plan_request(city.as_deref(), days, month, sample)?;
            let planner = TripPlanner::from_config(&config)?;
            cmd_plan(&planner, &request, export).await
        }
        Command::Cities => cmd_cities(&config),
        Command::Serve { port } => {
            let mut server = config.server.clone();
            if let Some(port) = port {
                server.port = port;
            }
            let planner = Arc::new(TripPlanner::from_config(&config)?);
            web::run(&server, planner).await
        }
    }
}

async fn cmd_plan(
    planner: &TripPlanner,
    request: &trip_planner::TripRequest,
    export: Option<Option<PathBuf>>,
) -> Result<()> {
    let plan = planner.plan_trip(request).await;
    let dates = TravelDates::from_today(request.duration());

    println!("{}", render_panels(&plan, &dates));

    if let Some(path) = export {
        let path =
            path.unwrap_or_else(|| PathBuf::from(export_filename(&plan.city, plan.duration)));
        std::fs::write(&path, export_text(&plan, &dates))
            .map_err(TripPlannerError::from)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Exported plan to {}", path.display());
        println!("📥 Trip plan exported to {}", path.display());
    }
    Ok(())
}

fn cmd_cities(config: &TripPlannerConfig) -> Result<()> {
    let catalog = Catalog::load(config.catalog.path.as_deref())?;
    println!("Popular destinations:");
    for city in catalog.city_names() {
        println!("  {city}");
    }
    println!("\nAny other city can be entered with `plan --city`.");
    Ok(())
}
