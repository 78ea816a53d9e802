//! Command-line arguments.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::error::{ConfigError, InputError};
use crate::google::{API_KEY_ENV, DEFAULT_BASE_URL, GoogleMapsConfig};
use crate::input::load_destinations;
use crate::location::TripArea;
use crate::planner::PlanRequest;
use crate::traits::{CostMetric, TravelMode};

#[derive(Debug, Parser)]
#[command(name = "trip-planner", author, version, about, long_about = None)]
pub struct Cli {
    /// Log debug output from the planner.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Plan one trip and write its map.
    Plan(PlanArgs),
    /// Build a trip interactively.
    Shell(ShellArgs),
}

/// Where the trip takes place and how it is travelled.
#[derive(Debug, Clone, Args)]
pub struct TripArgs {
    #[arg(long, default_value = "United Kingdom")]
    pub country: String,

    #[arg(long, default_value = "")]
    pub region: String,

    #[arg(long)]
    pub city: Option<String>,

    #[arg(short, long, default_value_t = TravelMode::Driving)]
    pub mode: TravelMode,

    /// Quantity to minimize: distance or duration.
    #[arg(long, default_value_t = CostMetric::Distance)]
    pub metric: CostMetric,

    /// Return to the first location at the end.
    #[arg(long)]
    pub round_trip: bool,

    /// Estimate travel from straight-line distance instead of asking the
    /// routing service.
    #[arg(long)]
    pub estimate: bool,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

impl TripArgs {
    pub fn area(&self) -> TripArea {
        let area = TripArea::new(self.country.clone(), self.region.clone());
        match &self.city {
            Some(city) => area.with_city(city.clone()),
            None => area,
        }
    }

    pub fn request(&self, names: Vec<String>) -> PlanRequest {
        PlanRequest {
            names,
            area: self.area(),
            mode: self.mode,
            metric: self.metric,
            round_trip: self.round_trip,
        }
    }

    pub fn google_config(&self) -> Result<GoogleMapsConfig, ConfigError> {
        Ok(GoogleMapsConfig::from_key(self.api_key.clone())?
            .with_base_url(self.base_url.clone())
            .with_timeout(Duration::from_secs(self.timeout)))
    }
}

#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub trip: TripArgs,

    /// A place to visit; repeat for each stop. The first is the start.
    #[arg(short, long = "location", value_name = "NAME")]
    pub locations: Vec<String>,

    /// CSV file with a `Destination` column, read after any `--location`.
    #[arg(short, long, value_name = "CSV")]
    pub file: Option<PathBuf>,

    #[arg(short, long, default_value = "trip_map.html")]
    pub output: PathBuf,
}

impl PlanArgs {
    /// Locations from the command line followed by those in `--file`.
    pub fn names(&self) -> Result<Vec<String>, InputError> {
        let mut names = self.locations.clone();
        if let Some(path) = &self.file {
            names.extend(load_destinations(path)?);
        }
        Ok(names)
    }
}

#[derive(Debug, Clone, Args)]
pub struct ShellArgs {
    #[command(flatten)]
    pub trip: TripArgs,

    /// Default path for `save`.
    #[arg(short, long, default_value = "trip_map.html")]
    pub output: PathBuf,
}
