use std::path::PathBuf;

use charge_cost::{
    ops::Interval,
    prelude::*,
    pricing::{ChargingRequest, StationId},
    quantity::{power::Kilowatts, time::Seconds},
    scenario::Scenario,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Estimate the cost of a single charging window.
    #[clap(name = "estimate")]
    Estimate(EstimateArgs),

    /// Rank candidate charging windows from the cheapest.
    #[clap(name = "rank")]
    Rank(RankArgs),

    /// Summarize the price table per station.
    #[clap(name = "stations")]
    Stations,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// CSV file with the `station_id,start_time,end_time,price` columns.
    #[clap(long = "prices", env = "PRICES_PATH")]
    pub prices_path: Option<PathBuf>,

    /// Scenario TOML file which locates the price file.
    #[clap(long = "scenario", env = "SCENARIO_PATH")]
    pub scenario_path: Option<PathBuf>,
}

impl SourceArgs {
    pub fn price_file_path(&self) -> Result<PathBuf> {
        match (&self.prices_path, &self.scenario_path) {
            (Some(prices_path), _) => Ok(prices_path.clone()),
            (None, Some(scenario_path)) => Ok(Scenario::read(scenario_path)?.price_file_path()),
            (None, None) => bail!("either `--prices` or `--scenario` is required"),
        }
    }
}

#[derive(clap::Args)]
pub struct ChargingArgs {
    #[clap(long = "station", env = "STATION_ID")]
    pub station_id: StationId,

    /// Charging power in kilowatts.
    #[clap(long = "power-kilowatts", env = "POWER_KILOWATTS")]
    pub power: Kilowatts,
}

#[derive(clap::Args)]
pub struct EstimateArgs {
    #[clap(flatten)]
    pub charging: ChargingArgs,

    /// Possible start time, in seconds since the scenario epoch.
    #[clap(long = "start")]
    pub start_time: Seconds,

    /// Possible end time (exclusive), in seconds since the scenario epoch.
    #[clap(long = "end")]
    pub end_time: Seconds,

    /// Print the breakdown as JSON.
    #[clap(long)]
    pub json: bool,
}

impl EstimateArgs {
    pub fn request(&self) -> ChargingRequest {
        ChargingRequest::builder()
            .station_id(self.charging.station_id.clone())
            .window(Interval::new(self.start_time, self.end_time))
            .power(self.charging.power)
            .build()
    }
}

#[derive(clap::Args)]
pub struct RankArgs {
    #[clap(flatten)]
    pub charging: ChargingArgs,

    /// Candidate window as `start..end`, repeat for more.
    #[clap(long = "window", required = true, num_args = 1..)]
    pub windows: Vec<Interval>,
}
