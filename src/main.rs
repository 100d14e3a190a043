mod cli;

use charge_cost::{
    prelude::*,
    pricing::PriceTable,
    source::read_price_file,
    tables::{build_quote_table, build_ranking_table, build_stations_table},
};
use clap::{Parser, crate_version};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command, EstimateArgs, RankArgs, SourceArgs};

fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .without_time()
        .compact()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let prices = load_prices(&args.source)?;

    match args.command {
        Command::Estimate(args) => estimate(&prices, &args)?,
        Command::Rank(args) => rank(&prices, &args),
        Command::Stations => println!("{}", build_stations_table(&prices)),
    }

    info!("done!");
    Ok(())
}

#[instrument(skip_all)]
fn load_prices(args: &SourceArgs) -> Result<PriceTable> {
    let path = args.price_file_path()?;
    let rows = read_price_file(&path)?;
    PriceTable::build(rows).with_context(|| format!("no usable prices in `{}`", path.display()))
}

/// Unavailability is reported, not failed on.
#[instrument(skip_all, fields(station_id = %args.charging.station_id))]
fn estimate(prices: &PriceTable, args: &EstimateArgs) -> Result {
    let request = args.request();
    match prices.quote(&request) {
        Ok(quote) => {
            if quote.is_partial(request.window) {
                warn!(coverage = %quote.coverage(), "the window is only partially priced");
            }
            info!(total = %quote.total, "estimated");
            if args.json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!("{}", build_quote_table(&quote));
            }
        }
        Err(reason) => {
            warn!(%reason, "the cost is unavailable");
            if args.json {
                println!("{}", json!({ "unavailable": reason.to_string() }));
            }
        }
    }
    Ok(())
}

#[instrument(skip_all, fields(station_id = %args.charging.station_id))]
fn rank(prices: &PriceTable, args: &RankArgs) {
    let ranking = prices.rank(
        args.charging.station_id.as_ref(),
        args.windows.iter().copied(),
        args.charging.power,
    );
    match ranking.cheapest() {
        Some((window, cost)) => info!(%window, %cost, "found the cheapest window"),
        None => warn!("none of the windows could be priced"),
    }
    println!("{}", build_ranking_table(&ranking));
}
