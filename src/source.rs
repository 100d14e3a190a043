//! CSV price files: `station_id,start_time,end_time,price`, times in seconds since the scenario
//! epoch and prices per kilowatt-hour. Extra columns are ignored.

use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;

use crate::{
    ops::Interval,
    prelude::*,
    pricing::{PriceInterval, PriceTable, StationId},
    quantity::{rate::KilowattHourRate, time::Seconds},
};

#[derive(Deserialize)]
struct PriceRecord {
    station_id: StationId,
    start_time: Seconds,
    end_time: Seconds,
    price: KilowattHourRate,
}

impl From<PriceRecord> for PriceInterval {
    fn from(record: PriceRecord) -> Self {
        let range = Interval::new(record.start_time, record.end_time);
        Self::new(record.station_id, range, record.price)
    }
}

pub fn read_price_rows(reader: impl Read) -> Result<Vec<PriceInterval>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<PriceRecord>()
        .map(|record| {
            record.map(PriceInterval::from).map_err(|error| {
                let context = error.position().map_or_else(
                    || "malformed price row".to_owned(),
                    |position| format!("malformed price row at line {}", position.line()),
                );
                Error::new(error).context(context)
            })
        })
        .collect()
}

#[instrument(skip_all, fields(path = %path.display()))]
pub fn read_price_file(path: &Path) -> Result<Vec<PriceInterval>> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let rows = read_price_rows(file)?;
    debug!(n_rows = rows.len(), "read the price file");
    Ok(rows)
}

/// Load the price table, falling back to the empty table if the file cannot be used.
///
/// The failure is logged once, and every query against the empty table is unavailable.
pub fn load_price_table(path: &Path) -> PriceTable {
    match read_price_file(path) {
        Ok(rows) => PriceTable::build_or_empty(rows),
        Err(error) => {
            warn!("failed to load the energy prices: {error:#}");
            PriceTable::default()
        }
    }
}
