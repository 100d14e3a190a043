use std::collections::BTreeMap;

use itertools::Itertools;

use crate::{
    ops::Interval,
    prelude::*,
    pricing::{
        ChargingRequest,
        DataUnavailable,
        PriceInterval,
        Quote,
        Segment,
        StationId,
        Unavailable,
    },
    quantity::{cost::Cost, power::Kilowatts, time::Seconds},
};

/// Per-station price intervals, immutable once built.
///
/// Share it behind an `Arc` and rebuild from scratch when the prices change.
#[derive(Clone, Debug, Default)]
#[must_use]
pub struct PriceTable {
    /// Intervals sorted by their start time.
    stations: BTreeMap<StationId, Vec<PriceInterval>>,
}

impl PriceTable {
    /// Group the price rows by station.
    ///
    /// Rows are neither deduplicated nor required to be sorted. Rows with an empty or inverted
    /// range are kept but never overlap anything.
    #[instrument(skip_all)]
    pub fn build(rows: impl IntoIterator<Item = PriceInterval>) -> Result<Self, DataUnavailable> {
        let rows = rows.into_iter().collect_vec();
        if rows.is_empty() {
            return Err(DataUnavailable::Empty);
        }
        if let Some((index, field)) = rows
            .iter()
            .enumerate()
            .find_map(|(index, row)| row.non_finite_field().map(|field| (index, field)))
        {
            return Err(DataUnavailable::Malformed { index, field });
        }

        let stations: BTreeMap<_, _> = rows
            .into_iter()
            .into_group_map_by(|row| row.station_id.clone())
            .into_iter()
            .map(|(station_id, mut intervals)| {
                intervals.sort_by_key(|interval| interval.range.start);
                (station_id, intervals)
            })
            .collect();

        let table = Self { stations };
        info!(
            n_stations = table.len(),
            n_intervals = table.n_intervals(),
            "built the price table"
        );
        Ok(table)
    }

    /// Build the table, or fall back to an empty one which answers every query as unavailable.
    pub fn build_or_empty(rows: impl IntoIterator<Item = PriceInterval>) -> Self {
        Self::build(rows).unwrap_or_else(|error| {
            warn!("price data is unavailable: {error}");
            Self::default()
        })
    }

    /// Number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[must_use]
    pub fn n_intervals(&self) -> usize {
        self.stations.values().map(Vec::len).sum()
    }

    pub fn stations(&self) -> impl Iterator<Item = (&StationId, &[PriceInterval])> {
        self.stations.iter().map(|(station_id, intervals)| (station_id, intervals.as_slice()))
    }

    #[must_use]
    pub fn intervals(&self, station_id: &str) -> Option<&[PriceInterval]> {
        self.stations.get(station_id).map(Vec::as_slice)
    }

    /// Estimate the cost of charging at the station from the possible start time (inclusive)
    /// until the possible end time (exclusive).
    ///
    /// The window is billed piecewise, at the price of every interval it overlaps.
    pub fn estimate_cost(
        &self,
        station_id: &str,
        possible_start_time: Seconds,
        possible_end_time: Seconds,
        power_consumption: Kilowatts,
    ) -> Result<Cost, Unavailable> {
        self.quote_window(
            station_id,
            Interval::new(possible_start_time, possible_end_time),
            power_consumption,
        )
        .map(|quote| quote.total)
    }

    pub fn estimate(&self, request: &ChargingRequest) -> Result<Cost, Unavailable> {
        self.quote(request).map(|quote| quote.total)
    }

    /// Same as [`PriceTable::estimate`], but with the per-interval breakdown.
    pub fn quote(&self, request: &ChargingRequest) -> Result<Quote, Unavailable> {
        self.quote_window(request.station_id.as_ref(), request.window, request.power)
    }

    fn quote_window(
        &self,
        station_id: &str,
        window: Interval,
        power: Kilowatts,
    ) -> Result<Quote, Unavailable> {
        let intervals = self
            .stations
            .get(station_id)
            .ok_or_else(|| Unavailable::StationNotFound(station_id.into()))?;
        if !window.is_finite() || window.is_empty() {
            return Err(Unavailable::InvalidWindow(window));
        }

        let segments = intervals
            .iter()
            .filter_map(|interval| {
                let overlap = interval.range.intersection(window)?;
                Some(Segment::new(overlap, interval.price, power))
            })
            .collect_vec();
        let total: Cost = segments.iter().map(|segment| segment.cost).sum();
        trace!(station_id, ?window, n_segments = segments.len(), ?total, "quoted");

        if total.0.is_nan() || total <= Cost::ZERO {
            debug!(station_id, ?window, "no price coverage");
            return Err(Unavailable::NoCoverage { station_id: station_id.into(), window });
        }
        Ok(Quote { segments, total })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{pricing::Field, quantity::rate::KilowattHourRate};

    fn row(station_id: &str, start: f64, end: f64, price: f64) -> PriceInterval {
        PriceInterval::new(
            station_id,
            Interval::new(Seconds(start), Seconds(end)),
            KilowattHourRate(price),
        )
    }

    fn two_prices() -> PriceTable {
        PriceTable::build([row("S1", 0.0, 1800.0, 1.0), row("S1", 1800.0, 3600.0, 3.0)]).unwrap()
    }

    fn estimate(table: &PriceTable, start: f64, end: f64) -> Result<Cost, Unavailable> {
        table.estimate_cost("S1", Seconds(start), Seconds(end), Kilowatts(10.0))
    }

    #[test]
    fn test_single_full_coverage() {
        let table = PriceTable::build([row("S1", 0.0, 3600.0, 2.0)]).unwrap();
        assert_abs_diff_eq!(estimate(&table, 0.0, 3600.0).unwrap().0, 20.0);
    }

    #[test]
    fn test_multi_interval_span() {
        let quote = two_prices()
            .quote(&ChargingRequest::new("S1", Seconds(900.0), Seconds(2700.0), Kilowatts(10.0)))
            .unwrap();
        assert_abs_diff_eq!(quote.total.0, 10.0);
        assert_eq!(quote.segments.len(), 2);
        assert_abs_diff_eq!(quote.segments[0].energy.0, 2.5);
        assert_abs_diff_eq!(quote.segments[0].cost.0, 2.5);
        assert_abs_diff_eq!(quote.segments[1].energy.0, 2.5);
        assert_abs_diff_eq!(quote.segments[1].cost.0, 7.5);
        assert_abs_diff_eq!(quote.energy().0, 5.0);
    }

    #[test]
    fn test_unsorted_rows() {
        let table = PriceTable::build([row("S1", 1800.0, 3600.0, 3.0), row("S1", 0.0, 1800.0, 1.0)])
            .unwrap();
        assert_abs_diff_eq!(estimate(&table, 900.0, 2700.0).unwrap().0, 10.0);
        assert_eq!(table.intervals("S1").unwrap()[0].range.start, Seconds(0.0));
    }

    #[test]
    fn test_rows_are_grouped_by_station() {
        let table = PriceTable::build([
            row("S1", 0.0, 3600.0, 1.0),
            row("S2", 0.0, 3600.0, 5.0),
            row("S1", 3600.0, 7200.0, 2.0),
        ])
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.n_intervals(), 3);
        assert_eq!(table.intervals("S1").unwrap().len(), 2);
        assert_abs_diff_eq!(
            table.estimate_cost("S2", Seconds(0.0), Seconds(3600.0), Kilowatts(1.0)).unwrap().0,
            5.0
        );
    }

    #[test]
    fn test_station_not_found() {
        let table = two_prices();
        for (start, end) in [(0.0, 3600.0), (900.0, 2700.0), (5000.0, 1000.0)] {
            assert_eq!(
                table.estimate_cost("S2", Seconds(start), Seconds(end), Kilowatts(10.0)),
                Err(Unavailable::StationNotFound("S2".into())),
            );
        }
    }

    #[test]
    fn test_invalid_window() {
        let table = two_prices();
        assert!(matches!(estimate(&table, 1000.0, 1000.0), Err(Unavailable::InvalidWindow(_))));
        assert!(matches!(estimate(&table, 2000.0, 1000.0), Err(Unavailable::InvalidWindow(_))));
        assert!(matches!(estimate(&table, 0.0, f64::NAN), Err(Unavailable::InvalidWindow(_))));
        assert!(matches!(estimate(&table, f64::NAN, 10.0), Err(Unavailable::InvalidWindow(_))));
    }

    #[test]
    fn test_no_coverage() {
        let table = PriceTable::build([row("S1", 0.0, 1000.0, 1.0)]).unwrap();
        assert!(matches!(estimate(&table, 2000.0, 3000.0), Err(Unavailable::NoCoverage { .. })));
    }

    #[test]
    fn test_touching_boundary_does_not_contribute() {
        let table = PriceTable::build([row("S1", 0.0, 1000.0, 1.0)]).unwrap();
        assert!(matches!(estimate(&table, 1000.0, 2000.0), Err(Unavailable::NoCoverage { .. })));
    }

    #[test]
    fn test_shared_boundary_is_not_double_counted() {
        let table = two_prices();
        let cost = estimate(&table, 1799.0, 1801.0).unwrap();
        assert_abs_diff_eq!(cost.0, 10.0 / 3600.0 * (1.0 + 3.0), epsilon = 1e-12);
    }

    #[test]
    fn test_zero_price_is_unavailable() {
        let table = PriceTable::build([row("S1", 0.0, 3600.0, 0.0)]).unwrap();
        assert!(matches!(estimate(&table, 0.0, 3600.0), Err(Unavailable::NoCoverage { .. })));
    }

    #[test]
    fn test_gap_is_not_billed() {
        let table = PriceTable::build([row("S1", 0.0, 1000.0, 1.0), row("S1", 2000.0, 3000.0, 1.0)])
            .unwrap();
        let window = Interval::new(Seconds(0.0), Seconds(3000.0));
        let request =
            ChargingRequest::builder().station_id("S1").window(window).power(Kilowatts(3.6)).build();
        let quote = table.quote(&request).unwrap();
        assert_abs_diff_eq!(quote.total.0, 2.0);
        assert_eq!(quote.coverage(), Seconds(2000.0));
        assert!(quote.is_partial(window));
    }

    #[test]
    fn test_overlapping_prices_do_not_hide_a_gap() {
        let table = PriceTable::build([
            row("S1", 0.0, 2000.0, 1.0),
            row("S1", 1000.0, 2000.0, 1.0),
            row("S1", 2500.0, 3000.0, 1.0),
        ])
        .unwrap();
        let window = Interval::new(Seconds(0.0), Seconds(3000.0));
        let quote = table.quote(&ChargingRequest::new("S1", window.start, window.end, Kilowatts(1.0)));
        let quote = quote.unwrap();
        assert_eq!(quote.segments.len(), 3);
        assert_eq!(quote.coverage(), Seconds(2500.0));
        assert!(quote.is_partial(window));
    }

    #[test]
    fn test_full_coverage_is_not_partial() {
        let window = Interval::new(Seconds(0.0), Seconds(3600.0));
        let quote = two_prices()
            .quote(&ChargingRequest::new("S1", window.start, window.end, Kilowatts(1.0)))
            .unwrap();
        assert_eq!(quote.coverage(), Seconds(3600.0));
        assert!(!quote.is_partial(window));
    }

    #[test]
    fn test_additivity() {
        let table = two_prices();
        for (t0, t1, t2) in
            [(0.0, 1800.0, 3600.0), (100.0, 1000.0, 3000.0), (900.0, 2000.0, 2700.0)]
        {
            let whole = estimate(&table, t0, t2).unwrap();
            let left = estimate(&table, t0, t1).unwrap();
            let right = estimate(&table, t1, t2).unwrap();
            assert_abs_diff_eq!(whole.0, (left + right).0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_idempotence() {
        let table = two_prices();
        let first = estimate(&table, 900.0, 2700.0);
        assert_eq!(estimate(&table, 900.0, 2700.0), first);
        assert_eq!(estimate(&table, 900.0, 2700.0), first);
        let request = ChargingRequest::new("S1", Seconds(900.0), Seconds(2700.0), Kilowatts(10.0));
        assert_eq!(table.estimate(&request), first);
    }

    #[test]
    fn test_build_empty() {
        assert!(matches!(PriceTable::build(Vec::new()), Err(DataUnavailable::Empty)));
    }

    #[test]
    fn test_build_malformed() {
        let result =
            PriceTable::build([row("S1", 0.0, 1000.0, 1.0), row("S1", 1000.0, 2000.0, f64::NAN)]);
        assert!(matches!(
            result,
            Err(DataUnavailable::Malformed { index: 1, field: Field::Price }),
        ));
    }

    #[test]
    fn test_empty_table_is_always_unavailable() {
        let table = PriceTable::build_or_empty(Vec::new());
        assert!(table.is_empty());
        assert!(matches!(estimate(&table, 0.0, 3600.0), Err(Unavailable::StationNotFound(_))));
    }

    #[test]
    fn test_table_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PriceTable>();
    }
}
