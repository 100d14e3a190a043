use itertools::{Either, Itertools};

use crate::{
    ops::Interval,
    pricing::{PriceTable, Unavailable},
    quantity::{cost::Cost, power::Kilowatts},
};

/// Candidate windows ordered from the cheapest.
///
/// Windows without a cost are kept apart and never ranked.
#[derive(Debug)]
#[must_use]
pub struct Ranking {
    pub priced: Vec<(Interval, Cost)>,
    pub unavailable: Vec<(Interval, Unavailable)>,
}

impl Ranking {
    #[must_use]
    pub fn cheapest(&self) -> Option<(Interval, Cost)> {
        self.priced.first().copied()
    }
}

impl PriceTable {
    pub fn rank(
        &self,
        station_id: &str,
        windows: impl IntoIterator<Item = Interval>,
        power: Kilowatts,
    ) -> Ranking {
        let (mut priced, unavailable): (Vec<_>, Vec<_>) =
            windows.into_iter().partition_map(|window| {
                match self.estimate_cost(station_id, window.start, window.end, power) {
                    Ok(cost) => Either::Left((window, cost)),
                    Err(reason) => Either::Right((window, reason)),
                }
            });
        priced.sort_by_key(|(_, cost)| *cost);
        Ranking { priced, unavailable }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{
        pricing::PriceInterval,
        quantity::{rate::KilowattHourRate, time::Seconds},
    };

    fn window(start: f64, end: f64) -> Interval {
        Interval::new(Seconds(start), Seconds(end))
    }

    #[test]
    fn test_rank() {
        let table = PriceTable::build([
            PriceInterval::new("S1", window(0.0, 3600.0), KilowattHourRate(3.0)),
            PriceInterval::new("S1", window(3600.0, 7200.0), KilowattHourRate(1.0)),
        ])
        .unwrap();
        let ranking = table.rank(
            "S1",
            [
                window(0.0, 3600.0),
                window(9000.0, 9600.0),
                window(3600.0, 7200.0),
                window(10.0, 0.0),
            ],
            Kilowatts(1.0),
        );

        assert_eq!(ranking.priced.len(), 2);
        let (cheapest, cost) = ranking.cheapest().unwrap();
        assert_eq!(cheapest, window(3600.0, 7200.0));
        assert_abs_diff_eq!(cost.0, 1.0);
        assert_eq!(ranking.priced[1].0, window(0.0, 3600.0));

        assert_eq!(ranking.unavailable.len(), 2);
        assert!(matches!(ranking.unavailable[0].1, Unavailable::NoCoverage { .. }));
        assert!(matches!(ranking.unavailable[1].1, Unavailable::InvalidWindow(_)));
    }

    #[test]
    fn test_rank_unknown_station() {
        let ranking = PriceTable::default().rank("S1", [window(0.0, 1.0)], Kilowatts(1.0));
        assert!(ranking.cheapest().is_none());
        assert_eq!(ranking.unavailable.len(), 1);
    }
}
