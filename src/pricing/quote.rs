use itertools::Itertools;
use serde::Serialize;

use crate::{
    ops::Interval,
    quantity::{
        cost::Cost,
        energy::KilowattHours,
        power::Kilowatts,
        rate::KilowattHourRate,
        time::{Hours, Seconds},
    },
};

/// Part of a charging window billed at a single price.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Overlap of the charging window with the price interval.
    pub interval: Interval,

    pub price: KilowattHourRate,
    pub energy: KilowattHours,
    pub cost: Cost,
}

impl Segment {
    pub fn new(interval: Interval, price: KilowattHourRate, power: Kilowatts) -> Self {
        let energy = power * Hours::from(interval.len());
        Self { interval, price, energy, cost: energy * price }
    }
}

/// Piecewise cost breakdown of a charging window.
#[derive(Clone, Debug, Serialize)]
#[must_use]
pub struct Quote {
    pub segments: Vec<Segment>,
    pub total: Cost,
}

impl Quote {
    /// Total energy drawn over the priced segments.
    #[must_use]
    pub fn energy(&self) -> KilowattHours {
        self.segments.iter().map(|segment| segment.energy).sum()
    }

    /// Priced time within the window.
    ///
    /// Overlapping price intervals are counted once.
    #[must_use]
    pub fn coverage(&self) -> Seconds {
        self.segments
            .iter()
            .map(|segment| segment.interval)
            .sorted_by_key(|interval| interval.start)
            .coalesce(|previous, next| {
                if next.start <= previous.end {
                    Ok(Interval::new(previous.start, previous.end.max(next.end)))
                } else {
                    Err((previous, next))
                }
            })
            .map(Interval::len)
            .sum()
    }

    /// Whether some of the window fell into gaps without a price.
    ///
    /// Gaps are not billed.
    #[must_use]
    pub fn is_partial(&self, window: Interval) -> bool {
        self.coverage() < window.len()
    }
}
