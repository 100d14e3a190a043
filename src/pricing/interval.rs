use serde::{Deserialize, Serialize};

use crate::{
    ops::Interval,
    pricing::{Field, StationId},
    quantity::rate::KilowattHourRate,
};

/// Price valid at a station during the time range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceInterval {
    pub station_id: StationId,
    pub range: Interval,
    pub price: KilowattHourRate,
}

impl PriceInterval {
    pub fn new(station_id: impl Into<StationId>, range: Interval, price: KilowattHourRate) -> Self {
        Self { station_id: station_id.into(), range, price }
    }

    /// First non-finite field, if any.
    pub(super) const fn non_finite_field(&self) -> Option<Field> {
        if !self.range.start.is_finite() {
            Some(Field::RangeStart)
        } else if !self.range.end.is_finite() {
            Some(Field::RangeEnd)
        } else if !self.price.is_finite() {
            Some(Field::Price)
        } else {
            None
        }
    }
}
