use crate::{
    ops::Interval,
    pricing::StationId,
    quantity::{power::Kilowatts, time::Seconds},
};

/// Prospective charging session proposed by the dispatcher.
#[derive(Clone, Debug, bon::Builder)]
#[must_use]
pub struct ChargingRequest {
    #[builder(into)]
    pub station_id: StationId,

    /// Possible start (inclusive) and end (exclusive) times.
    pub window: Interval,

    /// Instantaneous charging power.
    pub power: Kilowatts,
}

impl ChargingRequest {
    pub fn new(
        station_id: impl Into<StationId>,
        possible_start_time: Seconds,
        possible_end_time: Seconds,
        power_consumption: Kilowatts,
    ) -> Self {
        Self::builder()
            .station_id(station_id)
            .window(Interval::new(possible_start_time, possible_end_time))
            .power(power_consumption)
            .build()
    }
}
