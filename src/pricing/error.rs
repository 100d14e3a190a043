use crate::{ops::Interval, pricing::StationId};

/// Price rows could not be turned into a usable table.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DataUnavailable {
    #[display("no price rows")]
    Empty,

    #[display("price row #{index} has a non-finite `{field}`")]
    Malformed {
        index: usize,
        #[error(not(source))]
        field: Field,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, derive_more::Display)]
pub enum Field {
    #[display("start_time")]
    RangeStart,

    #[display("end_time")]
    RangeEnd,

    #[display("price")]
    Price,
}

/// No meaningful cost could be computed for a charging request.
///
/// Never fatal: the caller decides on the fallback.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum Unavailable {
    #[display("no price data for station `{_0}`")]
    StationNotFound(#[error(not(source))] StationId),

    #[display("charging window {_0} is empty")]
    InvalidWindow(#[error(not(source))] Interval),

    #[display("no price coverage for station `{station_id}` within {window}")]
    NoCoverage {
        #[error(not(source))]
        station_id: StationId,

        #[error(not(source))]
        window: Interval,
    },
}
