//! Station energy prices and charging cost estimation.

mod error;
mod interval;
mod quote;
mod ranking;
mod request;
mod station;
mod table;

pub use self::{
    error::{DataUnavailable, Field, Unavailable},
    interval::PriceInterval,
    quote::{Quote, Segment},
    ranking::Ranking,
    request::ChargingRequest,
    station::StationId,
    table::PriceTable,
};
