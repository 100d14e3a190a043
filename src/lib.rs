//! Charging cost estimation over time-varying station energy prices.
//!
//! Build a [`pricing::PriceTable`] once per scenario, then ask it for the cost of candidate
//! charging windows:
//!
//! ```
//! use charge_cost::{
//!     ops::Interval,
//!     pricing::{PriceInterval, PriceTable},
//!     quantity::{power::Kilowatts, rate::KilowattHourRate, time::Seconds},
//! };
//!
//! let table = PriceTable::build([PriceInterval::new(
//!     "S1",
//!     Interval::new(Seconds(0.0), Seconds(3600.0)),
//!     KilowattHourRate(2.0),
//! )])?;
//! let cost = table.estimate_cost("S1", Seconds(0.0), Seconds(3600.0), Kilowatts(10.0));
//! assert_eq!(cost.map(|cost| cost.round_to_mills().0), Ok(20.0));
//! # Ok::<(), charge_cost::pricing::DataUnavailable>(())
//! ```

pub mod ops;
pub mod prelude;
pub mod pricing;
pub mod quantity;
pub mod scenario;
pub mod source;
pub mod tables;
