//! Dimensioned quantities.
//!
//! The time unit is the second, power is rated per hour: `power × hours = energy`
//! and `energy × rate = cost`.

#[macro_use]
mod macros;

pub mod cost;
pub mod energy;
pub mod power;
pub mod rate;
pub mod time;
