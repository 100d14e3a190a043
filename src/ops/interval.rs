use std::{
    fmt::{Debug, Display, Formatter},
    ops::Sub,
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::quantity::time::Seconds;

/// Time span in seconds since the scenario epoch.
pub type Interval = RangeExclusive<Seconds>;

/// Half-open `[start, end)` range.
#[must_use]
#[derive(Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RangeExclusive<T: Copy> {
    /// Inclusive.
    pub start: T,

    /// Exclusive.
    pub end: T,
}

impl<T: Copy + Debug> Debug for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl<T: Copy + Display> Display for RangeExclusive<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl<T: Copy> RangeExclusive<T> {
    pub const fn new(start: T, end: T) -> Self {
        Self { start, end }
    }
}

impl<T: Copy + Sub> RangeExclusive<T> {
    #[must_use]
    pub fn len(self) -> <T as Sub>::Output {
        self.end - self.start
    }
}

impl<T: Copy + PartialOrd> RangeExclusive<T> {
    /// Empty and inverted ranges count as empty, and so do incomparable bounds under
    /// `PartialOrd` (plain `f64` NaN).
    ///
    /// Quantities order NaN last, see [`Interval::is_finite`].
    #[must_use]
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn is_empty(self) -> bool {
        !(self.start < self.end)
    }

    /// Non-empty intersection of the two ranges.
    ///
    /// Ranges which merely touch at a boundary do not intersect.
    #[must_use]
    pub fn intersection(self, other: Self) -> Option<Self> {
        let start = if other.start > self.start { other.start } else { self.start };
        let end = if other.end < self.end { other.end } else { self.end };
        let intersection = Self { start, end };
        if intersection.is_empty() { None } else { Some(intersection) }
    }
}

impl Interval {
    /// Both bounds are finite.
    ///
    /// Check before [`RangeExclusive::is_empty`]: `0 s..NaN s` is not empty, since NaN sorts last.
    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.start.is_finite() && self.end.is_finite()
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ParseRangeError {
    #[display("expected `start..end`")]
    MissingSeparator,

    #[display("invalid bound `{_0}`")]
    InvalidBound(#[error(not(source))] String),
}

impl<T: Copy + FromStr> FromStr for RangeExclusive<T> {
    type Err = ParseRangeError;

    /// Parse `start..end`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once("..").ok_or(ParseRangeError::MissingSeparator)?;
        let parse = |bound: &str| {
            bound.trim().parse().map_err(|_| ParseRangeError::InvalidBound(bound.to_string()))
        };
        Ok(Self { start: parse(start)?, end: parse(end)? })
    }
}
