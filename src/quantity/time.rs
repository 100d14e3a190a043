quantity!(
    /// Seconds since the scenario epoch, or a duration in seconds.
    Seconds,
    "s"
);

quantity!(Hours, "h");

pub const SECONDS_PER_HOUR: f64 = 3600.0;

impl From<Seconds> for Hours {
    fn from(seconds: Seconds) -> Self {
        Self(seconds.0 / SECONDS_PER_HOUR)
    }
}
