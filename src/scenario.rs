use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use serde::Deserialize;

use crate::prelude::*;

/// Scenario file locating the energy price time series.
///
/// ```toml
/// infra_directory = "data/infra"
/// energy_time_series_file = "energy_prices.csv"
/// ```
#[derive(Debug, Deserialize)]
pub struct Scenario {
    /// Relative paths are resolved against the scenario file's directory.
    pub infra_directory: PathBuf,

    pub energy_time_series_file: PathBuf,

    #[serde(skip)]
    base_directory: PathBuf,
}

impl FromStr for Scenario {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}

impl Scenario {
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let mut scenario = Self::from_str(&text)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        scenario.base_directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok(scenario)
    }

    #[must_use]
    pub fn price_file_path(&self) -> PathBuf {
        self.base_directory.join(&self.infra_directory).join(&self.energy_time_series_file)
    }
}
