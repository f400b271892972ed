//! Forecast resolution: prefecture lookup, JMA document decoding and flattening.

pub mod area;
pub mod document;
pub mod error;
pub mod normalize;
pub mod telop;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use area::{AreaCatalog, Office};
pub use document::ForecastDocument;
pub use error::ForecastError;
pub use normalize::{normalize, AreaForecast, ForecastRecord, NormalizedForecast};

/// Forecast horizon requested by the caller: `short` keeps the first three
/// records per area, `weekly` keeps everything JMA published.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum ForecastType {
    #[default]
    Short,
    Weekly,
}

impl ForecastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastType::Short => "short",
            ForecastType::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ForecastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ForecastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short" => Ok(ForecastType::Short),
            "weekly" => Ok(ForecastType::Weekly),
            other => Err(format!(
                "invalid forecast_type: {other}. Must be 'short' or 'weekly'"
            )),
        }
    }
}
