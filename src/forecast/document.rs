//! Wire shape of `forecast/{areaCode}.json`.
//!
//! Every attribute is a parallel array indexed by `timeDefines`. Arrays are
//! frequently shorter than the timestamp axis, so nothing here assumes equal
//! lengths. Attribute values are kept as raw JSON and passed through as-is.

use serde::Deserialize;
use serde_json::Value;

/// Top level: one block per publishing office report (short-range, weekly).
pub type ForecastDocument = Vec<OfficeForecast>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfficeForecast {
    #[serde(default)]
    pub publishing_office: String,
    #[serde(default)]
    pub report_datetime: String,
    #[serde(default)]
    pub time_series: Vec<TimeSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    #[serde(default)]
    pub time_defines: Vec<String>,
    #[serde(default)]
    pub areas: Vec<AreaSeries>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AreaRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AreaSeries {
    #[serde(default)]
    pub area: AreaRef,
    #[serde(default)]
    pub weathers: Vec<Value>,
    #[serde(default)]
    pub weather_codes: Vec<Value>,
    #[serde(default)]
    pub winds: Vec<Value>,
    #[serde(default)]
    pub waves: Vec<Value>,
    #[serde(default)]
    pub pops: Vec<Value>,
    #[serde(default)]
    pub temps: Vec<Value>,
    #[serde(default)]
    pub temps_min: Vec<Value>,
    #[serde(default)]
    pub temps_max: Vec<Value>,
}
