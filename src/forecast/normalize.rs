//! Flatten the nested JMA document into one record list per area.

use serde::Serialize;
use serde_json::Value;

use super::document::{AreaSeries, ForecastDocument};
use super::error::ForecastError;
use super::{telop, ForecastType};

/// Number of records kept per area for a short-range forecast.
pub const SHORT_RANGE_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedForecast {
    pub forecast_type: ForecastType,
    pub areas: Vec<AreaForecast>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaForecast {
    pub area_name: String,
    pub area_code: String,
    pub publishing_office: String,
    pub report_datetime: String,
    pub forecasts: Vec<ForecastRecord>,
}

/// One timestamp of one area. Attributes absent at this index are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForecastRecord {
    pub datetime: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wind: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_min: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_max: Option<Value>,
}

/// Flatten every (time series × area) pair, then apply the range window.
pub fn normalize(
    doc: &ForecastDocument,
    forecast_type: ForecastType,
) -> Result<NormalizedForecast, ForecastError> {
    let mut areas = Vec::new();
    for block in doc {
        for series in &block.time_series {
            for area in &series.areas {
                areas.push(AreaForecast {
                    area_name: area.area.name.clone(),
                    area_code: area.area.code.clone(),
                    publishing_office: block.publishing_office.clone(),
                    report_datetime: block.report_datetime.clone(),
                    forecasts: flatten_area(&series.time_defines, area)?,
                });
            }
        }
    }

    let mut out = NormalizedForecast { forecast_type, areas };
    if forecast_type == ForecastType::Short {
        truncate(&mut out, SHORT_RANGE_LIMIT);
    }
    Ok(out)
}

/// Cut every area's record list to at most `limit` entries.
pub fn truncate(forecast: &mut NormalizedForecast, limit: usize) {
    for area in &mut forecast.areas {
        area.forecasts.truncate(limit);
    }
}

fn flatten_area(
    time_defines: &[String],
    area: &AreaSeries,
) -> Result<Vec<ForecastRecord>, ForecastError> {
    let at = |values: &[Value], i: usize| values.get(i).cloned();

    time_defines
        .iter()
        .enumerate()
        .map(|(i, datetime)| {
            let (weather_code, weather_description) = match area.weather_codes.get(i) {
                Some(raw) => {
                    let code = parse_weather_code(raw)?;
                    (Some(code), Some(telop::decode(code)))
                }
                None => (None, None),
            };
            Ok(ForecastRecord {
                datetime: datetime.clone(),
                weather: at(&area.weathers, i),
                weather_code,
                weather_description,
                wind: at(&area.winds, i),
                wave: at(&area.waves, i),
                precipitation_probability: at(&area.pops, i),
                temperature: at(&area.temps, i),
                temperature_min: at(&area.temps_min, i),
                temperature_max: at(&area.temps_max, i),
            })
        })
        .collect()
}

// Blank codes show up in weekly reports for the current day; they decode as 0.
fn parse_weather_code(raw: &Value) -> Result<i64, ForecastError> {
    let malformed = || ForecastError::Malformed(format!("invalid weather code: {raw}"));
    match raw {
        Value::Null => Ok(0),
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .ok_or_else(malformed),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}
