//! `get_weather_forecast`: prefecture name in, JSON text out.
//!
//! Every failure is folded into an `{"error": ...}` payload so the calling
//! agent can read it as ordinary tool output.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::clients::jma::JmaClient;
use crate::core::error::GatewayError;
use crate::core::tool::{Tool, ToolSpec};
use crate::forecast::{normalize, ForecastError, ForecastType, NormalizedForecast};

pub const TOOL_NAME: &str = "get_weather_forecast";
pub const TOOL_DESCRIPTION: &str = "日本の都道府県別天気予報を取得します。気象庁のデータから、短期予報（short: 3日間）または週間予報（weekly: 7日間）を返します。";
pub const NOT_FOUND_HINT: &str = "都道府県名を確認してください。例: 東京、東京都、北海道、大阪、大阪府";

/// Validated tool arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
pub struct ForecastRequest {
    /// 都道府県名（例: "東京", "東京都", "大阪", "北海道"）
    pub prefecture_name: String,
    /// short: 短期予報（3日間）, weekly: 週間予報（7日間）
    #[serde(default)]
    pub forecast_type: ForecastType,
}

impl ForecastRequest {
    pub fn from_args(args: &serde_json::Map<String, Value>) -> Result<Self, String> {
        let prefecture_name = args
            .get("prefecture_name")
            .and_then(|v| v.as_str())
            .ok_or("missing required field: prefecture_name")?
            .to_owned();
        let forecast_type = match args.get("forecast_type") {
            None | Some(Value::Null) => ForecastType::default(),
            Some(Value::String(s)) => s.parse()?,
            Some(other) => return Err(format!("invalid forecast_type: {other}")),
        };
        Ok(Self { prefecture_name, forecast_type })
    }
}

pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "prefecture_name": {
                "type": "string",
                "description": "都道府県名（例: \"東京\", \"東京都\", \"大阪\", \"北海道\"）"
            },
            "forecast_type": {
                "type": "string",
                "enum": ["short", "weekly"],
                "default": "short",
                "description": "short: 短期予報（3日間）, weekly: 週間予報（7日間）"
            }
        },
        "required": ["prefecture_name"]
    })
}

/// Resolve → fetch → normalize, stopping at the first failure.
pub async fn resolve_forecast(
    client: &JmaClient,
    prefecture_name: &str,
    forecast_type: ForecastType,
) -> Result<NormalizedForecast, ForecastError> {
    let code = client.resolve_area_code(prefecture_name).await?;
    let doc = client.fetch_forecast(&code).await?;
    normalize(&doc, forecast_type)
}

/// Error payload handed back to the agent in place of a forecast.
pub fn error_payload(err: &ForecastError) -> Value {
    if err.is_not_found() {
        json!({ "error": err.to_string(), "hint": NOT_FOUND_HINT })
    } else {
        json!({ "error": format!("天気予報の取得に失敗しました: {err}") })
    }
}

/// Tool entry point. Never fails: errors come back as JSON text too.
pub async fn get_weather_forecast(
    client: &JmaClient,
    prefecture_name: &str,
    forecast_type: ForecastType,
) -> String {
    tracing::info!(prefecture = %prefecture_name, forecast_type = %forecast_type, "get_weather_forecast");
    match resolve_forecast(client, prefecture_name, forecast_type).await {
        Ok(forecast) => {
            tracing::debug!(areas = forecast.areas.len(), "forecast normalized");
            to_pretty_json(&forecast)
        }
        Err(e) => {
            tracing::warn!(prefecture = %prefecture_name, error = %e, "forecast lookup failed");
            to_pretty_json(&error_payload(&e))
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        json!({ "error": format!("天気予報の取得に失敗しました: {e}") }).to_string()
    })
}

/// Registry adapter for the JSON-RPC shim.
#[derive(Clone)]
pub struct WeatherForecastTool {
    client: JmaClient,
}

impl WeatherForecastTool {
    pub fn new(client: JmaClient) -> Self {
        Self { client }
    }
}

impl ToolSpec for WeatherForecastTool {
    fn name(&self) -> &'static str {
        TOOL_NAME
    }
    fn description(&self) -> &'static str {
        TOOL_DESCRIPTION
    }
    fn input_schema(&self) -> Value {
        input_schema()
    }
}

#[async_trait]
impl Tool for WeatherForecastTool {
    async fn call(&self, arguments: &Value) -> Result<Value, GatewayError> {
        let args = arguments
            .as_object()
            .ok_or_else(|| GatewayError::InvalidParams("arguments must be an object".into()))?;
        let req = ForecastRequest::from_args(args).map_err(GatewayError::InvalidParams)?;
        let text = get_weather_forecast(&self.client, &req.prefecture_name, req.forecast_type).await;
        Ok(json!({ "content": [{ "type": "text", "text": text }], "isError": false }))
    }
}
