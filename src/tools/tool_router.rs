use std::future::Future;

use rmcp::handler::server::tool::{Parameters, ToolRouter};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};
use rmcp::ErrorData as McpError;

use crate::clients::jma::JmaClient;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::weather::{self, ForecastRequest};

#[derive(Clone)]
pub struct WeatherSvc {
    pub client: JmaClient,
}

impl ServerHandler for WeatherSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            instructions: Some(
                "get_weather_forecast で都道府県別の気象庁天気予報を取得できます。".into(),
            ),
            ..Default::default()
        }
    }
}

#[rmcp::tool_router]
impl WeatherSvc {
    #[rmcp::tool(
        name = "get_weather_forecast",
        description = "日本の都道府県別天気予報を取得します。引数: prefecture_name（例: 東京, 大阪府, 北海道）, forecast_type（short: 3日間 / weekly: 7日間, 既定 short）。結果はJSON文字列です。"
    )]
    async fn get_weather_forecast(
        &self,
        params: Parameters<ForecastRequest>,
    ) -> Result<CallToolResult, McpError> {
        let req = params.0;
        tracing::debug!(params = ?req, "get_weather_forecast invoked");
        let text = weather::get_weather_forecast(&self.client, &req.prefecture_name, req.forecast_type).await;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

pub type WeatherRouter = ToolRouter<WeatherSvc>;

impl WeatherSvc {
    pub fn new(client: JmaClient) -> Self {
        Self { client }
    }

    pub fn router() -> WeatherRouter {
        Self::tool_router()
    }
}

/// Handler/router pair factory for the rmcp transports. Clones share the client.
pub fn factory(
    client: JmaClient,
) -> impl Fn() -> (WeatherSvc, WeatherRouter) + Send + Sync + Clone + 'static {
    move || (WeatherSvc::new(client.clone()), WeatherSvc::router())
}
