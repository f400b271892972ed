use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::jma::JmaClient;
use crate::core::error::GatewayError;
use crate::core::tool::Tool;
use crate::tools::weather::WeatherForecastTool;

#[derive(Clone, Default)]
pub struct ToolRegistry {
    by_name: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        let map = iter.into_iter().map(|t| (t.name(), t)).collect();
        Self { by_name: Arc::new(map) }
    }

    /// Metadata for every tool, sorted by name so listings are stable.
    pub fn list(&self) -> Vec<ToolMeta> {
        let mut metas: Vec<ToolMeta> = self
            .by_name
            .values()
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect();
        metas.sort_by_key(|m| m.name);
        metas
    }

    pub async fn call(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let t = self
            .by_name
            .get(name)
            .ok_or_else(|| GatewayError::UnknownTool(name.to_string()))?;
        t.call(args).await
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

/// Registry exposing the weather tool backed by `client`.
pub fn build_registry(client: JmaClient) -> ToolRegistry {
    ToolRegistry::with_tools([Arc::new(WeatherForecastTool::new(client)) as Arc<dyn Tool>])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tool::ToolSpec;
    use async_trait::async_trait;

    struct Echo;

    impl ToolSpec for Echo {
        fn name(&self) -> &'static str { "test.echo2" }
        fn description(&self) -> &'static str { "echo tool" }
        fn input_schema(&self) -> serde_json::Value { serde_json::json!({"type":"object"}) }
    }

    #[async_trait]
    impl Tool for Echo {
        async fn call(&self, args: &serde_json::Value) -> Result<serde_json::Value, GatewayError> {
            Ok(args.clone())
        }
    }

    #[tokio::test]
    async fn registry_lists_and_calls() {
        let reg = ToolRegistry::with_tools([Arc::new(Echo) as Arc<dyn Tool>]);
        let metas = reg.list();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "test.echo2");
        let out = reg.call("test.echo2", &serde_json::json!({"x": 2})).await.unwrap();
        assert_eq!(out["x"], 2);
    }

    #[tokio::test]
    async fn unknown_tool_is_reported() {
        let reg = ToolRegistry::new();
        let err = reg.call("nope", &serde_json::Value::Null).await.unwrap_err();
        assert!(matches!(err, GatewayError::UnknownTool(ref n) if n == "nope"));
    }

    #[test]
    fn default_registry_exposes_weather_tool() {
        let reg = build_registry(JmaClient::new("http://127.0.0.1:9"));
        let metas = reg.list();
        assert_eq!(metas.len(), 1);
        assert_eq!(metas[0].name, "get_weather_forecast");
        assert_eq!(metas[0].input_schema["required"][0], "prefecture_name");
    }
}
