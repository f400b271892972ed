use crate::clients::jma::JmaClient;
use crate::infra::config::{AppConfig, Config};
use crate::tools::tool_router;
use std::net::SocketAddr;

pub async fn run_server() -> anyhow::Result<()> {
    let cfg = Config::from_env();
    let app_cfg = AppConfig::from_env_and_toml();
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        deprecate_rest = cfg.deprecate_rest,
        jma_base = %app_cfg.jma.base_url,
        cache_area_catalog = app_cfg.jma.cache_area_catalog,
        "BOOT jma-weather-mcp"
    );

    let client = JmaClient::from_config(&app_cfg.jma);

    if cfg.mode == "stdio" {
        crate::infra::runtime::mcp_transport::serve_stdio(tool_router::factory(client))
            .await
            .map_err(|e| anyhow::anyhow!(e))?;
        return Ok(());
    }

    let app = if cfg.deprecate_rest {
        crate::infra::http_app::build_app_default(client)
    } else {
        crate::infra::http_app::build_app_with_rpc_shim(client)
    };

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    tracing::info!(%addr, "listening");
    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;
    Ok(())
}
