use axum::{
    routing::{any_service, get, post},
    Router,
};
use std::sync::Arc;

use crate::clients::jma::JmaClient;
use crate::infra::runtime::mcp_transport::{make_streamable_http_service, LocalSessionManager};
use crate::tools::{registry, tool_router};

fn base_router(client: JmaClient) -> Router {
    let session_mgr = Arc::new(LocalSessionManager::default());
    let mcp_service = make_streamable_http_service(tool_router::factory(client), session_mgr);

    Router::new()
        .route("/healthz", get(|| async { "ok" }))
        .route_service("/mcp", any_service(mcp_service))
}

/// `/healthz` + streamable MCP at `/mcp`.
pub fn build_app_default(client: JmaClient) -> Router {
    base_router(client)
}

/// Default app plus the JSON-RPC tool shim at `/v1/tools`.
pub fn build_app_with_rpc_shim(client: JmaClient) -> Router {
    let reg = registry::build_registry(client.clone());
    let shim = Router::new()
        .route("/v1/tools", post(crate::api::rpc::http))
        .with_state(reg);
    base_router(client).merge(shim)
}
