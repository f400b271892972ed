use std::sync::Arc;

use axum::{routing::any_service, Router};
use http_body_util::BodyExt; // for .collect
use hyper::{header, Request, StatusCode};
use serde_json::{json, Value};
use tokio::time::{timeout, Duration};
use tower::ServiceExt; // for .oneshot

use jma_weather_mcp::clients::jma::JmaClient;
use jma_weather_mcp::infra::runtime::mcp_transport;
use jma_weather_mcp::tools::tool_router;

fn mock_jma(server: &httpmock::MockServer) {
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/bosai/common/const/area.json");
        // Raw body so the served key order (not sorted order) reaches the client.
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"offices":{"130000":{"name":"東京都","enName":"Tokyo"},"016000":{"name":"石狩・空知・後志地方"},"110000":{"name":"埼玉県"}}}"#);
    });
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/bosai/forecast/data/forecast/130000.json");
        then.status(200).json_body(json!([{
            "publishingOffice": "気象庁",
            "reportDatetime": "2024-10-08T11:00:00+09:00",
            "timeSeries": [{
                "timeDefines": ["d1", "d2", "d3", "d4", "d5", "d6", "d7"],
                "areas": [{
                    "area": { "name": "東京地方", "code": "130010" },
                    "weatherCodes": ["100", "200", "300", "400", "999", "101", "201"]
                }]
            }]
        }]));
    });
}

fn post(body: Value, session_id: Option<&str>) -> Request<axum::body::Body> {
    let mut b = Request::builder()
        .method("POST")
        .uri("/mcp")
        .header(header::ACCEPT, "application/json, text/event-stream")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(sid) = session_id {
        b = b.header("MCP-Session-Id", sid);
    }
    b.body(axum::body::Body::from(body.to_string())).unwrap()
}

async fn sse_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    let s = String::from_utf8_lossy(&bytes);
    s.lines()
        .find_map(|line| line.strip_prefix("data: ").map(|d| d.to_string()))
        .and_then(|d| serde_json::from_str::<Value>(&d).ok())
        .expect("Did not find an rpcResponse in the event stream")
}

#[tokio::test]
async fn initialize_list_and_call_weather_tool_over_streamable_http() {
    let server = httpmock::MockServer::start();
    mock_jma(&server);

    let factory = tool_router::factory(JmaClient::new(server.base_url()));
    let session_mgr = Arc::new(mcp_transport::LocalSessionManager::default());
    let svc = mcp_transport::make_streamable_http_service(factory, session_mgr);
    let app = Router::new().route_service("/mcp", any_service(svc));

    // Initialize
    let init = json!({
        "jsonrpc":"2.0","id":1,"method":"initialize",
        "params":{ "protocolVersion":"2025-03-26","capabilities":{},"clientInfo":{"name":"test","version":"0.1"} }
    });
    let init_res = app.clone().oneshot(post(init, None)).await.unwrap();
    assert!(init_res.status().is_success());
    let session_id = init_res
        .headers()
        .get("MCP-Session-Id")
        .unwrap()
        .to_str()
        .unwrap()
        .to_owned();

    let initialized = json!({"jsonrpc":"2.0","method":"notifications/initialized","params":{}});
    let initialized_res = app
        .clone()
        .oneshot(post(initialized, Some(&session_id)))
        .await
        .unwrap();
    assert_eq!(initialized_res.status(), StatusCode::ACCEPTED);

    // tools/list
    let list = json!({"jsonrpc":"2.0","id":2,"method":"tools/list","params":{}});
    let list_res = timeout(Duration::from_secs(20), app.clone().oneshot(post(list, Some(&session_id))))
        .await
        .unwrap()
        .unwrap();
    assert!(list_res.status().is_success());
    let listed = sse_json(list_res).await;
    assert_eq!(listed["result"]["tools"][0]["name"], "get_weather_forecast");
    let schema = &listed["result"]["tools"][0]["inputSchema"];
    assert_eq!(schema["properties"]["prefecture_name"]["type"], "string");
    assert_eq!(schema["required"], json!(["prefecture_name"]));

    // tools/call
    let call = json!({
        "jsonrpc":"2.0","id":3,"method":"tools/call",
        "params": {"name":"get_weather_forecast","arguments":{"prefecture_name":"東京","forecast_type":"short"}}
    });
    let call_res = app.clone().oneshot(post(call, Some(&session_id))).await.unwrap();
    assert!(call_res.status().is_success());
    let v = sse_json(call_res).await;
    let text = v["result"]["content"][0]["text"]
        .as_str()
        .expect("tool result carries text content");
    let payload: Value = serde_json::from_str(text).unwrap();
    assert_eq!(payload["forecast_type"], "short");
    let forecasts = payload["areas"][0]["forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 3);
    assert_eq!(forecasts[2]["weather_description"], "雨");

    // Bad arguments are rejected before the tool runs.
    let bad = json!({
        "jsonrpc":"2.0","id":4,"method":"tools/call",
        "params": {"name":"get_weather_forecast","arguments":{"prefecture_name":"東京","forecast_type":"monthly"}}
    });
    let bad_res = app.clone().oneshot(post(bad, Some(&session_id))).await.unwrap();
    let v = sse_json(bad_res).await;
    assert_eq!(v["error"]["code"], -32602);
}
