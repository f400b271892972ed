use reqwest::RequestBuilder;

/// Generate a request id suitable for log correlation.
pub fn generate_request_id() -> String {
    let now = chrono::Utc::now();
    format!(
        "jma-{}-{}",
        now.timestamp(),
        now.timestamp_subsec_nanos()
    )
}

pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Add standard headers to an outgoing request. Returns the updated builder and the request id used.
pub fn add_standard_headers(
    builder: RequestBuilder,
    request_id: Option<String>,
) -> (RequestBuilder, String) {
    let rid = request_id.unwrap_or_else(generate_request_id);
    let b = builder
        .header("x-request-id", rid.as_str())
        .header(reqwest::header::USER_AGENT, user_agent());
    (b, rid)
}
