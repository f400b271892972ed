pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Logs go to stderr so stdio mode keeps stdout for MCP frames.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Record a metric through the `metrics` facade and mirror it as a log line.
///
/// `*_total` metrics are counters; everything else is a histogram sample.
pub fn log_metric(tool: &'static str, metric: &'static str, value: f64) {
    if metric.ends_with("_total") {
        metrics::counter!(metric, "tool" => tool).increment(value as u64);
    } else {
        metrics::histogram!(metric, "tool" => tool).record(value);
    }
    tracing::info!(tool = tool, metric = metric, value = value, "metric");
}
