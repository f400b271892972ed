use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::jma::JmaClient;
use crate::forecast::ForecastType;
use crate::infra::config::AppConfig;
use crate::tools::weather;

#[derive(Parser)]
#[command(name = "jma-weather-mcp")]
#[command(about = "JMA weather forecast tool gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway (MODE=server|stdio)
    Serve,
    /// Health check a running gateway
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Fetch a forecast locally and print the tool output
    Forecast {
        /// Prefecture name, e.g. 東京 or 大阪府
        prefecture: String,
        /// short (3 entries per area) or weekly
        #[arg(short = 't', long = "type", default_value = "short")]
        forecast_type: ForecastType,
        /// Override the JMA base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Gateway failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Forecast { prefecture, forecast_type, base_url } => {
            match forecast(&prefecture, forecast_type, base_url).await {
                Ok(text) => {
                    println!("{text}");
                    ExitCode::SUCCESS
                }
                Err(text) => {
                    println!("{text}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
    if !matches!(mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", mode).into());
    }

    if mode == "server" {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);

        if port == 0 {
            return Err("PORT cannot be 0".into());
        }
    }

    let app_cfg = AppConfig::from_env_and_toml();
    if !(app_cfg.jma.base_url.starts_with("http://") || app_cfg.jma.base_url.starts_with("https://")) {
        return Err(format!("Invalid JMA base URL: {}", app_cfg.jma.base_url).into());
    }
    if app_cfg.jma.timeout_ms == 0 {
        return Err("JMA timeout cannot be 0".into());
    }

    Ok(())
}

async fn show_status(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();

    let health_response = client
        .get(format!("{}/healthz", url))
        .timeout(std::time::Duration::from_secs(5))
        .send()
        .await?;

    println!(
        "🏥 Health Status: {}",
        if health_response.status().is_success() {
            "✅ Healthy"
        } else {
            "❌ Unhealthy"
        }
    );

    let tools_response = client
        .post(format!("{}/v1/tools", url))
        .header("content-type", "application/json")
        .json(&serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/list",
            "params": {}
        }))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await;

    match tools_response {
        Ok(resp) if resp.status().is_success() => {
            println!("🔧 Tools: ✅ Available");
        }
        Ok(resp) => {
            println!("🔧 Tools: ❌ HTTP {}", resp.status());
        }
        Err(_) => {
            println!("🔧 Tools: ❌ Unavailable");
        }
    }

    let app_cfg = AppConfig::from_env_and_toml();
    println!("\n📋 Configuration:");
    println!(
        "  Mode: {}",
        std::env::var("MODE").unwrap_or_else(|_| "server".into())
    );
    println!(
        "  Port: {}",
        std::env::var("PORT").unwrap_or_else(|_| "8080".into())
    );
    println!(
        "  Log Level: {}",
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into())
    );
    println!("  JMA Base URL: {}", app_cfg.jma.base_url);
    println!(
        "  Area Catalog Cache: {}",
        if app_cfg.jma.cache_area_catalog { "on" } else { "off" }
    );

    Ok(())
}

/// Run the tool once. `Err` carries the error payload so the caller can still print it.
async fn forecast(
    prefecture: &str,
    forecast_type: ForecastType,
    base_url: Option<String>,
) -> Result<String, String> {
    let mut cfg = AppConfig::from_env_and_toml().jma;
    if let Some(base) = base_url {
        cfg.base_url = base;
    }
    let client = JmaClient::from_config(&cfg);
    match weather::resolve_forecast(&client, prefecture, forecast_type).await {
        Ok(f) => serde_json::to_string_pretty(&f).map_err(|e| e.to_string()),
        Err(e) => Err(serde_json::to_string_pretty(&weather::error_payload(&e))
            .unwrap_or_else(|_| e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    fn clear_env() {
        for key in ["MODE", "PORT", "GATEWAY_CONFIG", "JMA_BASE_URL", "JMA_TIMEOUT_MS"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn parses_forecast_subcommand() {
        let cli = Cli::try_parse_from(["jma-weather-mcp", "forecast", "東京", "--type", "weekly"]).unwrap();
        match cli.command {
            Some(Commands::Forecast { prefecture, forecast_type, base_url }) => {
                assert_eq!(prefecture, "東京");
                assert_eq!(forecast_type, ForecastType::Weekly);
                assert!(base_url.is_none());
            }
            _ => panic!("expected forecast subcommand"),
        }
    }

    #[test]
    fn rejects_unknown_forecast_type() {
        assert!(Cli::try_parse_from(["jma-weather-mcp", "forecast", "東京", "-t", "daily"]).is_err());
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["jma-weather-mcp"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn health_check_returns_ok_on_200() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/healthz");
            then.status(200).body("ok");
        });
        assert!(health_check(&server.base_url()).await.is_ok());

        let bad = MockServer::start();
        bad.mock(|when, then| {
            when.method(GET).path("/healthz");
            then.status(500);
        });
        assert!(health_check(&bad.base_url()).await.is_err());
    }

    #[test]
    #[serial]
    fn validate_config_accepts_defaults() {
        clear_env();
        assert!(validate_config().is_ok());
    }

    #[test]
    #[serial]
    fn validate_config_rejects_bad_mode_port_and_base() {
        clear_env();
        env::set_var("MODE", "invalid");
        assert!(validate_config().unwrap_err().to_string().contains("Invalid MODE"));

        env::set_var("MODE", "server");
        env::set_var("PORT", "0");
        assert!(validate_config().unwrap_err().to_string().contains("PORT cannot be 0"));

        env::set_var("PORT", "8080");
        env::set_var("JMA_BASE_URL", "ftp://example");
        assert!(validate_config().unwrap_err().to_string().contains("Invalid JMA base URL"));
        clear_env();
    }

    #[tokio::test]
    async fn show_status_handles_non_200() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/healthz");
            then.status(500).body("boom");
        });
        server.mock(|when, then| {
            when.method(POST).path("/v1/tools");
            then.status(500).body("boom");
        });
        assert!(show_status(&server.base_url()).await.is_ok());
    }

    #[tokio::test]
    async fn show_status_fails_when_service_is_down() {
        assert!(show_status("http://127.0.0.1:9").await.is_err());
    }

    #[tokio::test]
    #[serial]
    async fn forecast_command_uses_base_url_override() {
        use httpmock::prelude::*;
        clear_env();
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/bosai/common/const/area.json");
            then.status(200).json_body(serde_json::json!({ "offices": { "010000": { "name": "北海道" } } }));
        });
        server.mock(|when, then| {
            when.method(GET).path("/bosai/forecast/data/forecast/010000.json");
            then.status(200).json_body(serde_json::json!([]));
        });

        let out = forecast("北海道", ForecastType::Short, Some(server.base_url())).await.unwrap();
        let v: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["areas"], serde_json::json!([]));

        let err = forecast("沖縄", ForecastType::Short, Some(server.base_url())).await.unwrap_err();
        assert!(err.contains("hint"));
    }

    #[tokio::test]
    #[serial]
    async fn run_commands_report_exit_codes() {
        clear_env();
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::SUCCESS);

        env::set_var("MODE", "nope");
        assert_eq!(run_commands(Commands::Config { validate: true }).await, ExitCode::FAILURE);
        clear_env();

        let health = run_commands(Commands::Health { url: "http://127.0.0.1:9".into() }).await;
        assert_eq!(health, ExitCode::FAILURE);
    }
}
