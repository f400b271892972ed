use serde::Deserialize;

pub const DEFAULT_JMA_BASE_URL: &str = "https://www.jma.go.jp";
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub struct Config {
    pub mode: String, // "server" or "stdio"
    pub port: u16,
    pub deprecate_rest: bool,
}

impl Config {
    pub fn from_env() -> Self {
        let mode = std::env::var("MODE").unwrap_or_else(|_| "server".into());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let deprecate_rest = std::env::var("DEPRECATE_REST")
            .map(|v| !v.is_empty())
            .unwrap_or(false);

        Self {
            mode,
            port,
            deprecate_rest,
        }
    }
}

/// Settings for the JMA open data client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct JmaConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
    /// Keep the parsed area catalog between calls. Off: refetch every time.
    pub cache_area_catalog: bool,
}

impl Default for JmaConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_JMA_BASE_URL.to_string(),
            timeout_ms: 10_000,
            connect_timeout_ms: 3_000,
            cache_area_catalog: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub jma: JmaConfig,
}

impl AppConfig {
    /// TOML file (`GATEWAY_CONFIG`, default `config.toml`) overlaid by env vars.
    pub fn from_env_and_toml() -> Self {
        let path = std::env::var("GATEWAY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        let mut cfg = match std::fs::read_to_string(&path) {
            Ok(raw) => Self::from_toml_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path, error = %e, "ignoring unparsable config file");
                Self::default()
            }),
            Err(_) => Self::default(),
        };
        cfg.apply_env();
        cfg
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    fn apply_env(&mut self) {
        if let Ok(base) = std::env::var("JMA_BASE_URL") {
            if !base.trim().is_empty() {
                self.jma.base_url = base;
            }
        }
        if let Some(ms) = env_u64("JMA_TIMEOUT_MS") {
            self.jma.timeout_ms = ms;
        }
        if let Some(ms) = env_u64("JMA_CONNECT_TIMEOUT_MS") {
            self.jma.connect_timeout_ms = ms;
        }
        if let Ok(v) = std::env::var("JMA_CACHE_AREAS") {
            self.jma.cache_area_catalog = matches!(v.trim(), "1" | "true" | "yes" | "on");
        }
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.trim().parse::<u64>().ok())
}
