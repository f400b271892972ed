use std::sync::{Arc, RwLock};
use std::time::Instant;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::forecast::{AreaCatalog, ForecastDocument, ForecastError};
use crate::infra::config::JmaConfig;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::logging::log_metric;
use crate::infra::runtime::limits::{make_http_client, make_http_client_with};

pub const AREA_CATALOG_PATH: &str = "/bosai/common/const/area.json";
pub const FORECAST_PATH_PREFIX: &str = "/bosai/forecast/data/forecast";

type CatalogSlot = Arc<RwLock<Option<Arc<AreaCatalog>>>>;

/// Client for the JMA open data endpoints. One GET per call, no retries.
#[derive(Clone)]
pub struct JmaClient {
    base: String,
    http: Client,
    catalog_cache: Option<CatalogSlot>,
}

impl JmaClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            http: make_http_client(),
            catalog_cache: None,
        }
    }

    pub fn from_config(cfg: &JmaConfig) -> Self {
        let client = Self {
            base: cfg.base_url.clone(),
            http: make_http_client_with(cfg),
            catalog_cache: None,
        };
        if cfg.cache_area_catalog {
            client.with_catalog_cache()
        } else {
            client
        }
    }

    /// Keep the area catalog in memory after the first fetch. Clones share it.
    pub fn with_catalog_cache(mut self) -> Self {
        self.catalog_cache = Some(Arc::default());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    pub fn area_catalog_url(&self) -> String {
        format!("{}{}", self.base.trim_end_matches('/'), AREA_CATALOG_PATH)
    }

    pub fn forecast_url(&self, area_code: &str) -> String {
        format!(
            "{}{}/{}.json",
            self.base.trim_end_matches('/'),
            FORECAST_PATH_PREFIX,
            area_code
        )
    }

    /// Drop a cached catalog so the next lookup refetches. No-op without a cache.
    pub fn invalidate_area_catalog(&self) {
        if let Some(slot) = &self.catalog_cache {
            if let Ok(mut guard) = slot.write() {
                *guard = None;
            }
        }
    }

    pub async fn area_catalog(&self) -> Result<Arc<AreaCatalog>, ForecastError> {
        if let Some(cached) = self.cached_catalog() {
            tracing::debug!("area catalog served from cache");
            return Ok(cached);
        }
        let catalog: Arc<AreaCatalog> = Arc::new(self.get_json(self.area_catalog_url()).await?);
        if let Some(slot) = &self.catalog_cache {
            if let Ok(mut guard) = slot.write() {
                *guard = Some(catalog.clone());
            }
        }
        Ok(catalog)
    }

    /// Resolve a free-text prefecture name to an office code.
    pub async fn resolve_area_code(&self, prefecture_name: &str) -> Result<String, ForecastError> {
        let catalog = self.area_catalog().await?;
        let code = catalog.resolve(prefecture_name)?.to_string();
        tracing::debug!(prefecture = %prefecture_name, code = %code, "resolved area code");
        Ok(code)
    }

    pub async fn fetch_forecast(&self, area_code: &str) -> Result<ForecastDocument, ForecastError> {
        self.get_json(self.forecast_url(area_code)).await
    }

    fn cached_catalog(&self) -> Option<Arc<AreaCatalog>> {
        let slot = self.catalog_cache.as_ref()?;
        slot.read().ok()?.clone()
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ForecastError> {
        tracing::debug!(endpoint = %url, "jma request");
        let start = Instant::now();
        let res = self.send_get(&url).await;
        match &res {
            Ok(_) => {
                let elapsed_ms = start.elapsed().as_millis() as f64;
                log_metric("jma.fetch", "remote_latency_ms", elapsed_ms);
            }
            Err(e) => {
                tracing::warn!(endpoint = %url, error = %e, "jma request failed");
                log_metric("jma.fetch", "remote_error_total", 1.0);
            }
        }
        res
    }

    async fn send_get<T: DeserializeOwned>(&self, url: &str) -> Result<T, ForecastError> {
        let (builder, _rid) = add_standard_headers(self.http.get(url), None);
        let resp = builder.send().await?;
        if !resp.status().is_success() {
            return Err(ForecastError::Transport(format!(
                "upstream status {} for {}",
                resp.status(),
                url
            )));
        }
        Ok(resp.json::<T>().await?)
    }
}
