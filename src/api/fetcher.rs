use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

pub const DEFAULT_BASE_URL: &str = "https://wanted-backend-week4.vercel.app/";
pub const DEFAULT_DATASET_PATH: &str = "/db.json";
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Where and how to fetch the dataset document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub base_url: String,
    pub path: String,
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            path: DEFAULT_DATASET_PATH.to_owned(),
            timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn url(&self) -> String {
        join_url(&self.base_url, &self.path)
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.base_url.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "fetch base url must not be empty".to_owned(),
            ));
        }
        if self.timeout.is_zero() {
            return Err(ChartError::InvalidData(
                "fetch timeout must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Joins with exactly one `/` between base and path.
#[must_use]
pub fn join_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_owned();
    }
    format!("{base}/{path}")
}

/// Payload returned when a fetch fails.
#[must_use]
pub fn empty_fallback() -> Value {
    Value::Array(Vec::new())
}

/// Asynchronous provider of the raw dataset document.
///
/// Implementations never fail: errors are logged and replaced with
/// [`empty_fallback`].
pub trait DatasetSource {
    fn fetch_dataset(&self) -> impl Future<Output = Value> + Send;
}

/// Fetches the dataset with one HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    client: Client,
    url: String,
}

impl HttpDatasetSource {
    pub fn new(config: FetchConfig) -> ChartResult<Self> {
        let config = config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChartError::Fetch(format!("http client error: {e}")))?;
        Ok(Self {
            client,
            url: config.url(),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Same request as [`DatasetSource::fetch_dataset`] but surfaces failures.
    pub async fn fetch_json(&self) -> ChartResult<Value> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChartError::Fetch(format!("request error: {e}")))?;
        let payload = response
            .json::<Value>()
            .await
            .map_err(|e| ChartError::Fetch(format!("decode error: {e}")))?;
        debug!(url = %self.url, "fetched dataset");
        Ok(payload)
    }
}

impl DatasetSource for HttpDatasetSource {
    async fn fetch_dataset(&self) -> Value {
        match self.fetch_json().await {
            Ok(payload) => payload,
            Err(err) => {
                warn!(url = %self.url, error = %err, "dataset fetch failed; using empty payload");
                empty_fallback()
            }
        }
    }
}

/// Serves a fixed in-memory document.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticDatasetSource {
    payload: Value,
}

impl StaticDatasetSource {
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self { payload }
    }
}

impl DatasetSource for StaticDatasetSource {
    async fn fetch_dataset(&self) -> Value {
        self.payload.clone()
    }
}

/// Reads the document from a local JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn read_json(&self) -> ChartResult<Value> {
        let text = std::fs::read_to_string(&self.path).map_err(|e| {
            ChartError::Fetch(format!("failed to read `{}`: {e}", self.path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            ChartError::Fetch(format!("failed to parse `{}`: {e}", self.path.display()))
        })
    }
}

impl DatasetSource for FileDatasetSource {
    async fn fetch_dataset(&self) -> Value {
        match self.read_json() {
            Ok(payload) => payload,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "dataset read failed; using empty payload");
                empty_fallback()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_collapses_duplicate_slashes() {
        assert_eq!(
            join_url(DEFAULT_BASE_URL, DEFAULT_DATASET_PATH),
            "https://wanted-backend-week4.vercel.app/db.json"
        );
        assert_eq!(join_url("http://host", "data.json"), "http://host/data.json");
        assert_eq!(join_url("http://host/", ""), "http://host");
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = FetchConfig {
            timeout: Duration::ZERO,
            ..FetchConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
