//! HeartRails Express HTTP client.
//!
//! Provides async methods for listing lines and stations, with a semaphore
//! to keep concurrent requests to the free API bounded.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::departure::StationDirectory;
use crate::domain::Station;
use crate::lottery::{ProviderError, StationProvider};

use super::convert::convert_station;
use super::error::HeartRailsError;
use super::types::{LinesResponse, StationDto, StationsResponse};

/// Default endpoint for HeartRails Express.
const DEFAULT_BASE_URL: &str = "https://express.heartrails.com/api/json";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the HeartRails client.
#[derive(Debug, Clone)]
pub struct HeartRailsConfig {
    /// Endpoint URL (defaults to the public HeartRails Express API)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HeartRailsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }
}

impl HeartRailsConfig {
    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HeartRails Express API client.
#[derive(Debug, Clone)]
pub struct HeartRailsClient {
    http: reqwest::Client,
    base_url: String,
    semaphore: Arc<Semaphore>,
}

impl HeartRailsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: HeartRailsConfig) -> Result<Self, HeartRailsError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Lines serving a prefecture.
    ///
    /// An unknown prefecture, or one without railways, yields an empty list.
    pub async fn get_lines(&self, prefecture: &str) -> Result<Vec<String>, HeartRailsError> {
        let response: LinesResponse = self
            .call(&[("method", "getLines"), ("prefecture", prefecture)])
            .await?;

        match response.response.error {
            Some(message) if is_not_found(&message) => {
                debug!(prefecture, %message, "no lines");
                Ok(Vec::new())
            }
            Some(message) => Err(HeartRailsError::Reported(message)),
            None => Ok(response.response.line),
        }
    }

    /// All stations on a line, in line order.
    pub async fn get_stations_on_line(&self, line: &str) -> Result<Vec<Station>, HeartRailsError> {
        let response: StationsResponse = self
            .call(&[("method", "getStations"), ("line", line)])
            .await?;

        match response.response.error {
            Some(message) if is_not_found(&message) => Ok(Vec::new()),
            Some(message) => Err(HeartRailsError::Reported(message)),
            None => Ok(convert_stations(response.response.station)),
        }
    }

    /// Stations with exactly this name, one entry per line serving it.
    pub async fn find_stations(&self, name: &str) -> Result<Vec<Station>, HeartRailsError> {
        let response: StationsResponse = self
            .call(&[("method", "getStations"), ("name", name)])
            .await?;

        match response.response.error {
            Some(message) if is_not_found(&message) => Ok(Vec::new()),
            Some(message) => Err(HeartRailsError::Reported(message)),
            None => Ok(convert_stations(response.response.station)),
        }
    }

    async fn call<T: DeserializeOwned>(&self, query: &[(&str, &str)]) -> Result<T, HeartRailsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| HeartRailsError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let response = self.http.get(&self.base_url).query(query).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HeartRailsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| HeartRailsError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl StationProvider for HeartRailsClient {
    async fn list_lines(&self, region: &str) -> Result<Vec<String>, ProviderError> {
        Ok(self.get_lines(region).await?)
    }

    async fn list_stations(&self, line: &str) -> Result<Vec<Station>, ProviderError> {
        Ok(self.get_stations_on_line(line).await?)
    }
}

impl StationDirectory for HeartRailsClient {
    async fn find_stations(&self, name: &str) -> Result<Vec<Station>, ProviderError> {
        Ok(HeartRailsClient::find_stations(self, name).await?)
    }
}

/// Whether an in-body error message means "nothing matched".
fn is_not_found(message: &str) -> bool {
    ["見つかりません", "存在しません", "not found"]
        .iter()
        .any(|needle| message.contains(needle))
}

fn convert_stations(dtos: Vec<StationDto>) -> Vec<Station> {
    let total = dtos.len();
    let stations: Vec<Station> = dtos.into_iter().filter_map(convert_station).collect();

    if stations.len() < total {
        warn!(
            skipped = total - stations.len(),
            "skipped stations with invalid coordinates"
        );
    }

    stations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = HeartRailsConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn config_builders() {
        let config = HeartRailsConfig::default()
            .with_base_url("http://localhost:8080/api/json")
            .with_max_concurrent(2)
            .with_timeout(5);
        assert_eq!(config.base_url, "http://localhost:8080/api/json");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn not_found_messages() {
        assert!(is_not_found("該当する駅が見つかりません。"));
        assert!(is_not_found("指定された路線は存在しません。"));
        assert!(!is_not_found("都道府県名が不正です。"));
    }

    #[test]
    fn invalid_stations_are_skipped() {
        let dto = |name: &str, y: f64| StationDto {
            name: name.into(),
            line: "JR中央線".into(),
            prefecture: "東京都".into(),
            x: 139.7,
            y,
            postal: None,
            prev: None,
            next: None,
        };

        let stations = convert_stations(vec![dto("新宿", 35.69), dto("壊れた駅", 135.0)]);
        assert_eq!(stations.len(), 1);
        assert_eq!(stations[0].name, "新宿");
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_http_error() {
        let client = HeartRailsClient::new(
            HeartRailsConfig::default()
                .with_base_url("http://127.0.0.1:9/api/json")
                .with_timeout(2),
        )
        .unwrap();

        let err = client.get_lines("東京都").await.unwrap_err();
        assert!(matches!(err, HeartRailsError::Http(_)));
    }
}
