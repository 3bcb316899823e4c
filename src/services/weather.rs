use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when looking up the current weather
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Weather API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Source of the current weather at a location
///
/// Implementations return a single lower-case label such as "rain" or
/// "clouds", matching the weather tags in the catalog.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError>;
}

/// Client for the OpenWeather "current weather" endpoint
///
/// Reads `weather[0].main` from the response.
pub struct OpenWeatherClient {
    endpoint: String,
    api_key: String,
    client: Client,
}

impl OpenWeatherClient {
    /// Create a new client
    pub fn new(endpoint: String, api_key: String, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            client,
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError> {
        let url = self.endpoint.trim_end_matches('/');

        tracing::debug!("Fetching weather for ({}, {})", latitude, longitude);

        let response = self
            .client
            .get(url)
            .query(&[
                ("lat", latitude.to_string()),
                ("lon", longitude.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(WeatherError::ApiError(format!(
                "Failed to fetch weather: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        json.get("weather")
            .and_then(|w| w.as_array())
            .and_then(|conditions| conditions.first())
            .and_then(|condition| condition.get("main"))
            .and_then(|main| main.as_str())
            .map(|label| label.trim().to_lowercase())
            .filter(|label| !label.is_empty())
            .ok_or_else(|| WeatherError::InvalidResponse("Missing weather[0].main".into()))
    }
}

/// Provider that always reports the same label
#[derive(Debug, Clone)]
pub struct StaticWeather {
    label: String,
}

impl StaticWeather {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into().trim().to_lowercase(),
        }
    }
}

impl Default for StaticWeather {
    fn default() -> Self {
        Self::new("clouds")
    }
}

#[async_trait]
impl WeatherProvider for StaticWeather {
    async fn current_weather(&self, _latitude: f64, _longitude: f64) -> Result<String, WeatherError> {
        Ok(self.label.clone())
    }
}

/// Short-lived cache in front of another provider
///
/// Keys are coordinates rounded to 0.01° (about a kilometre), so nearby
/// requests share a lookup. Failures are never cached.
pub struct CachedWeather {
    inner: Arc<dyn WeatherProvider>,
    cache: moka::future::Cache<String, String>,
}

impl CachedWeather {
    pub fn new(inner: Arc<dyn WeatherProvider>, capacity: u64, ttl: Duration) -> Self {
        let cache = moka::future::Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .build();

        Self { inner, cache }
    }

    fn key(latitude: f64, longitude: f64) -> String {
        format!("weather:{:.2}:{:.2}", latitude, longitude)
    }
}

#[async_trait]
impl WeatherProvider for CachedWeather {
    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<String, WeatherError> {
        let key = Self::key(latitude, longitude);

        if let Some(label) = self.cache.get(&key).await {
            tracing::trace!("Weather cache hit: {}", key);
            return Ok(label);
        }

        let label = self.inner.current_weather(latitude, longitude).await?;
        self.cache.insert(key, label.clone()).await;
        Ok(label)
    }
}
