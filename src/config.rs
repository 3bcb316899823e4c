use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub weather: WeatherSettings,
    #[serde(default)]
    pub ranking: RankingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    pub places_path: String,
    pub menus_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherBackend {
    OpenWeather,
    Static,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSettings {
    #[serde(default = "default_weather_backend")]
    pub provider: WeatherBackend,
    #[serde(default = "default_weather_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_weather_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_weather_cache_capacity")]
    pub cache_capacity: u64,
    #[serde(default = "default_static_label")]
    pub static_label: String,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            provider: default_weather_backend(),
            endpoint: default_weather_endpoint(),
            api_key: String::new(),
            timeout_secs: default_weather_timeout(),
            cache_ttl_secs: default_weather_cache_ttl(),
            cache_capacity: default_weather_cache_capacity(),
            static_label: default_static_label(),
        }
    }
}

fn default_weather_backend() -> WeatherBackend { WeatherBackend::Static }
fn default_weather_endpoint() -> String { "https://api.openweathermap.org/data/2.5/weather".to_string() }
fn default_weather_timeout() -> u64 { 5 }
fn default_weather_cache_ttl() -> u64 { 600 }
fn default_weather_cache_capacity() -> u64 { 10_000 }
fn default_static_label() -> String { "clouds".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RankingSettings {
    #[serde(default = "default_strict_gender")]
    pub strict_gender: bool,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            strict_gender: default_strict_gender(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_strict_gender() -> bool { true }

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_proximity_near")]
    pub proximity_near: i64,
    #[serde(default = "default_proximity_mid")]
    pub proximity_mid: i64,
    #[serde(default = "default_proximity_far")]
    pub proximity_far: i64,
    #[serde(default = "default_gender_both")]
    pub gender_both: i64,
    #[serde(default = "default_gender_match")]
    pub gender_match: i64,
    #[serde(default = "default_rating_top")]
    pub rating_top: i64,
    #[serde(default = "default_rating_high")]
    pub rating_high: i64,
    #[serde(default = "default_rating_good")]
    pub rating_good: i64,
    #[serde(default = "default_rating_fair")]
    pub rating_fair: i64,
    #[serde(default = "default_rating_poor_penalty")]
    pub rating_poor_penalty: i64,
    #[serde(default = "default_recommended_window")]
    pub recommended_window: i64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            proximity_near: default_proximity_near(),
            proximity_mid: default_proximity_mid(),
            proximity_far: default_proximity_far(),
            gender_both: default_gender_both(),
            gender_match: default_gender_match(),
            rating_top: default_rating_top(),
            rating_high: default_rating_high(),
            rating_good: default_rating_good(),
            rating_fair: default_rating_fair(),
            rating_poor_penalty: default_rating_poor_penalty(),
            recommended_window: default_recommended_window(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            proximity_near: config.proximity_near,
            proximity_mid: config.proximity_mid,
            proximity_far: config.proximity_far,
            gender_both: config.gender_both,
            gender_match: config.gender_match,
            rating_top: config.rating_top,
            rating_high: config.rating_high,
            rating_good: config.rating_good,
            rating_fair: config.rating_fair,
            rating_poor_penalty: config.rating_poor_penalty,
            recommended_window: config.recommended_window,
        }
    }
}

fn default_proximity_near() -> i64 { 300 }
fn default_proximity_mid() -> i64 { 200 }
fn default_proximity_far() -> i64 { 150 }
fn default_gender_both() -> i64 { 80 }
fn default_gender_match() -> i64 { 150 }
fn default_rating_top() -> i64 { 200 }
fn default_rating_high() -> i64 { 150 }
fn default_rating_good() -> i64 { 100 }
fn default_rating_fair() -> i64 { 50 }
fn default_rating_poor_penalty() -> i64 { -200 }
fn default_recommended_window() -> i64 { 100 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local override file (config/local.toml)
    /// 4. Environment variables (prefixed with JEJU__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., JEJU__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_secret_overrides(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_secret_overrides(settings)?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("JEJU")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// The weather API key may also come from the provider's conventional variable
fn apply_secret_overrides(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("OPENWEATHER_API_KEY") {
        Ok(api_key) if !api_key.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("weather.api_key", api_key)?
            .build(),
        _ => Ok(settings),
    }
}
