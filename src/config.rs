//! Provider endpoints, credentials, and model location.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;

pub const API_KEY_VAR: &str = "GOOGLE_MAPS_API_KEY";
pub const MODEL_PATH_VAR: &str = "ROUTE_ETA_MODEL_PATH";
pub const STEP_PROXY_VAR: &str = "ROUTE_ETA_STEP_PROXY";
pub const GEOCODE_URL_VAR: &str = "ROUTE_ETA_GEOCODE_URL";
pub const DIRECTIONS_URL_VAR: &str = "ROUTE_ETA_DIRECTIONS_URL";

pub const DEFAULT_GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";
pub const DEFAULT_DIRECTIONS_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";
pub const DEFAULT_MODEL_PATH: &str = "model.json";

/// Stand-in for the unknown step count before a route exists.
pub const DEFAULT_STEP_PROXY: f64 = 10.0;

pub const GEOCODE_TIMEOUT_SECS: u64 = 10;
pub const DIRECTIONS_TIMEOUT_SECS: u64 = 15;

/// Everything the provider calls need.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: String,
    pub geocode_url: String,
    pub directions_url: String,
    pub geocode_timeout: Duration,
    pub directions_timeout: Duration,
}

impl ProviderConfig {
    /// Google endpoints with the fixed provider timeouts.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            directions_url: DEFAULT_DIRECTIONS_URL.to_string(),
            geocode_timeout: Duration::from_secs(GEOCODE_TIMEOUT_SECS),
            directions_timeout: Duration::from_secs(DIRECTIONS_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub provider: ProviderConfig,
    pub model_path: PathBuf,
    pub step_proxy: f64,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// The API key is required; there is no built-in fallback key.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Configuration(format!("{} is not set", API_KEY_VAR)))?;

        let mut provider = ProviderConfig::new(api_key);
        if let Some(url) = lookup(GEOCODE_URL_VAR) {
            provider.geocode_url = url;
        }
        if let Some(url) = lookup(DIRECTIONS_URL_VAR) {
            provider.directions_url = url;
        }

        let step_proxy = match lookup(STEP_PROXY_VAR) {
            Some(raw) => raw
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0)
                .ok_or_else(|| {
                    Error::Configuration(format!("{} must be a non-negative number, got {:?}", STEP_PROXY_VAR, raw))
                })?,
            None => DEFAULT_STEP_PROXY,
        };

        let model_path = lookup(MODEL_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH));

        Ok(Self {
            provider,
            model_path,
            step_proxy,
        })
    }
}
