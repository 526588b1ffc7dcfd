//! Runtime configuration, read once from the environment at startup.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Result};

use crate::constants::{
    ACTION_LOG_FILE, DEFAULT_LOCATION, GENERATION_TIMEOUT, HEALTH_CHECK_TIMEOUT, OLLAMA_API_BASE,
    OLLAMA_MODEL, WEATHER_API_BASE, WEATHER_TIMEOUT,
};

pub const ENV_WEATHER_API_KEY: &str = "WEATHERAPI_KEY";
pub const ENV_WEATHER_API_BASE: &str = "WEATHERAPI_BASE_URL";
pub const ENV_OLLAMA_URL: &str = "OLLAMA_URL";
pub const ENV_OLLAMA_MODEL: &str = "OLLAMA_MODEL";
pub const ENV_DEFAULT_LOCATION: &str = "WEATHER_DEFAULT_LOCATION";
pub const ENV_LOG_PATH: &str = "WEATHER_REPORT_LOG";

/// Per-request time bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub health_check: Duration,
    pub weather: Duration,
    pub generation: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            health_check: HEALTH_CHECK_TIMEOUT,
            weather: WEATHER_TIMEOUT,
            generation: GENERATION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Authenticates forecast requests
    pub weather_api_key: String,
    pub weather_api_base: String,
    /// Network location of the local generation service
    pub ollama_url: String,
    /// Installed model that must serve requests
    pub ollama_model: String,
    /// Used when the user supplies no input
    pub default_location: String,
    pub log_path: PathBuf,
    pub timeouts: Timeouts,
}

impl Config {
    /// Loads configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset. Only the weather API key is mandatory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let Some(weather_api_key) = get(ENV_WEATHER_API_KEY) else {
            bail!("{ENV_WEATHER_API_KEY} is not set; get a key at https://www.weatherapi.com");
        };

        Ok(Self {
            weather_api_key,
            weather_api_base: base_url(get(ENV_WEATHER_API_BASE), WEATHER_API_BASE),
            ollama_url: base_url(get(ENV_OLLAMA_URL), OLLAMA_API_BASE),
            ollama_model: get(ENV_OLLAMA_MODEL).unwrap_or_else(|| OLLAMA_MODEL.to_string()),
            default_location: get(ENV_DEFAULT_LOCATION)
                .unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
            log_path: get(ENV_LOG_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(ACTION_LOG_FILE)),
            timeouts: Timeouts::default(),
        })
    }
}

fn base_url(value: Option<String>, default: &str) -> String {
    value
        .as_deref()
        .unwrap_or(default)
        .trim_end_matches('/')
        .to_string()
}
