//! Error types for the three external-call stages and the run as a whole

use reqwest::StatusCode;
use thiserror::Error;

/// The Ollama server cannot serve the configured model
#[derive(Debug, Error)]
pub enum DependencyUnavailable {
    #[error("Ollama is unreachable, cannot verify model '{model}': {cause}")]
    Unreachable { model: String, cause: String },

    #[error("Ollama returned HTTP {status} while checking for model '{model}'")]
    Status { model: String, status: StatusCode },

    #[error("Ollama returned an unreadable model list while checking for model '{model}': {cause}")]
    InvalidModelList { model: String, cause: String },

    #[error("Model '{model}' not found in Ollama. Please run: ollama run {model}")]
    ModelMissing { model: String, available: Vec<String> },
}

/// The weather provider could not produce a usable forecast
#[derive(Debug, Error)]
pub enum WeatherFetchError {
    #[error("Weather API request failed: {cause}")]
    Transport { cause: String },

    #[error("Weather API rejected the request with HTTP {status}{}", provider_detail(.code, .message))]
    Rejected {
        status: StatusCode,
        code: Option<u32>,
        message: Option<String>,
    },

    #[error("Weather API did not return valid JSON. Response: {excerpt}")]
    NotJson { cause: String, excerpt: String },

    #[error("Weather API response missing forecast data: {body}")]
    MissingForecast { body: String },

    #[error("Weather API forecast is malformed: {cause}")]
    MalformedForecast { cause: String },
}

impl WeatherFetchError {
    /// True when the provider refused the API key
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Rejected { status, .. }
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN
        )
    }
}

fn provider_detail(code: &Option<u32>, message: &Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!(": {message} (code {code})"),
        (None, Some(message)) => format!(": {message}"),
        _ => String::new(),
    }
}

/// Report generation failed; sub-causes are only carried for display
#[derive(Debug, Error)]
#[error("Ollama LLM request failed for model '{model}': {cause}")]
pub struct GenerationError {
    pub model: String,
    pub cause: String,
}

/// Any terminal failure of a run
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Ollama health check failed: {0}")]
    DependencyUnavailable(#[from] DependencyUnavailable),

    #[error(transparent)]
    WeatherFetch(#[from] WeatherFetchError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Could not show location prompt: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("Could not read location: {0}")]
    Input(#[source] std::io::Error),
}

impl AppError {
    /// Stable tag for the failure kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::DependencyUnavailable(_) => "dependency_unavailable",
            Self::WeatherFetch(_) => "weather_fetch",
            Self::Generation(_) => "generation",
            Self::Prompt(_) => "prompt",
            Self::Input(_) => "input",
        }
    }
}
