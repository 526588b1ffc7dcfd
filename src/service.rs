use anyhow::{Context, Result};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;

use crate::action_log::ActionLog;
use crate::config::Config;
use crate::constants::{BODY_EXCERPT_CHARS, USER_AGENT};
use crate::error::{AppError, DependencyUnavailable, GenerationError, WeatherFetchError};
use crate::formatters::{render_prompt, truncate_chars};
use crate::models::{
    ApiErrorResponse, ForecastDay, GenerateRequest, GenerateResponse, TagsResponse,
    WeatherSummary,
};

/// Talks to WeatherAPI.com and Ollama on behalf of one run
#[derive(Debug, Clone)]
pub struct WeatherReporter {
    client: Arc<Client>,
    config: Config,
    log: ActionLog,
}

impl WeatherReporter {
    /// Creates a reporter logging to the configured action log
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        let log = ActionLog::new(config.log_path.clone());

        Ok(Self {
            client: Arc::new(client),
            config,
            log,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn action_log(&self) -> &ActionLog {
        &self.log
    }

    /// Verifies the Ollama server is up and has the configured model
    pub async fn check_model_health(&self) -> Result<(), DependencyUnavailable> {
        self.log.record("Checking Ollama health...");

        match self.list_models().await {
            Ok(available) => {
                let model = &self.config.ollama_model;
                if available.iter().any(|name| name.contains(model.as_str())) {
                    tracing::info!(model = %model, "Ollama model available");
                    self.log.record("Ollama health check passed.");
                    Ok(())
                } else {
                    self.log.record(format!(
                        "Model '{model}' not found in Ollama. Available: {available:?}"
                    ));
                    let err = DependencyUnavailable::ModelMissing {
                        model: model.clone(),
                        available,
                    };
                    self.log.record(format!("Ollama health check failed: {err}"));
                    Err(err)
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Ollama health check failed");
                self.log.record(format!("Ollama health check failed: {err}"));
                Err(err)
            }
        }
    }

    /// Returns the names of all installed models; unnamed entries become ""
    async fn list_models(&self) -> Result<Vec<String>, DependencyUnavailable> {
        let model = &self.config.ollama_model;

        let response = self
            .client
            .get(format!("{}/api/tags", self.config.ollama_url))
            .timeout(self.config.timeouts.health_check)
            .send()
            .await
            .map_err(|e| DependencyUnavailable::Unreachable {
                model: model.clone(),
                cause: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DependencyUnavailable::Status {
                model: model.clone(),
                status: response.status(),
            });
        }

        let tags = response
            .json::<TagsResponse>()
            .await
            .map_err(|e| DependencyUnavailable::InvalidModelList {
                model: model.clone(),
                cause: e.to_string(),
            })?;

        Ok(tags
            .models
            .into_iter()
            .map(|tag| tag.name.unwrap_or_default())
            .collect())
    }

    /// Builds the forecast request URL with key and location percent-encoded
    pub fn forecast_url(&self, location: &str) -> String {
        format!(
            "{}/forecast.json?key={}&q={}&days=1&aqi=yes",
            self.config.weather_api_base,
            urlencoding::encode(&self.config.weather_api_key),
            urlencoding::encode(location)
        )
    }

    /// Fetches today's forecast for `location`
    pub async fn fetch_weather(&self, location: &str) -> Result<WeatherSummary, WeatherFetchError> {
        self.log.record(format!("Fetching weather for {location}..."));
        tracing::info!(location, "Fetching weather");

        let result = self.request_forecast(location).await;
        match &result {
            Ok(_) => self
                .log
                .record(format!("Weather data fetched successfully for {location}.")),
            Err(err) => tracing::warn!(error = %err, "Weather fetch failed"),
        }
        result
    }

    async fn request_forecast(&self, location: &str) -> Result<WeatherSummary, WeatherFetchError> {
        let response = self
            .client
            .get(self.forecast_url(location))
            .timeout(self.config.timeouts.weather)
            .send()
            .await
            .map_err(|e| self.weather_transport_error(e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.weather_transport_error(e))?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ApiErrorResponse>(&body).ok();
            let err = WeatherFetchError::Rejected {
                status,
                code: detail.as_ref().and_then(|d| d.error.code),
                message: detail.map(|d| d.error.message),
            };
            self.log.record(err.to_string());
            return Err(err);
        }

        let data: Value = match serde_json::from_str(&body) {
            Ok(data) => data,
            Err(e) => {
                let excerpt = truncate_chars(&body, BODY_EXCERPT_CHARS).to_string();
                self.log
                    .record(format!("Weather API returned non-JSON response: {excerpt}"));
                return Err(WeatherFetchError::NotJson {
                    cause: e.to_string(),
                    excerpt,
                });
            }
        };

        let first_day = match data.pointer("/forecast/forecastday/0") {
            Some(day) => day.clone(),
            None => {
                let body = data.to_string();
                self.log
                    .record(format!("Weather API response missing forecast data: {body}"));
                return Err(WeatherFetchError::MissingForecast { body });
            }
        };

        let forecast: ForecastDay = serde_json::from_value(first_day).map_err(|e| {
            let err = WeatherFetchError::MalformedForecast {
                cause: e.to_string(),
            };
            self.log.record(err.to_string());
            err
        })?;

        Ok(WeatherSummary::from_forecast_day(location, forecast))
    }

    /// Transport errors lose their URL so the API key stays out of the log
    fn weather_transport_error(&self, e: reqwest::Error) -> WeatherFetchError {
        let err = WeatherFetchError::Transport {
            cause: e.without_url().to_string(),
        };
        self.log.record(err.to_string());
        err
    }

    /// Fetches the forecast for `location` and has the model summarise it
    pub async fn generate_report(&self, location: &str) -> Result<String, AppError> {
        let weather = self.fetch_weather(location).await?;
        let prompt = render_prompt(&weather);
        self.generate(&prompt).await.map_err(AppError::from)
    }

    /// Runs one non-streaming completion against the configured model
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.log.record("Sending prompt to Ollama for generation...");

        match self.request_generation(prompt).await {
            Ok(text) => {
                self.log.record("Ollama LLM generation successful.");
                Ok(text)
            }
            Err(cause) => {
                let err = GenerationError {
                    model: self.config.ollama_model.clone(),
                    cause,
                };
                tracing::warn!(error = %err, "Generation failed");
                self.log.record(format!("Ollama LLM request failed: {}", err.cause));
                Err(err)
            }
        }
    }

    async fn request_generation(&self, prompt: &str) -> Result<String, String> {
        let request = GenerateRequest {
            model: &self.config.ollama_model,
            prompt,
            stream: false,
        };

        let response: Response = self
            .client
            .post(format!("{}/api/generate", self.config.ollama_url))
            .timeout(self.config.timeouts.generation)
            .json(&request)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if !response.status().is_success() {
            return Err(format!("Request failed with status: {}", response.status()));
        }

        let generated = response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| format!("Malformed response: {e}"))?;
        Ok(generated.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Timeouts;
    use std::path::PathBuf;

    fn reporter(key: &str) -> WeatherReporter {
        let config = Config {
            weather_api_key: key.into(),
            weather_api_base: "http://api.weatherapi.com/v1".into(),
            ollama_url: "http://localhost:11434".into(),
            ollama_model: "mistral".into(),
            default_location: "Marion, IN".into(),
            log_path: PathBuf::from("unused.log"),
            timeouts: Timeouts::default(),
        };
        WeatherReporter::new(config).unwrap()
    }

    #[test]
    fn forecast_url_encodes_location() {
        let url = reporter("abc").forecast_url("Marion, IN");
        assert_eq!(
            url,
            "http://api.weatherapi.com/v1/forecast.json?key=abc&q=Marion%2C%20IN&days=1&aqi=yes"
        );
    }

    #[test]
    fn forecast_url_keeps_query_structure_for_punctuation() {
        let url = reporter("k&y").forecast_url("Saint-Denis & Co, Réunion?");
        let query = url.split_once('?').unwrap().1;

        assert!(!query.contains(' '));
        let params: Vec<&str> = query.split('&').collect();
        assert_eq!(params.len(), 4, "unexpected params: {params:?}");
        assert_eq!(params[0], "key=k%26y");
        assert_eq!(params[1], "q=Saint-Denis%20%26%20Co%2C%20R%C3%A9union%3F");
        assert_eq!(&params[2..], ["days=1", "aqi=yes"]);
    }
}
