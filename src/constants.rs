use std::time::Duration;

/// User agent string for HTTP requests
pub const USER_AGENT: &str = "weather-report/0.1.0";

/// WeatherAPI.com base URL
pub const WEATHER_API_BASE: &str = "http://api.weatherapi.com/v1";

/// Local Ollama server base URL
pub const OLLAMA_API_BASE: &str = "http://localhost:11434";

/// Model that must be installed on the Ollama server
pub const OLLAMA_MODEL: &str = "mistral";

/// Location used when the user enters nothing
pub const DEFAULT_LOCATION: &str = "Marion, IN";

/// Action log file, relative to the working directory
pub const ACTION_LOG_FILE: &str = "changelog.txt";

pub const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);
pub const WEATHER_TIMEOUT: Duration = Duration::from_secs(10);
pub const GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Longest excerpt of a non-JSON provider body kept in logs and errors
pub const BODY_EXCERPT_CHARS: usize = 200;
