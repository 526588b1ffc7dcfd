use serde::{Deserialize, Serialize};
use serde_json::Number;

// ============================================================================
// Report Model
// ============================================================================

/// First-day forecast for one location, as handed to the language model.
///
/// Numbers keep the provider's JSON spelling, so `75.0` stays `75.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSummary {
    pub location: String,
    pub condition: String,
    pub max_temp_f: Number,
    pub min_temp_f: Number,
    pub sunrise: String,
    pub sunset: String,
    pub humidity: Number,
    pub chance_of_rain: Number,
}

impl WeatherSummary {
    pub fn from_forecast_day(location: &str, forecast: ForecastDay) -> Self {
        Self {
            location: location.to_string(),
            condition: forecast.day.condition.text,
            max_temp_f: forecast.day.max_temp_f,
            min_temp_f: forecast.day.min_temp_f,
            sunrise: forecast.astro.sunrise,
            sunset: forecast.astro.sunset,
            humidity: forecast.day.avg_humidity,
            chance_of_rain: forecast.day.daily_chance_of_rain,
        }
    }
}

// ============================================================================
// WeatherAPI.com Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForecastDay {
    pub day: Day,
    pub astro: Astro,
}

#[derive(Debug, Deserialize)]
pub struct Day {
    pub condition: Condition,
    #[serde(rename = "maxtemp_f")]
    pub max_temp_f: Number,
    #[serde(rename = "mintemp_f")]
    pub min_temp_f: Number,
    #[serde(rename = "avghumidity")]
    pub avg_humidity: Number,
    pub daily_chance_of_rain: Number,
}

#[derive(Debug, Deserialize)]
pub struct Condition {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct Astro {
    pub sunrise: String,
    pub sunset: String,
}

/// Body WeatherAPI.com sends with 4xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: Option<u32>,
    pub message: String,
}

// ============================================================================
// Ollama API Models
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
pub struct ModelTag {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forecast_day_maps_into_summary() {
        let day: ForecastDay = serde_json::from_value(serde_json::json!({
            "date": "2024-06-01",
            "day": {
                "maxtemp_f": 75,
                "mintemp_f": 55.4,
                "avghumidity": 60,
                "daily_chance_of_rain": 10,
                "condition": { "text": "Sunny", "code": 1000 }
            },
            "astro": { "sunrise": "06:30 AM", "sunset": "08:15 PM", "moon_phase": "Full Moon" }
        }))
        .unwrap();

        let summary = WeatherSummary::from_forecast_day("Marion, IN", day);
        assert_eq!(summary.location, "Marion, IN");
        assert_eq!(summary.condition, "Sunny");
        assert_eq!(summary.max_temp_f, Number::from(75));
        assert_eq!(summary.min_temp_f.to_string(), "55.4");
        assert_eq!(summary.sunrise, "06:30 AM");
        assert_eq!(summary.sunset, "08:15 PM");
        assert_eq!(summary.humidity, Number::from(60));
        assert_eq!(summary.chance_of_rain, Number::from(10));
    }

    #[test]
    fn whole_float_values_keep_their_decimal() {
        let day: ForecastDay = serde_json::from_value(serde_json::json!({
            "day": {
                "maxtemp_f": 75.0,
                "mintemp_f": 55.0,
                "avghumidity": 60,
                "daily_chance_of_rain": 0,
                "condition": { "text": "Clear" }
            },
            "astro": { "sunrise": "06:30 AM", "sunset": "08:15 PM" }
        }))
        .unwrap();

        let summary = WeatherSummary::from_forecast_day("Marion, IN", day);
        assert_eq!(summary.max_temp_f.to_string(), "75.0");
        assert_eq!(summary.min_temp_f.to_string(), "55.0");
        assert_eq!(summary.humidity.to_string(), "60");
    }

    #[test]
    fn tags_tolerate_missing_names() {
        let tags: TagsResponse = serde_json::from_value(serde_json::json!({
            "models": [{ "name": "mistral:latest" }, { "name": null }, { "size": 1 }]
        }))
        .unwrap();
        let names: Vec<Option<&str>> = tags.models.iter().map(|m| m.name.as_deref()).collect();
        assert_eq!(names, vec![Some("mistral:latest"), None, None]);
    }

    #[test]
    fn generate_request_disables_streaming() {
        let body = serde_json::to_value(GenerateRequest {
            model: "mistral",
            prompt: "hi",
            stream: false,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "model": "mistral", "prompt": "hi", "stream": false })
        );
    }
}
