use crate::models::WeatherSummary;

/// Renders the generation prompt for a forecast
pub fn render_prompt(weather: &WeatherSummary) -> String {
    format!(
        "Today's weather report for {}:\n\
         - Condition: {}\n\
         - High: {}\u{00b0}F, Low: {}\u{00b0}F\n\
         - Sunrise: {}, Sunset: {}\n\
         - Average Humidity: {}%\n\
         - Chance of Rain: {}%\n\
         \n\
         Create a short, friendly verbal weather update from this data:",
        weather.location,
        weather.condition,
        weather.max_temp_f,
        weather.min_temp_f,
        weather.sunrise,
        weather.sunset,
        weather.humidity,
        weather.chance_of_rain
    )
}

/// Returns at most `max_chars` characters of `text`, cut on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
