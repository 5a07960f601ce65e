//! Human-friendly output for weather readings and lookup failures.

use chrono::{DateTime, Utc};
use cityweather_core::{WeatherError, WeatherReading, country_flag};
use std::fmt::Write;

use crate::session::{Lookup, QueryState};

/// Visual theme picked from the primary condition label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Atmosphere,
    Default,
}

impl Theme {
    pub fn for_condition(label: Option<&str>) -> Self {
        match label.map(str::to_ascii_lowercase).as_deref() {
            Some("clear") => Theme::Clear,
            Some("clouds") => Theme::Clouds,
            Some("rain" | "drizzle") => Theme::Rain,
            Some("thunderstorm") => Theme::Thunderstorm,
            Some("snow") => Theme::Snow,
            Some(
                "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall" | "tornado",
            ) => Theme::Atmosphere,
            _ => Theme::Default,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Theme::Clear => "☀️",
            Theme::Clouds => "☁️",
            Theme::Rain => "🌧️",
            Theme::Thunderstorm => "⛈️",
            Theme::Snow => "❄️",
            Theme::Atmosphere => "🌫️",
            Theme::Default => "🌡️",
        }
    }
}

/// User-facing text for a failed lookup.
pub fn user_message(err: &WeatherError) -> &'static str {
    match err {
        WeatherError::EmptyCity => "Please enter a city name",
        WeatherError::InvalidCountryCode(_) => {
            "Please enter a valid country code (e.g., US, GB, CA)"
        }
        WeatherError::NotFound { .. } => "City not found. Please check the spelling and try again.",
        WeatherError::Auth | WeatherError::Configuration(_) => {
            "There's an issue with the weather service configuration."
        }
        WeatherError::Schema(_) => "Received unexpected data from the weather service.",
        WeatherError::Upstream { .. } | WeatherError::Transport(_) => {
            "An error occurred while fetching weather data. Please try again later."
        }
    }
}

pub fn render_state(state: &QueryState, requested_country: Option<&str>, now: DateTime<Utc>) -> String {
    match state {
        QueryState::Loading => "Fetching weather data...".to_string(),
        QueryState::Failed(err) if err.is_input_error() => user_message(err).to_string(),
        QueryState::Failed(err) => format!("Error: {}", user_message(err)),
        QueryState::Ready(reading) => render_reading(reading, requested_country, now),
    }
}

/// Render a finished lookup, warning only against a country that was submitted.
pub fn render_lookup(lookup: &Lookup, now: DateTime<Utc>) -> String {
    render_state(&lookup.state, lookup.requested_country(), now)
}

pub fn render_reading(
    reading: &WeatherReading,
    requested_country: Option<&str>,
    now: DateTime<Utc>,
) -> String {
    let condition = reading.primary_condition();
    let theme = Theme::for_condition(condition.map(|c| c.main.as_str()));
    let country = &reading.sys.country;

    let mut out = String::new();
    let _ = writeln!(out, "{} {} {} {}", theme.glyph(), reading.name, country_flag(country), country);

    if let Some(requested) = requested_country.filter(|cc| reading.country_mismatch(Some(*cc))) {
        let _ = writeln!(
            out,
            "⚠️  Note: Weather data is for {} {} instead of {}",
            reading.name,
            country_flag(country),
            country_flag(requested),
        );
    }

    let _ = writeln!(
        out,
        "Temperature: {}°C (feels like {}°C)",
        whole(reading.main.temp),
        whole(reading.main.feels_like),
    );
    if let Some(c) = condition {
        let _ = writeln!(out, "{}: {}", c.main, c.description);
    }
    let _ = writeln!(out, "Humidity: {}%  Pressure: {} hPa", reading.main.humidity, reading.main.pressure);
    let _ = writeln!(out, "Wind: {} m/s  Clouds: {}%", reading.wind.speed, reading.clouds.all);
    if let Some(rain) = reading.rain_last_hour() {
        let _ = writeln!(out, "Rain (last hour): {rain} mm");
    }
    if let Some(offset) = reading.utc_offset() {
        let _ = writeln!(out, "Local time: {}", now.with_timezone(&offset).format("%H:%M (UTC%:z)"));
    }

    out
}

/// Round to a whole number without printing "-0".
fn whole(value: f64) -> f64 {
    value.round() + 0.0
}
