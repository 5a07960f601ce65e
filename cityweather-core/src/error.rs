use thiserror::Error;

/// Every failure a weather lookup can end in.
///
/// The first two variants are raised before any network call; the rest come
/// from configuration, the upstream HTTP exchange or payload validation.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City name is required")]
    EmptyCity,

    #[error("Invalid country code '{0}'. Expected a 2-letter ISO 3166-1 code (e.g., US, GB, CA)")]
    InvalidCountryCode(String),

    #[error("{0}")]
    Configuration(String),

    #[error("{}", not_found_message(.city, .country_code.as_deref()))]
    NotFound {
        city: String,
        country_code: Option<String>,
    },

    #[error("Invalid API key configuration")]
    Auth,

    #[error("Failed to fetch weather data (HTTP {status}). Please try again later.")]
    Upstream { status: u16 },

    #[error("Invalid weather data received from API: {0}")]
    Schema(String),

    #[error("An unexpected error occurred while contacting the weather service")]
    Transport(#[source] reqwest::Error),
}

impl WeatherError {
    /// Stable machine code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            WeatherError::EmptyCity => "EMPTY_CITY",
            WeatherError::InvalidCountryCode(_) => "INVALID_COUNTRY_CODE",
            WeatherError::Configuration(_) => "CONFIGURATION",
            WeatherError::NotFound { .. } => "NOT_FOUND",
            WeatherError::Auth => "UNAUTHORIZED",
            WeatherError::Upstream { .. } => "UPSTREAM",
            WeatherError::Schema(_) => "SCHEMA",
            WeatherError::Transport(_) => "TRANSPORT",
        }
    }

    /// True for errors raised while validating user input, before any request.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            WeatherError::EmptyCity | WeatherError::InvalidCountryCode(_)
        )
    }
}

fn not_found_message(city: &str, country_code: Option<&str>) -> String {
    match country_code {
        Some(cc) => format!(
            "City \"{city}\" not found in country {cc}. Please check the spelling and try again."
        ),
        None => format!(
            "City \"{city}\" not found. Please check the spelling or try adding a country code (e.g., \"London,GB\")."
        ),
    }
}
