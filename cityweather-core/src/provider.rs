use crate::{
    Config, WeatherError, WeatherReading, WeatherRequest,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherReading, WeatherError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails with [`WeatherError::Configuration`] when no API key is set.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, WeatherError> {
    let api_key = config.api_key()?;

    let provider = OpenWeatherProvider::new(api_key.to_owned(), config.base_url(), config.timeout())?;

    Ok(Box::new(provider))
}

/// Validate the input, then build the configured provider.
///
/// Input errors are reported before the configuration is consulted, and
/// neither reaches the network.
pub fn prepare_lookup(
    config: &Config,
    city: &str,
    country_code: Option<&str>,
) -> Result<(WeatherRequest, Box<dyn WeatherProvider>), WeatherError> {
    let request = WeatherRequest::new(city, country_code)?;
    let provider = provider_from_config(config)?;
    Ok((request, provider))
}

/// Validate the input, then look up the weather with the configured provider.
pub async fn get_weather(
    config: &Config,
    city: &str,
    country_code: Option<&str>,
) -> Result<WeatherReading, WeatherError> {
    let (request, provider) = prepare_lookup(config, city, country_code)?;
    provider.get_weather(&request).await
}
