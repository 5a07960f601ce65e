use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::{
    error::WeatherError,
    model::{WeatherReading, validate_reading},
    query::WeatherRequest,
};

use super::WeatherProvider;

const CURRENT_WEATHER_PATH: &str = "/data/2.5/weather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(WeatherError::Transport)?;

        Ok(Self {
            api_key,
            endpoint: format!("{}{CURRENT_WEATHER_PATH}", base_url.trim_end_matches('/')),
            http,
        })
    }

    async fn fetch_current(&self, request: &WeatherRequest) -> Result<WeatherReading, WeatherError> {
        let query = request.query();
        info!(%query, "Fetching current weather from OpenWeather");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("q", query.as_str()),
                ("units", "metric"),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to send request to OpenWeather");
                WeatherError::Transport(e)
            })?;

        let status = res.status();
        if !status.is_success() {
            let err = map_status(status, request);
            warn!(%status, code = err.code(), "OpenWeather request failed");
            return Err(err);
        }

        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read OpenWeather response body");
            WeatherError::Transport(e)
        })?;

        let reading = validate_reading(&body).inspect_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "OpenWeather returned unexpected data");
        })?;

        debug!(city = %reading.name, country = %reading.sys.country, "Weather data fetched successfully");
        Ok(reading)
    }
}

/// Map a non-success status to the error taxonomy.
fn map_status(status: StatusCode, request: &WeatherRequest) -> WeatherError {
    match status {
        StatusCode::NOT_FOUND => WeatherError::NotFound {
            city: request.city().to_string(),
            country_code: request.country_code().map(str::to_string),
        },
        StatusCode::UNAUTHORIZED => WeatherError::Auth,
        other => WeatherError::Upstream { status: other.as_u16() },
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, request: &WeatherRequest) -> Result<WeatherReading, WeatherError> {
        self.fetch_current(request).await
    }
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_keeps_the_requested_country() {
        let req = WeatherRequest::new("Springfield", Some("us")).unwrap();
        let err = map_status(StatusCode::NOT_FOUND, &req);

        match err {
            WeatherError::NotFound { city, country_code } => {
                assert_eq!(city, "Springfield");
                assert_eq!(country_code.as_deref(), Some("US"));
            }
            other => panic!("expected not found, got {other:?}"),
        }
    }

    #[test]
    fn unauthorized_maps_to_auth() {
        let req = WeatherRequest::new("London", None).unwrap();
        assert!(matches!(map_status(StatusCode::UNAUTHORIZED, &req), WeatherError::Auth));
    }

    #[test]
    fn other_statuses_map_to_upstream() {
        let req = WeatherRequest::new("London", None).unwrap();
        for status in [StatusCode::BAD_REQUEST, StatusCode::TOO_MANY_REQUESTS, StatusCode::BAD_GATEWAY] {
            match map_status(status, &req) {
                WeatherError::Upstream { status: s } => assert_eq!(s, status.as_u16()),
                other => panic!("expected upstream, got {other:?}"),
            }
        }
    }

    #[test]
    fn endpoint_joins_base_url_without_double_slash() {
        let provider =
            OpenWeatherProvider::new("KEY".into(), "http://localhost:1234/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(provider.endpoint, "http://localhost:1234/data/2.5/weather");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }
}
