use cityweather_core::{
    Config, WeatherError, WeatherProvider, WeatherReading, WeatherRequest, prepare_lookup,
};
use tracing::{debug, warn};

/// What the front end shows for the current query.
#[derive(Debug)]
pub enum QueryState {
    Loading,
    Failed(WeatherError),
    Ready(WeatherReading),
}

impl From<Result<WeatherReading, WeatherError>> for QueryState {
    fn from(result: Result<WeatherReading, WeatherError>) -> Self {
        match result {
            Ok(reading) => QueryState::Ready(reading),
            Err(err) => QueryState::Failed(err),
        }
    }
}

/// A query outcome together with the validated input it ran for.
#[derive(Debug)]
pub struct Lookup {
    pub request: Option<WeatherRequest>,
    pub state: QueryState,
}

impl Lookup {
    /// Country code that was actually submitted, after validation.
    pub fn requested_country(&self) -> Option<&str> {
        self.request.as_ref().and_then(WeatherRequest::country_code)
    }
}

/// Validate input and build the provider, then query with a single retry.
///
/// The retry has to wrap only the provider call, so this goes through
/// `prepare_lookup` rather than the one-shot `get_weather`. `on_loading`
/// runs once input and configuration have been accepted.
pub async fn lookup(
    config: &Config,
    city: &str,
    country: Option<&str>,
    on_loading: impl FnOnce(),
) -> Lookup {
    let (request, provider) = match prepare_lookup(config, city, country) {
        Ok(prepared) => prepared,
        Err(err) => {
            debug!(code = err.code(), input = err.is_input_error(), "Lookup rejected before any request");
            return Lookup { request: None, state: QueryState::Failed(err) };
        }
    };

    debug!(query = %request.query(), "Submitting weather query");
    on_loading();

    let state = fetch_with_retry(provider.as_ref(), &request).await.into();
    Lookup { request: Some(request), state }
}

/// Number of extra attempts after a failed upstream query.
pub const MAX_RETRIES: usize = 1;

/// Query the provider, retrying once without looking at the error kind.
pub async fn fetch_with_retry(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
) -> Result<WeatherReading, WeatherError> {
    let mut attempt = 0;
    loop {
        match provider.get_weather(request).await {
            Ok(reading) => return Ok(reading),
            Err(err) if attempt < MAX_RETRIES => {
                attempt += 1;
                warn!(code = err.code(), attempt, "Weather query failed, retrying");
            }
            Err(err) => return Err(err),
        }
    }
}
