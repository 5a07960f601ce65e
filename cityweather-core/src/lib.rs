//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - Input validation and query composition (city + optional ISO country code)
//! - The OpenWeather client and its error mapping
//! - Response validation into a typed [`WeatherReading`]
//! - Configuration & credentials handling
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod country;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;

pub use config::Config;
pub use country::{country_flag, is_valid_country_code, normalize_country_code};
pub use error::WeatherError;
pub use model::{Condition, WeatherReading, validate_reading};
pub use provider::{WeatherProvider, get_weather, prepare_lookup, provider_from_config};
pub use query::{CountryCodeCheck, WeatherRequest, build_query, check_partial_country_code};
