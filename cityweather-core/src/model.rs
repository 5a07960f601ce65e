use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::WeatherError;

/// Current conditions for one location, as returned by OpenWeather in metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub coord: Coord,
    pub weather: Vec<Condition>,
    pub base: String,
    pub main: Metrics,
    pub visibility: f64,
    pub wind: Wind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rain: Option<Rain>,
    pub clouds: Clouds,
    pub name: String,
    pub id: i64,
    /// Shift in seconds from UTC.
    pub timezone: i64,
    pub sys: Sys,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coord {
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    /// Condition group, e.g. "Rain".
    pub main: String,
    pub description: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub pressure: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rain {
    #[serde(rename = "1h", default, skip_serializing_if = "Option::is_none")]
    pub one_hour: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clouds {
    pub all: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sys {
    pub country: String,
}

impl WeatherReading {
    /// First reported condition; validation guarantees there is one.
    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    pub fn rain_last_hour(&self) -> Option<f64> {
        self.rain.as_ref().and_then(|r| r.one_hour)
    }

    /// Timezone of the resolved location, `None` if the offset is out of range.
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        i32::try_from(self.timezone)
            .ok()
            .and_then(FixedOffset::east_opt)
    }

    /// True when a country was requested and upstream resolved a different one.
    pub fn country_mismatch(&self, requested: Option<&str>) -> bool {
        requested.is_some_and(|cc| !cc.eq_ignore_ascii_case(&self.sys.country))
    }

    fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        let mut fields = vec![
            ("coord.lon", self.coord.lon),
            ("coord.lat", self.coord.lat),
            ("main.temp", self.main.temp),
            ("main.feels_like", self.main.feels_like),
            ("main.temp_min", self.main.temp_min),
            ("main.temp_max", self.main.temp_max),
            ("main.pressure", self.main.pressure),
            ("main.humidity", self.main.humidity),
            ("visibility", self.visibility),
            ("wind.speed", self.wind.speed),
            ("clouds.all", self.clouds.all),
        ];
        if let Some(rain) = self.rain_last_hour() {
            fields.push(("rain.1h", rain));
        }
        fields
    }
}

/// Parse and validate an upstream response body.
///
/// Missing or mistyped fields are reported with their JSON path. The
/// condition list must be non-empty and every number finite. Unknown
/// fields are ignored.
pub fn validate_reading(body: &str) -> Result<WeatherReading, WeatherError> {
    let de = &mut serde_json::Deserializer::from_str(body);
    let reading: WeatherReading = serde_path_to_error::deserialize(de)
        .map_err(|e| WeatherError::Schema(format!("{}: {}", e.path(), e.inner())))?;

    if reading.weather.is_empty() {
        return Err(WeatherError::Schema(
            "weather: expected at least one condition".to_string(),
        ));
    }

    if let Some((path, _)) = reading
        .numeric_fields()
        .into_iter()
        .find(|(_, value)| !value.is_finite())
    {
        return Err(WeatherError::Schema(format!("{path}: expected a finite number")));
    }

    Ok(reading)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn london_payload() -> Value {
        json!({
            "coord": { "lon": -0.1257, "lat": 51.5085 },
            "weather": [
                { "id": 500, "main": "Rain", "description": "light rain", "icon": "10d" }
            ],
            "base": "stations",
            "main": {
                "temp": 11.6, "feels_like": 10.9, "temp_min": 10.4, "temp_max": 12.6,
                "pressure": 1012, "humidity": 81
            },
            "visibility": 10000,
            "wind": { "speed": 4.63, "deg": 240 },
            "rain": { "1h": 0.27 },
            "clouds": { "all": 75 },
            "dt": 1700000000,
            "sys": { "type": 2, "id": 2075535, "country": "GB", "sunrise": 1699946360, "sunset": 1699979093 },
            "timezone": 0,
            "id": 2643743,
            "name": "London",
            "cod": 200
        })
    }

    #[test]
    fn well_formed_payload_validates_unchanged() {
        let reading = validate_reading(&london_payload().to_string()).unwrap();

        assert_eq!(reading.name, "London");
        assert_eq!(reading.sys.country, "GB");
        assert_eq!(reading.main.temp, 11.6);
        assert_eq!(reading.main.pressure, 1012.0);
        assert_eq!(reading.rain_last_hour(), Some(0.27));
        assert_eq!(reading.primary_condition().map(|c| c.main.as_str()), Some("Rain"));
    }

    #[test]
    fn missing_main_temp_is_schema_error() {
        let mut payload = london_payload();
        payload["main"].as_object_mut().unwrap().remove("temp");

        let err = validate_reading(&payload.to_string()).unwrap_err();
        match err {
            WeatherError::Schema(msg) => {
                assert!(msg.starts_with("main"), "{msg}");
                assert!(msg.contains("temp"), "{msg}");
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_reports_path() {
        let mut payload = london_payload();
        payload["sys"]["country"] = json!(826);

        let err = validate_reading(&payload.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::Schema(ref msg) if msg.starts_with("sys.country")));
    }

    #[test]
    fn empty_condition_list_is_rejected() {
        let mut payload = london_payload();
        payload["weather"] = json!([]);

        let err = validate_reading(&payload.to_string()).unwrap_err();
        assert!(matches!(err, WeatherError::Schema(ref msg) if msg.starts_with("weather")));
    }

    #[test]
    fn rain_is_optional() {
        let mut payload = london_payload();
        payload.as_object_mut().unwrap().remove("rain");
        let reading = validate_reading(&payload.to_string()).unwrap();
        assert_eq!(reading.rain_last_hour(), None);

        payload["rain"] = json!({});
        let reading = validate_reading(&payload.to_string()).unwrap();
        assert_eq!(reading.rain_last_hour(), None);
    }

    #[test]
    fn non_json_body_is_schema_error() {
        let err = validate_reading("<html>bad gateway</html>").unwrap_err();
        assert!(matches!(err, WeatherError::Schema(_)));
    }

    #[test]
    fn country_mismatch_is_case_insensitive() {
        let reading = validate_reading(&london_payload().to_string()).unwrap();

        assert!(!reading.country_mismatch(None));
        assert!(!reading.country_mismatch(Some("gb")));
        assert!(!reading.country_mismatch(Some("GB")));
        assert!(reading.country_mismatch(Some("US")));
    }

    #[test]
    fn utc_offset_follows_timezone_seconds() {
        let mut payload = london_payload();
        payload["timezone"] = json!(-18000);
        let reading = validate_reading(&payload.to_string()).unwrap();

        assert_eq!(reading.utc_offset(), FixedOffset::west_opt(5 * 3600));

        payload["timezone"] = json!(10_000_000);
        let reading = validate_reading(&payload.to_string()).unwrap();
        assert_eq!(reading.utc_offset(), None);
    }
}
