use crate::{country::normalize_country_code, error::WeatherError};

/// A validated lookup: non-empty city plus an optional known country code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    city: String,
    country_code: Option<String>,
}

impl WeatherRequest {
    /// Validate raw form input. Whitespace-only country codes count as absent.
    pub fn new(city: &str, country_code: Option<&str>) -> Result<Self, WeatherError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherError::EmptyCity);
        }

        let country_code = match country_code.map(str::trim).filter(|cc| !cc.is_empty()) {
            Some(cc) => Some(
                normalize_country_code(cc)
                    .ok_or_else(|| WeatherError::InvalidCountryCode(cc.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            city: city.to_string(),
            country_code,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    /// The `q` parameter sent upstream.
    pub fn query(&self) -> String {
        build_query(&self.city, self.country_code())
    }
}

/// Compose `"<city>"` or `"<city>,<countryCode>"`.
pub fn build_query(city: &str, country_code: Option<&str>) -> String {
    match country_code {
        Some(cc) => format!("{city},{cc}"),
        None => city.to_string(),
    }
}

/// Result of checking a country code while it is still being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountryCodeCheck {
    Empty,
    Incomplete,
    Valid(String),
    Invalid,
}

impl CountryCodeCheck {
    /// Whether a form holding this code may be submitted.
    pub fn allows_submit(&self) -> bool {
        matches!(self, CountryCodeCheck::Empty | CountryCodeCheck::Valid(_))
    }
}

/// Check partial input; a verdict is only given once two characters are in.
pub fn check_partial_country_code(input: &str) -> CountryCodeCheck {
    let trimmed = input.trim();
    match trimmed.chars().count() {
        0 => CountryCodeCheck::Empty,
        1 => CountryCodeCheck::Incomplete,
        2 => normalize_country_code(trimmed)
            .map(CountryCodeCheck::Valid)
            .unwrap_or(CountryCodeCheck::Invalid),
        _ => CountryCodeCheck::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_query_without_country() {
        assert_eq!(build_query("Paris", None), "Paris");
    }

    #[test]
    fn build_query_with_country() {
        assert_eq!(build_query("Paris", Some("FR")), "Paris,FR");
    }

    #[test]
    fn empty_or_blank_city_is_rejected() {
        for city in ["", "   ", "\t\n"] {
            let err = WeatherRequest::new(city, None).unwrap_err();
            assert!(matches!(err, WeatherError::EmptyCity), "{city:?}");
        }
    }

    #[test]
    fn city_is_trimmed() {
        let req = WeatherRequest::new("  London ", None).unwrap();
        assert_eq!(req.city(), "London");
        assert_eq!(req.query(), "London");
    }

    #[test]
    fn country_code_is_normalized_to_uppercase() {
        let req = WeatherRequest::new("Springfield", Some("us")).unwrap();
        assert_eq!(req.country_code(), Some("US"));
        assert_eq!(req.query(), "Springfield,US");
    }

    #[test]
    fn blank_country_code_counts_as_absent() {
        let req = WeatherRequest::new("Paris", Some("  ")).unwrap();
        assert_eq!(req.country_code(), None);
        assert_eq!(req.query(), "Paris");
    }

    #[test]
    fn unknown_country_code_is_rejected() {
        let err = WeatherRequest::new("London", Some("UK")).unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCountryCode(ref cc) if cc == "UK"));
    }

    #[test]
    fn empty_city_wins_over_bad_country() {
        let err = WeatherRequest::new(" ", Some("ZZ")).unwrap_err();
        assert!(matches!(err, WeatherError::EmptyCity));
    }

    #[test]
    fn partial_check_waits_for_two_characters() {
        assert_eq!(check_partial_country_code(""), CountryCodeCheck::Empty);
        assert_eq!(check_partial_country_code("U"), CountryCodeCheck::Incomplete);
        assert_eq!(check_partial_country_code("us"), CountryCodeCheck::Valid("US".into()));
        assert_eq!(check_partial_country_code("QQ"), CountryCodeCheck::Invalid);
        assert_eq!(check_partial_country_code("USA"), CountryCodeCheck::Invalid);
    }

    #[test]
    fn submit_is_blocked_unless_empty_or_valid() {
        assert!(CountryCodeCheck::Empty.allows_submit());
        assert!(CountryCodeCheck::Valid("FR".into()).allows_submit());
        assert!(!CountryCodeCheck::Incomplete.allows_submit());
        assert!(!CountryCodeCheck::Invalid.allows_submit());
    }
}
