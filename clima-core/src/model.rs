use serde::{Deserialize, Serialize};

/// What the caller wants weather for: a searched city or a device position.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    City { name: String },
    Coordinates { latitude: f64, longitude: f64 },
}

impl WeatherQuery {
    pub fn city(name: impl Into<String>) -> Self {
        WeatherQuery::City { name: name.into() }
    }

    /// Coordinates are forwarded as given; the provider decides what is valid.
    pub fn coordinates(latitude: f64, longitude: f64) -> Self {
        WeatherQuery::Coordinates { latitude, longitude }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub condition_id: i64,
    pub city_name: String,
    pub temperature_c: f64,
}

impl WeatherResult {
    pub fn condition(&self) -> Condition {
        Condition::from_id(self.condition_id)
    }

    /// Temperature with one decimal place, e.g. `21.5`.
    pub fn temperature_string(&self) -> String {
        format!("{:.1}", self.temperature_c)
    }
}

/// Condition groups of the OpenWeather condition codes.
/// See: https://openweathermap.org/weather-conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl Condition {
    pub fn from_id(id: i64) -> Self {
        match id {
            200..=232 => Self::Thunderstorm,
            300..=321 => Self::Drizzle,
            500..=531 => Self::Rain,
            600..=622 => Self::Snow,
            701..=781 => Self::Atmosphere,
            800 => Self::Clear,
            801..=804 => Self::Clouds,
            _ => Self::Unknown,
        }
    }

    /// Symbolic icon name used by the mobile screen.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "cloud.bolt",
            Self::Drizzle => "cloud.drizzle",
            Self::Rain => "cloud.rain",
            Self::Snow => "cloud.snow",
            Self::Atmosphere => "cloud.fog",
            Self::Clear => "sun.max",
            Self::Clouds | Self::Unknown => "cloud",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Thunderstorm => "Thunderstorm",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::Snow => "Snow",
            Self::Atmosphere => "Fog",
            Self::Clear => "Clear",
            Self::Clouds => "Cloudy",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(condition_id: i64, temperature_c: f64) -> WeatherResult {
        WeatherResult { condition_id, city_name: "London".into(), temperature_c }
    }

    #[test]
    fn condition_groups_follow_provider_code_ranges() {
        assert_eq!(Condition::from_id(200), Condition::Thunderstorm);
        assert_eq!(Condition::from_id(232), Condition::Thunderstorm);
        assert_eq!(Condition::from_id(311), Condition::Drizzle);
        assert_eq!(Condition::from_id(502), Condition::Rain);
        assert_eq!(Condition::from_id(601), Condition::Snow);
        assert_eq!(Condition::from_id(741), Condition::Atmosphere);
        assert_eq!(Condition::from_id(800), Condition::Clear);
        assert_eq!(Condition::from_id(804), Condition::Clouds);
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        assert_eq!(Condition::from_id(0), Condition::Unknown);
        assert_eq!(Condition::from_id(900), Condition::Unknown);
        assert_eq!(Condition::from_id(-1), Condition::Unknown);
        assert_eq!(Condition::Unknown.symbol_name(), "cloud");
    }

    #[test]
    fn result_exposes_symbol_for_condition() {
        assert_eq!(result(800, 21.5).condition().symbol_name(), "sun.max");
        assert_eq!(result(221, 10.0).condition().symbol_name(), "cloud.bolt");
    }

    #[test]
    fn temperature_string_has_one_decimal() {
        assert_eq!(result(800, 21.5).temperature_string(), "21.5");
        assert_eq!(result(800, -3.0).temperature_string(), "-3.0");
        assert_eq!(result(800, 12.04).temperature_string(), "12.0");
    }

    #[test]
    fn query_constructors() {
        assert_eq!(
            WeatherQuery::city("Paris"),
            WeatherQuery::City { name: "Paris".to_string() }
        );
        assert_eq!(
            WeatherQuery::coordinates(1.5, -2.25),
            WeatherQuery::Coordinates { latitude: 1.5, longitude: -2.25 }
        );
    }
}
