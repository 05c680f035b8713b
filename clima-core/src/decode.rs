use serde::Deserialize;

use crate::{error::DecodeError, model::WeatherResult};

#[derive(Debug, Deserialize)]
struct OwCondition {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

/// Fields of `/data/2.5/weather` we consume; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct RawWeatherResponse {
    weather: Vec<OwCondition>,
    main: OwMain,
    name: String,
}

impl TryFrom<RawWeatherResponse> for WeatherResult {
    type Error = DecodeError;

    fn try_from(raw: RawWeatherResponse) -> Result<Self, Self::Error> {
        let condition = raw.weather.first().ok_or(DecodeError::EmptyConditions)?;

        Ok(WeatherResult {
            condition_id: condition.id,
            city_name: raw.name,
            temperature_c: raw.main.temp,
        })
    }
}

/// Decode a successful response body into a result.
///
/// The body must be UTF-8 JSON; invalid bytes are a decode failure.
pub fn decode(body: &[u8]) -> Result<WeatherResult, DecodeError> {
    let raw: RawWeatherResponse = serde_json::from_slice(body)?;
    WeatherResult::try_from(raw)
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    message: String,
}

/// Best-effort message for a non-2xx body, e.g. `{"cod":"404","message":"city not found"}`.
pub(crate) fn error_message(body: &[u8]) -> String {
    match serde_json::from_slice::<OwErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => truncate_body(&String::from_utf8_lossy(body)),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
