//! Open-Meteo response shapes and their translation into domain types.
//!
//! DTOs carry only the fields the mapper reads; anything else in the upstream
//! payload is ignored by serde.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::{
    error::WeatherError,
    model::{Location, WeatherData},
    wmo,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDto {
    #[serde(default)]
    pub utc_offset_seconds: i64,
    pub current_units: CurrentUnitsDto,
    pub current: CurrentDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUnitsDto {
    pub temperature_2m: String,
    pub wind_speed_10m: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentDto {
    /// Local wall-clock time, e.g. `2024-01-01T12:00`.
    pub time: String,
    pub temperature_2m: f64,
    pub relative_humidity_2m: f64,
    pub weather_code: i32,
    pub wind_speed_10m: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponseDto {
    #[serde(default)]
    pub results: Option<Vec<GeocodingResultDto>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResultDto {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub country: Option<String>,
}

/// Map the forecast "current" block into [`WeatherData`].
pub fn map_forecast(dto: &ForecastDto) -> Result<WeatherData, WeatherError> {
    let current = &dto.current;
    let timestamp = local_time_to_utc(&current.time, dto.utc_offset_seconds)?;

    Ok(WeatherData {
        temperature: current.temperature_2m,
        temperature_unit: dto.current_units.temperature_2m.clone(),
        weather_code: current.weather_code,
        weather_description: wmo::describe(current.weather_code).to_string(),
        wind_speed: current.wind_speed_10m,
        wind_speed_unit: dto.current_units.wind_speed_10m.clone(),
        humidity: current.relative_humidity_2m,
        timestamp,
    })
}

/// Map a single geocoding hit into a named [`Location`].
pub fn map_geocode_result(dto: &GeocodingResultDto) -> Location {
    Location {
        latitude: dto.latitude,
        longitude: dto.longitude,
        city: Some(dto.name.clone()),
        country: dto.country.clone(),
    }
}

fn local_time_to_utc(time: &str, utc_offset_seconds: i64) -> Result<DateTime<Utc>, WeatherError> {
    // Open-Meteo omits seconds in iso8601 mode; accept both forms.
    let naive = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| WeatherError::MappingFault(format!("invalid time '{time}': {e}")))?;

    TimeDelta::try_seconds(utc_offset_seconds)
        .and_then(|offset| naive.checked_sub_signed(offset))
        .map(|utc| utc.and_utc())
        .ok_or_else(|| {
            WeatherError::MappingFault(format!("invalid utc_offset_seconds {utc_offset_seconds}"))
        })
}
