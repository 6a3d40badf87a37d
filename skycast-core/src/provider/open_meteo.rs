use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::WeatherError,
    mapper::{self, ForecastDto, GeocodingResponseDto},
    model::{Location, WeatherData},
};

use super::WeatherProvider;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,weather_code,wind_speed_10m";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    forecast_url: String,
    geocoding_url: String,
    language: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self::with_endpoints(FORECAST_URL, GEOCODING_URL, "en")
    }

    pub fn with_endpoints(
        forecast_url: impl Into<String>,
        geocoding_url: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            forecast_url: forecast_url.into(),
            geocoding_url: geocoding_url.into(),
            language: language.into(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T, WeatherError> {
        tracing::debug!(url, ?query, "Open-Meteo {what} request");

        let res = self.http.get(url).query(query).send().await.map_err(|e| {
            tracing::error!("Open-Meteo {what} request failed: {e}");
            WeatherError::from(e)
        })?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            let message = format!(
                "{} {}",
                status.canonical_reason().unwrap_or("HTTP error"),
                truncate_body(&body)
            );
            tracing::error!("Open-Meteo {what} request failed with status {status}");
            return Err(WeatherError::Transport {
                status: Some(status.as_u16()),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Open-Meteo {what} JSON: {e}");
            WeatherError::MappingFault(format!("{what}: {e}"))
        })
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode_city(&self, name: &str) -> Result<Location, WeatherError> {
        let parsed: GeocodingResponseDto = self
            .get_json(
                &self.geocoding_url,
                &[
                    ("name", name),
                    ("count", "1"),
                    ("language", self.language.as_str()),
                    ("format", "json"),
                ],
                "geocoding",
            )
            .await?;

        let hit = parsed
            .results
            .as_deref()
            .and_then(<[_]>::first)
            .ok_or_else(|| WeatherError::NotFound(name.to_string()))?;

        Ok(mapper::map_geocode_result(hit))
    }

    async fn fetch_forecast(&self, location: &Location) -> Result<WeatherData, WeatherError> {
        let latitude = location.latitude.to_string();
        let longitude = location.longitude.to_string();

        let parsed: ForecastDto = self
            .get_json(
                &self.forecast_url,
                &[
                    ("latitude", latitude.as_str()),
                    ("longitude", longitude.as_str()),
                    ("current", CURRENT_FIELDS),
                    ("timezone", "auto"),
                ],
                "forecast",
            )
            .await?;

        mapper::map_forecast(&parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
