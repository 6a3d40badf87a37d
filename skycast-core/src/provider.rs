use crate::{Config, Location, WeatherData, WeatherError, provider::open_meteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod open_meteo;

/// Remote source of geocoding and current conditions.
///
/// Calls are independent and uncached; every call goes to the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a city name to its single best match.
    async fn geocode_city(&self, name: &str) -> Result<Location, WeatherError>;

    async fn fetch_forecast(&self, location: &Location) -> Result<WeatherData, WeatherError>;
}

/// Construct the Open-Meteo provider with endpoints from config.
pub fn provider_from_config(config: &Config) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenMeteoProvider::with_endpoints(
        config.api.forecast_url.clone(),
        config.api.geocoding_url.clone(),
        config.api.language.clone(),
    ))
}
