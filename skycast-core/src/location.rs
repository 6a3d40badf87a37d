//! Device position lookup.
//!
//! A [`LocationProvider`] resolves once per call; [`locate`] applies the
//! request timeout on top of whichever provider is in use.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};

use crate::{error::LocationError, model::Location};

pub const DEFAULT_LOCATION_TIMEOUT: Duration = Duration::from_secs(10);
pub const IP_API_URL: &str = "http://ip-api.com/json";

/// Parameters for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Oldest acceptable cached fix; zero means always take a fresh one.
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: DEFAULT_LOCATION_TIMEOUT,
            maximum_age: Duration::ZERO,
        }
    }
}

#[async_trait]
pub trait LocationProvider: Send + Sync + Debug {
    async fn current_location(&self, options: &LocationOptions)
    -> Result<Location, LocationError>;
}

/// Ask `provider` for a position, failing with [`LocationError::Timeout`]
/// once `options.timeout` has elapsed. Never retries.
pub async fn locate(
    provider: &dyn LocationProvider,
    options: &LocationOptions,
) -> Result<Location, LocationError> {
    match tokio::time::timeout(options.timeout, provider.current_location(options)).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(timeout = ?options.timeout, "location request timed out");
            Err(LocationError::Timeout)
        }
    }
}

/// Position taken from configuration.
#[derive(Debug, Clone, Default)]
pub struct FixedLocationProvider {
    location: Option<Location>,
}

impl FixedLocationProvider {
    pub fn new(location: Option<Location>) -> Self {
        Self { location }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_location(
        &self,
        _options: &LocationOptions,
    ) -> Result<Location, LocationError> {
        self.location.clone().ok_or(LocationError::Unsupported)
    }
}

/// Coarse position derived from the public IP address.
///
/// Accuracy is city-level regardless of `high_accuracy`; results are never
/// cached, so `maximum_age` is always satisfied.
#[derive(Debug, Clone)]
pub struct IpLocationProvider {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    country: Option<String>,
}

impl IpLocationProvider {
    pub fn new() -> Self {
        Self::with_url(IP_API_URL)
    }

    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: Client::new(),
        }
    }
}

impl Default for IpLocationProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn current_location(
        &self,
        _options: &LocationOptions,
    ) -> Result<Location, LocationError> {
        tracing::debug!(url = %self.url, "requesting IP geolocation");

        let res = self.http.get(&self.url).send().await.map_err(|e| {
            tracing::warn!("IP geolocation request failed: {e}");
            LocationError::Unavailable
        })?;

        let status = res.status();
        if status == StatusCode::FORBIDDEN {
            return Err(LocationError::PermissionDenied);
        }
        if !status.is_success() {
            tracing::warn!(%status, "IP geolocation returned an error status");
            return Err(LocationError::Unavailable);
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| LocationError::Unknown(format!("unexpected response: {e}")))?;

        if body.status != "success" {
            tracing::warn!(
                reason = body.message.as_deref().unwrap_or(""),
                "IP geolocation lookup failed"
            );
            return Err(LocationError::Unavailable);
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(LocationError::Unknown("response has no coordinates".to_string()));
        };

        let location = Location::new(lat, lon)
            .map_err(|e| LocationError::Unknown(e.to_string()))?
            .with_place(body.city, body.country);

        tracing::info!("Located via IP: {}", location.label());
        Ok(location)
    }
}
