use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::WeatherError,
    wmo::{self, WeatherIcon},
};

/// Geographic position, optionally resolved to a named place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl Location {
    /// Bare coordinates; rejects values outside the WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, WeatherError> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(WeatherError::InvalidCoordinates { latitude, longitude });
        }

        Ok(Self {
            latitude,
            longitude,
            city: None,
            country: None,
        })
    }

    pub fn with_place(mut self, city: Option<String>, country: Option<String>) -> Self {
        self.city = city;
        self.country = country;
        self
    }

    /// Display label: "City, Country", "City", or the rounded coordinates.
    pub fn label(&self) -> String {
        match (&self.city, &self.country) {
            (Some(city), Some(country)) if !country.is_empty() => format!("{city}, {country}"),
            (Some(city), _) => city.clone(),
            _ => format!("Lat: {:.2}, Lon: {:.2}", self.latitude, self.longitude),
        }
    }
}

/// Current conditions at a location, as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherData {
    pub temperature: f64,
    pub temperature_unit: String,
    pub weather_code: i32,
    pub weather_description: String,
    pub wind_speed: f64,
    pub wind_speed_unit: String,
    /// Relative humidity, percent.
    pub humidity: f64,
    pub timestamp: DateTime<Utc>,
}

impl WeatherData {
    pub fn icon(&self) -> WeatherIcon {
        wmo::icon_for(self.weather_code)
    }
}

/// A successful named-city search, snapshotted at the time it was made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,
    pub city_name: String,
    pub weather: WeatherData,
    pub searched_at: DateTime<Utc>,
}

impl SearchHistoryEntry {
    /// New entry with a fresh id, stamped with the current time.
    pub fn new(city_name: impl Into<String>, weather: WeatherData) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            city_name: city_name.into(),
            weather,
            searched_at: Utc::now(),
        }
    }
}

/// Result of a completed flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: Location,
    pub weather: WeatherData,
}
