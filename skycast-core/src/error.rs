//! Failure taxonomy shared by every stage of the lookup pipeline.

use thiserror::Error;

/// Reasons the device position could not be obtained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Geolocation is not supported on this device")]
    Unsupported,

    #[error("Location permission denied")]
    PermissionDenied,

    #[error("Location information is unavailable")]
    Unavailable,

    #[error("Location request timed out")]
    Timeout,

    #[error("Unable to retrieve your location: {0}")]
    Unknown(String),
}

/// Errors produced by the weather client, the mapper and the search flows.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Location(#[from] LocationError),

    #[error("City \"{0}\" not found")]
    NotFound(String),

    #[error("{}", transport_message(.status, .message))]
    Transport { status: Option<u16>, message: String },

    #[error("Unexpected response shape: {0}")]
    MappingFault(String),

    #[error("City name must not be empty")]
    EmptyCityName,

    #[error("Coordinates out of range: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

fn transport_message(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Server Error ({code}): {message}"),
        None => format!("Network error: {message}"),
    }
}

impl WeatherError {
    /// Human-readable text for the flow's terminal error state.
    pub fn user_message(&self) -> String {
        match self {
            Self::Location(LocationError::PermissionDenied) => {
                "Location permission denied. Please enable location access.".to_string()
            }
            Self::Location(err) => err.to_string(),
            Self::NotFound(city) => format!("City \"{city}\" not found"),
            Self::Transport { .. } => self.to_string(),
            Self::MappingFault(_) => "Weather service returned an unexpected response".to_string(),
            Self::EmptyCityName => "Please enter a city name".to_string(),
            Self::InvalidCoordinates { .. } => self.to_string(),
        }
    }

    /// HTTP status attached to a transport failure, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::MappingFault(err.to_string());
        }
        Self::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::MappingFault(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_the_city() {
        let err = WeatherError::NotFound("NonExistentCity".into());
        assert!(err.user_message().contains("NonExistentCity"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn transport_message_includes_status_when_known() {
        let err = WeatherError::Transport {
            status: Some(500),
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.status(), Some(500));
        assert!(err.user_message().contains("Server Error (500)"));

        let err = WeatherError::Transport {
            status: None,
            message: "connection refused".into(),
        };
        assert_eq!(err.status(), None);
        assert!(err.user_message().starts_with("Network error"));
    }

    #[test]
    fn location_errors_convert() {
        let err: WeatherError = LocationError::PermissionDenied.into();
        assert!(matches!(err, WeatherError::Location(LocationError::PermissionDenied)));
        assert!(err.user_message().contains("permission denied"));

        let err: WeatherError = LocationError::Timeout.into();
        assert_eq!(err.user_message(), "Location request timed out");
    }
}
