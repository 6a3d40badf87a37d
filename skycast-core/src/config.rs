use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::{
    location::{IP_API_URL, LocationOptions},
    model::Location,
    provider::open_meteo::{FORECAST_URL, GEOCODING_URL},
};

/// Remote endpoints and request preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub forecast_url: String,
    pub geocoding_url: String,
    pub ip_location_url: String,
    /// Language for geocoding results, e.g. "en".
    pub language: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            geocoding_url: GEOCODING_URL.to_string(),
            ip_location_url: IP_API_URL.to_string(),
            language: "en".to_string(),
        }
    }
}

/// Home position used by `here` when no device lookup is requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub timeout_secs: u64,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: None,
            longitude: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Overrides the platform data directory.
    pub dir: Option<PathBuf>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [api]
/// language = "en"
///
/// [location]
/// latitude = 51.5074
/// longitude = -0.1278
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub location: LocationConfig,
    pub history: HistoryConfig,
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Configured home position, if both coordinates are set.
    pub fn home_location(&self) -> Result<Option<Location>> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Location::new(lat, lon)
                .map(Some)
                .context("Invalid [location] coordinates in config"),
            (None, None) => Ok(None),
            _ => Err(anyhow!(
                "Incomplete [location] section: set both latitude and longitude.\n\
                 Hint: run `skycast configure`."
            )),
        }
    }

    pub fn set_home_location(&mut self, location: &Location) {
        self.location.latitude = Some(location.latitude);
        self.location.longitude = Some(location.longitude);
    }

    pub fn location_options(&self) -> LocationOptions {
        LocationOptions {
            timeout: Duration::from_secs(self.location.timeout_secs),
            ..LocationOptions::default()
        }
    }
}
