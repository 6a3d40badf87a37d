//! The two user-facing flows: weather at the current position and weather for
//! a named city.
//!
//! Each flow is strictly sequential. Progress is published as a [`FlowState`]
//! on a watch channel. When flows overlap, only the most recently started one
//! may publish its terminal state; a superseded flow still returns its result
//! to its own caller.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use tokio::sync::watch;

use crate::{
    error::WeatherError,
    history::HistoryStore,
    location::{self, LocationOptions, LocationProvider},
    model::{SearchHistoryEntry, WeatherReport},
    provider::WeatherProvider,
};

/// Observable state of the most recent flow.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FlowState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    /// Human-readable failure message.
    Error(String),
}

impl FlowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug)]
pub struct SearchOrchestrator {
    weather: Arc<dyn WeatherProvider>,
    location: Arc<dyn LocationProvider>,
    history: HistoryStore,
    location_options: LocationOptions,
    state: watch::Sender<FlowState>,
    generation: AtomicU64,
}

impl SearchOrchestrator {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        location: Arc<dyn LocationProvider>,
        history: HistoryStore,
        location_options: LocationOptions,
    ) -> Self {
        let (state, _) = watch::channel(FlowState::Idle);
        Self {
            weather,
            location,
            history,
            location_options,
            state,
            generation: AtomicU64::new(0),
        }
    }

    pub fn state(&self) -> FlowState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FlowState> {
        self.state.subscribe()
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Current position → forecast. Never touches history.
    pub async fn weather_here(&self) -> Result<WeatherReport, WeatherError> {
        let ticket = self.begin();

        let result = self.run_here().await;
        self.finish(ticket, &result);
        result
    }

    /// Geocode `name` → forecast → save to history.
    pub async fn weather_for_city(&self, name: &str) -> Result<WeatherReport, WeatherError> {
        let ticket = self.begin();

        let result = self.run_city(name).await;
        self.finish(ticket, &result);
        result
    }

    async fn run_here(&self) -> Result<WeatherReport, WeatherError> {
        let location = location::locate(self.location.as_ref(), &self.location_options).await?;
        let weather = self.weather.fetch_forecast(&location).await?;

        Ok(WeatherReport { location, weather })
    }

    async fn run_city(&self, name: &str) -> Result<WeatherReport, WeatherError> {
        let query = name.trim();
        if query.is_empty() {
            return Err(WeatherError::EmptyCityName);
        }

        let location = self.weather.geocode_city(query).await?;
        let weather = self.weather.fetch_forecast(&location).await?;

        let city_name = location.city.clone().unwrap_or_else(|| query.to_string());
        self.history.save(SearchHistoryEntry::new(city_name, weather.clone()));

        Ok(WeatherReport { location, weather })
    }

    /// Take a new ticket and publish `Loading`.
    ///
    /// The ticket is bumped while holding the watch lock so that it can never
    /// interleave with a concurrent [`Self::finish`].
    fn begin(&self) -> u64 {
        let mut ticket = 0;
        self.state.send_modify(|state| {
            ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FlowState::Loading;
        });
        ticket
    }

    fn finish(&self, ticket: u64, result: &Result<WeatherReport, WeatherError>) {
        let next = match result {
            Ok(report) => {
                tracing::info!(location = %report.location.label(), "weather lookup succeeded");
                FlowState::Success(report.clone())
            }
            Err(e) => {
                tracing::warn!("weather lookup failed: {e}");
                FlowState::Error(e.user_message())
            }
        };

        // Check and write under the same lock `begin` takes.
        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *state = next;
            true
        });
        if !published {
            tracing::debug!(ticket, "discarding result of superseded flow");
        }
    }
}
