//! Core library for the `skycast` weather lookup.
//!
//! This crate defines:
//! - WMO code translation and Open-Meteo DTO mapping
//! - The weather client and location provider abstractions
//! - Bounded, deduplicated search history over a key-value store
//! - The search orchestrator composing the above into user-facing flows
//!
//! It is used by `skycast-cli`, but can be embedded in any front end that can
//! supply coordinates or a city name.

pub mod config;
pub mod error;
pub mod history;
pub mod location;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod search;
pub mod store;
pub mod wmo;

pub use config::Config;
pub use error::{LocationError, WeatherError};
pub use history::HistoryStore;
pub use location::{
    FixedLocationProvider, IpLocationProvider, LocationOptions, LocationProvider,
};
pub use model::{Location, SearchHistoryEntry, WeatherData, WeatherReport};
pub use provider::{WeatherProvider, open_meteo::OpenMeteoProvider};
pub use search::{FlowState, SearchOrchestrator};
pub use store::{FileStore, KeyValueStore, MemoryStore};
pub use wmo::WeatherIcon;
