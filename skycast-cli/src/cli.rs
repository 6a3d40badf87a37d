use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use skycast_core::{
    Config, FileStore, FixedLocationProvider, HistoryStore, IpLocationProvider, Location,
    LocationProvider, SearchOrchestrator, provider::provider_from_config,
};
use std::sync::Arc;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather from Open-Meteo")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively set language and home location.
    Configure,

    /// Show weather at the current location.
    Here {
        /// Locate by public IP address instead of the configured home location.
        #[arg(long)]
        ip: bool,
    },

    /// Show weather for a city and remember the search.
    Search {
        /// City name, e.g. "London".
        city: String,
    },

    /// Inspect or edit past searches.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum HistoryAction {
    /// List past searches, newest first.
    List,
    /// Show the stored snapshot of one search.
    Show { id: String },
    /// Forget one search.
    Remove { id: String },
    /// Forget all searches.
    Clear,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        match self.command {
            Command::Configure => configure(config)?,
            Command::Here { ip } => {
                let location: Arc<dyn LocationProvider> = if ip {
                    Arc::new(IpLocationProvider::with_url(config.api.ip_location_url.clone()))
                } else {
                    Arc::new(FixedLocationProvider::new(config.home_location()?))
                };

                let search = orchestrator(&config, location)?;
                match search.weather_here().await {
                    Ok(report) => output::print_report(&report),
                    Err(e) => anyhow::bail!(e.user_message()),
                }
            }
            Command::Search { city } => {
                let search = orchestrator(&config, Arc::new(FixedLocationProvider::default()))?;
                match search.weather_for_city(&city).await {
                    Ok(report) => output::print_report(&report),
                    Err(e) => anyhow::bail!(e.user_message()),
                }
            }
            Command::History { action } => {
                let history = history_store(&config)?;
                match action.unwrap_or(HistoryAction::List) {
                    HistoryAction::List => output::print_history(&history.list()),
                    HistoryAction::Show { id } => {
                        let entry = history
                            .find(&id)
                            .with_context(|| format!("No history entry with id '{id}'"))?;
                        output::print_entry(&entry);
                    }
                    HistoryAction::Remove { id } => println!("{}", remove_entry(&history, &id)?),
                    HistoryAction::Clear => {
                        history.clear();
                        println!("Search history cleared");
                    }
                }
            }
        }

        Ok(())
    }
}

/// Composition root: build the orchestrator from configuration.
fn orchestrator(
    config: &Config,
    location: Arc<dyn LocationProvider>,
) -> anyhow::Result<SearchOrchestrator> {
    Ok(SearchOrchestrator::new(
        provider_from_config(config),
        location,
        history_store(config)?,
        config.location_options(),
    ))
}

fn history_store(config: &Config) -> anyhow::Result<HistoryStore> {
    let store = match &config.history.dir {
        Some(dir) => FileStore::new(dir),
        None => FileStore::default_location()?,
    };
    tracing::debug!(dir = %store.dir().display(), "using history store");

    Ok(HistoryStore::new(Arc::new(store)))
}

fn remove_entry(history: &HistoryStore, id: &str) -> anyhow::Result<String> {
    if history.find(id).is_none() {
        anyhow::bail!("No history entry with id '{id}'");
    }
    if !history.remove(id) {
        anyhow::bail!("Could not remove history entry '{id}'");
    }
    Ok(format!("Removed {id}"))
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    let language = Text::new("Geocoding language:")
        .with_default(&config.api.language)
        .prompt()?;
    config.api.language = language.trim().to_string();

    let latitude = CustomType::<f64>::new("Home latitude (-90..90):")
        .with_error_message("Please enter a number")
        .with_default(config.location.latitude.unwrap_or(0.0))
        .prompt()?;
    let longitude = CustomType::<f64>::new("Home longitude (-180..180):")
        .with_error_message("Please enter a number")
        .with_default(config.location.longitude.unwrap_or(0.0))
        .prompt()?;

    let home = Location::new(latitude, longitude)?;
    config.set_home_location(&home);
    config.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}
