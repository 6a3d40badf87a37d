//! Recent named-city searches, newest first.
//!
//! Storage and serialization faults are logged and swallowed: a broken history
//! never fails a search, and an unreadable record reads as an empty history.

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::{model::SearchHistoryEntry, store::KeyValueStore};

pub const HISTORY_KEY: &str = "weather_search_history";
pub const MAX_HISTORY_ITEMS: usize = 10;

#[derive(Debug, Clone)]
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Prepend `entry`, replacing any earlier entry for the same city
    /// (case-insensitive), and keep only the newest [`MAX_HISTORY_ITEMS`].
    pub fn save(&self, entry: SearchHistoryEntry) {
        let city = entry.city_name.to_lowercase();
        let mut entries = self.list();
        entries.retain(|item| item.city_name.to_lowercase() != city);
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ITEMS);

        if let Err(e) = self.write(&entries) {
            tracing::error!("Error saving search history: {e:#}");
        }
    }

    pub fn list(&self) -> Vec<SearchHistoryEntry> {
        match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!("Error reading search history: {e:#}");
                Vec::new()
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<SearchHistoryEntry> {
        self.list().into_iter().find(|item| item.id == id)
    }

    pub fn clear(&self) {
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            tracing::error!("Error clearing search history: {e:#}");
        }
    }

    /// Drop the entry with `id`. Returns `false` when no entry was removed,
    /// either because the id is unknown or because the write failed.
    pub fn remove(&self, id: &str) -> bool {
        let mut entries = self.list();
        let before = entries.len();
        entries.retain(|item| item.id != id);

        if entries.len() == before {
            tracing::debug!(id, "history entry not found, nothing to remove");
            return false;
        }

        match self.write(&entries) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Error removing search history entry: {e:#}");
                false
            }
        }
    }

    fn read(&self) -> Result<Vec<SearchHistoryEntry>> {
        let Some(bytes) = self.store.get(HISTORY_KEY)? else {
            return Ok(Vec::new());
        };

        serde_json::from_slice(&bytes).context("Failed to parse persisted search history")
    }

    fn write(&self, entries: &[SearchHistoryEntry]) -> Result<()> {
        let json = serde_json::to_vec(entries).context("Failed to serialize search history")?;
        self.store.set(HISTORY_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::WeatherData, store::MemoryStore};
    use anyhow::anyhow;
    use chrono::{TimeZone, Utc};

    fn weather(temperature: f64, day: u32) -> WeatherData {
        WeatherData {
            temperature,
            temperature_unit: "°C".into(),
            weather_code: 0,
            weather_description: "Clear sky".into(),
            wind_speed: 10.0,
            wind_speed_unit: "km/h".into(),
            humidity: 65.0,
            timestamp: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        }
    }

    fn entry(id: &str, city: &str, temperature: f64, day: u32) -> SearchHistoryEntry {
        SearchHistoryEntry {
            id: id.into(),
            city_name: city.into(),
            weather: weather(temperature, day),
            searched_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
        }
    }

    fn history() -> (HistoryStore, Arc<MemoryStore>) {
        let backing = Arc::new(MemoryStore::new());
        (HistoryStore::new(backing.clone()), backing)
    }

    #[derive(Debug)]
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>> {
            Err(anyhow!("disk unavailable"))
        }

        fn set(&self, _key: &str, _value: &[u8]) -> Result<()> {
            Err(anyhow!("disk unavailable"))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(anyhow!("disk unavailable"))
        }
    }

    #[test]
    fn empty_when_nothing_persisted() {
        let (history, _) = history();
        assert!(history.list().is_empty());
    }

    #[test]
    fn save_persists_entry() {
        let (history, backing) = history();
        history.save(entry("123", "London", 20.0, 1));

        let items = history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].city_name, "London");
        assert!(backing.get(HISTORY_KEY).unwrap().is_some());
    }

    #[test]
    fn same_city_keeps_latest_only() {
        let (history, _) = history();
        history.save(entry("1", "London", 18.0, 1));
        history.save(entry("2", "london", 20.0, 2));

        let items = history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
        assert_eq!(items[0].weather.temperature, 20.0);
        assert_eq!(
            items[0].searched_at,
            Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn newest_first_and_bounded() {
        let (history, _) = history();
        for i in 0..11u32 {
            history.save(entry(&i.to_string(), &format!("City {i}"), 10.0, i + 1));
        }

        let items = history.list();
        assert_eq!(items.len(), MAX_HISTORY_ITEMS);
        assert_eq!(items[0].city_name, "City 10");
        assert_eq!(items[9].city_name, "City 1");
        assert!(items.iter().all(|item| item.city_name != "City 0"));
    }

    #[test]
    fn resaving_a_city_moves_it_to_front() {
        let (history, _) = history();
        history.save(entry("1", "London", 18.0, 1));
        history.save(entry("2", "Paris", 18.0, 2));
        history.save(entry("3", "LONDON", 19.0, 3));

        let cities: Vec<_> = history.list().into_iter().map(|e| e.city_name).collect();
        assert_eq!(cities, vec!["LONDON", "Paris"]);
    }

    #[test]
    fn remove_by_id() {
        let (history, _) = history();
        history.save(entry("1", "London", 20.0, 1));
        history.save(entry("2", "Paris", 18.0, 2));

        assert!(history.remove("1"));

        let items = history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "2");
        assert_eq!(items[0].city_name, "Paris");
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let (history, _) = history();
        history.save(entry("1", "London", 20.0, 1));
        let before = history.list();

        assert!(!history.remove("does-not-exist"));

        assert_eq!(history.list(), before);
    }

    #[test]
    fn clear_removes_everything() {
        let (history, backing) = history();
        history.save(entry("1", "London", 20.0, 1));

        history.clear();

        assert!(history.list().is_empty());
        assert_eq!(backing.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn find_by_id() {
        let (history, _) = history();
        history.save(entry("1", "London", 20.0, 1));

        assert_eq!(history.find("1").map(|e| e.city_name), Some("London".to_string()));
        assert!(history.find("2").is_none());
    }

    #[test]
    fn corrupt_record_reads_as_empty() {
        let (history, backing) = history();
        backing.set(HISTORY_KEY, b"{not json").unwrap();

        assert!(history.list().is_empty());

        // next save overwrites the corrupt record
        history.save(entry("1", "London", 20.0, 1));
        assert_eq!(history.list().len(), 1);
    }

    #[test]
    fn storage_faults_are_swallowed() {
        let history = HistoryStore::new(Arc::new(BrokenStore));

        history.save(entry("1", "London", 20.0, 1));
        assert!(!history.remove("1"));
        history.clear();
        assert!(history.list().is_empty());
    }

    #[test]
    fn reads_records_written_in_persisted_format() {
        let (history, backing) = history();
        let raw = r#"[{
            "id": "1",
            "cityName": "London",
            "weather": {
                "temperature": 20,
                "temperatureUnit": "°C",
                "weatherCode": 0,
                "weatherDescription": "Clear sky",
                "windSpeed": 10,
                "windSpeedUnit": "km/h",
                "humidity": 65,
                "timestamp": "2024-01-01T12:00:00.000Z"
            },
            "searchedAt": "2024-01-01T12:00:05.000Z"
        }]"#;
        backing.set(HISTORY_KEY, raw.as_bytes()).unwrap();

        let items = history.list();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].weather.humidity, 65.0);
        assert_eq!(
            items[0].weather.timestamp,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }
}
