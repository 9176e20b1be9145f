use serde_json::Value;
use tracing::{debug, warn};

use super::Storage;
use crate::config::{WizardConfig, DEFAULT_RECORD_KEY, DEFAULT_ROUTE_KEY};
use crate::record::{FieldPath, Record};
use crate::wizard::Route;

/// Best-effort save and resume of the wizard session.
///
/// Nothing here returns an error: a failed read behaves like an empty
/// store and a failed write is dropped. Both are reported through
/// `tracing` so they can still be diagnosed.
pub struct Persistence {
    storage: Box<dyn Storage>,
    record_key: String,
    route_key: String,
}

impl Persistence {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
            record_key: DEFAULT_RECORD_KEY.to_string(),
            route_key: DEFAULT_ROUTE_KEY.to_string(),
        }
    }

    pub fn from_config(storage: impl Storage + 'static, config: &WizardConfig) -> Self {
        Self::new(storage).with_keys(&config.record_key, &config.route_key)
    }

    pub fn with_keys(mut self, record_key: &str, route_key: &str) -> Self {
        self.record_key = record_key.to_string();
        self.route_key = route_key.to_string();
        self
    }

    /// Apply each saved top-level field to `record` without validating.
    ///
    /// Returns true when a saved record was found and applied. Unknown keys
    /// and values of the wrong type are skipped individually.
    pub fn load_into(&self, record: &mut Record) -> bool {
        let raw = match self.storage.get(&self.record_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(err) => {
                warn!(key = %self.record_key, error = %err, "could not read saved record");
                return false;
            }
        };

        let saved = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                warn!(key = %self.record_key, "saved record is not a JSON object");
                return false;
            }
            Err(err) => {
                warn!(key = %self.record_key, error = %err, "saved record is not valid JSON");
                return false;
            }
        };

        for (key, value) in saved {
            let path = match key.parse::<FieldPath>() {
                Ok(path) if FieldPath::TOP_LEVEL.contains(&path) => path,
                _ => {
                    debug!(%key, "skipping unknown saved field");
                    continue;
                }
            };
            if let Err(err) = record.set_field(path, value) {
                debug!(%key, error = %err, "skipping saved field");
            }
        }
        true
    }

    pub fn save(&self, record: &Record) {
        let raw = match serde_json::to_string(record) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "could not serialize record");
                return;
            }
        };
        if let Err(err) = self.storage.set(&self.record_key, &raw) {
            warn!(key = %self.record_key, error = %err, "could not save record");
        }
    }

    pub fn load_route(&self) -> Option<Route> {
        let raw = match self.storage.get(&self.route_key) {
            Ok(raw) => raw?,
            Err(err) => {
                warn!(key = %self.route_key, error = %err, "could not read saved route");
                return None;
            }
        };
        let route = serde_json::from_str::<String>(&raw)
            .ok()
            .and_then(|s| s.parse::<Route>().ok());
        if route.is_none() {
            warn!(key = %self.route_key, "ignoring malformed saved route");
        }
        route
    }

    pub fn save_route(&self, route: Route) {
        let raw = Value::String(route.to_string()).to_string();
        if let Err(err) = self.storage.set(&self.route_key, &raw) {
            warn!(key = %self.route_key, error = %err, "could not save route");
        }
    }

    /// Forget the saved session.
    pub fn clear(&self) {
        for key in [&self.record_key, &self.route_key] {
            if let Err(err) = self.storage.remove(key) {
                warn!(%key, error = %err, "could not clear saved state");
            }
        }
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence")
            .field("record_key", &self.record_key)
            .field("route_key", &self.route_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::error::{BooklogError, Result};
    use crate::record::{Quote, ReadingStatus};
    use crate::storage::MemoryStorage;
    use crate::validate::Step;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(BooklogError::Storage("disk on fire".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(BooklogError::Storage("disk on fire".to_string()))
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(BooklogError::Storage("disk on fire".to_string()))
        }
    }

    #[test]
    fn test_save_then_resume() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(storage.clone());

        let mut record = Record::default();
        record.title = "반지의 제왕".to_string();
        record.status = ReadingStatus::Finished;
        record.quotes = vec![Quote::new("a", Some(50)), Quote::new("b", None)];
        persistence.save(&record);

        assert!(storage.get("multi-step-form:v1").unwrap().is_some());

        let mut resumed = Record::default();
        assert!(persistence.load_into(&mut resumed));
        assert_eq!(resumed, record);
    }

    #[test]
    fn test_nothing_saved() {
        let persistence = Persistence::new(MemoryStorage::new());
        let mut record = Record::default();
        assert!(!persistence.load_into(&mut record));
        assert_eq!(record, Record::default());
    }

    #[test]
    fn test_merges_fields_and_skips_bad_ones() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                DEFAULT_RECORD_KEY,
                r#"{"title":"해리포터","rating":"five","totalPages":120,"status":"paused","extra":1,"quotes.0.text":"x"}"#,
            )
            .unwrap();

        let mut record = Record::default();
        assert!(Persistence::new(storage).load_into(&mut record));
        assert_eq!(record.title, "해리포터");
        assert_eq!(record.total_pages, 120);
        assert_eq!(record.rating, 0.0);
        assert_eq!(record.status, ReadingStatus::Unset);
        assert_eq!(record.quotes, Record::default().quotes);
    }

    #[test]
    fn test_unparseable_saved_state_is_ignored() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(DEFAULT_RECORD_KEY, "{not json").unwrap();

        let mut record = Record::default();
        assert!(!Persistence::new(storage.clone()).load_into(&mut record));

        storage.set(DEFAULT_RECORD_KEY, "[1,2,3]").unwrap();
        assert!(!Persistence::new(storage).load_into(&mut record));
        assert_eq!(record, Record::default());
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let persistence = Persistence::new(BrokenStorage);
        let mut record = Record::default();

        persistence.save(&record);
        persistence.save_route(Route::Complete);
        persistence.clear();
        assert!(!persistence.load_into(&mut record));
        assert_eq!(persistence.load_route(), None);
    }

    #[test]
    fn test_route_round_trip_and_clear() {
        let storage = Arc::new(MemoryStorage::new());
        let persistence = Persistence::new(storage.clone()).with_keys("rec", "route");

        persistence.save_route(Route::Step(Step::Step3));
        assert_eq!(persistence.load_route(), Some(Route::Step(Step::Step3)));
        persistence.save(&Record::default());

        persistence.clear();
        assert_eq!(persistence.load_route(), None);
        assert_eq!(storage.get("rec").unwrap(), None);
    }
}
