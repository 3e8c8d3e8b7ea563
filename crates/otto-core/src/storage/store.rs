//! Best-effort persistence of [`AppState`].
//!
//! Storage faults never propagate to callers. The first fault marks the store
//! unavailable for the rest of the session and every later save becomes a
//! no-op; the host shows [`STORAGE_NOTICE`] while that is the case.

use std::cell::RefCell;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::error::StorageError;
use crate::state::{AppState, Challenge, DayPlan, DayResult, STATE_VERSION, WEEK_LEN};

/// Sticky message shown once persistence has failed.
pub const STORAGE_NOTICE: &str =
    "Storage is unavailable. Changes made in this session will not be saved.";

/// Durable key-value storage holding the serialized state.
pub trait StateBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Process-local backend, used for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-seeded with `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let backend = Self::new();
        backend
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        backend
    }
}

impl StateBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads, saves and clears the state blob under one key.
pub struct PersistenceStore {
    backend: Box<dyn StateBackend>,
    key: String,
    available: bool,
}

impl PersistenceStore {
    pub fn new(backend: Box<dyn StateBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            available: true,
        }
    }

    /// Store over a fresh [`MemoryBackend`].
    pub fn in_memory(key: impl Into<String>) -> Self {
        Self::new(Box::new(MemoryBackend::new()), key)
    }

    /// Store whose backend could not be opened. Loads defaults and never
    /// writes.
    pub fn unavailable(key: impl Into<String>) -> Self {
        Self {
            available: false,
            ..Self::in_memory(key)
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The sticky notice, while persistence is unavailable.
    pub fn notice(&self) -> Option<&'static str> {
        (!self.available).then_some(STORAGE_NOTICE)
    }

    /// Load the stored state, repairing or defaulting as needed.
    pub fn load(&mut self) -> AppState {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return AppState::default(),
            Err(e) => {
                log::error!("Failed to load state: {e}");
                self.available = false;
                return AppState::default();
            }
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => repair(value),
            Err(e) => {
                log::error!("Failed to load state: stored blob is not JSON: {e}");
                self.available = false;
                AppState::default()
            }
        }
    }

    /// Replace the stored blob with `state`.
    pub fn save(&mut self, state: &AppState) {
        if !self.available {
            return;
        }
        let written = serde_json::to_string(state)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
            .and_then(|blob| self.backend.write(&self.key, &blob));
        if let Err(e) = written {
            log::error!("Failed to save state: {e}");
            self.available = false;
        }
    }

    /// Remove the stored blob. Faults are logged and ignored.
    pub fn clear(&mut self) {
        if let Err(e) = self.backend.remove(&self.key) {
            log::warn!("Unable to clear storage: {e}");
        }
    }
}

/// Rebuild a state from an untrusted JSON value.
///
/// A non-object or a foreign version tag yields the default state. Otherwise
/// each top-level key is repaired on its own.
pub fn repair(value: Value) -> AppState {
    let Value::Object(obj) = value else {
        return AppState::default();
    };
    if obj.get("version").and_then(Value::as_str) != Some(STATE_VERSION) {
        log::info!("Discarding stored state with unknown version");
        return AppState::default();
    }

    let mut state = AppState::default();
    if let Some(Value::Array(days)) = obj.get("weeklyPlan") {
        if days.len() == WEEK_LEN {
            for (slot, day) in state.weekly_plan.iter_mut().zip(days) {
                *slot = repair_day(day);
            }
        }
    }
    state.challenge_by_date = repair_dated::<Challenge>(obj.get("challengeByDate"));
    state.results_by_date = repair_dated::<DayResult>(obj.get("resultsByDate"));
    state.metrics.ema_progress = obj
        .get("metrics")
        .and_then(|m| m.get("emaProgress"))
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0);
    state.last_value_moved_today = obj
        .get("lastValueMovedToday")
        .and_then(Value::as_u64)
        .filter(|v| (1..=10).contains(v))
        .map(|v| v as u8);
    state
}

fn repair_day(day: &Value) -> DayPlan {
    let field = |name: &str| day.get(name).and_then(Value::as_str).map(str::to_string);
    DayPlan {
        field1: field("field1"),
        field2: field("field2"),
        field3: field("field3"),
    }
}

/// Keep entries whose key is an ISO date and whose value deserializes.
fn repair_dated<T: serde::de::DeserializeOwned>(
    value: Option<&Value>,
) -> std::collections::BTreeMap<NaiveDate, T> {
    let empty = Map::new();
    let entries = value.and_then(Value::as_object).unwrap_or(&empty);
    entries
        .iter()
        .filter_map(|(key, entry)| {
            let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
            let parsed = serde_json::from_value(entry.clone()).ok()?;
            Some((date, parsed))
        })
        .collect()
}
