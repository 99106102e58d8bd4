// --- File: crates/atende_tracker/src/store.rs ---
//! Durable local storage.
//!
//! The application keeps a handful of records on the professional's machine:
//! the confirmation decisions about past appointments and the session keys.
//! [`LocalStore`] is the key→string layer (one file per key under a fixed
//! directory); [`ConfirmationStore`] sits on top of it and owns the
//! appointment-id→decision map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

use atende_common::error::AtendeError;

/// Storage key of the confirmation-decision map.
pub const CONFIRMATION_STORE_KEY: &str = "confirmed_attendances";
/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key of the logged-in professional's id.
pub const PROFESSIONAL_KEY: &str = "professional_id";

/// Key→string durable storage rooted at a directory.
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AtendeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(LocalStore { dir })
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }

    pub fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    pub fn put(&self, key: &str, value: &str) -> Result<(), AtendeError> {
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    /// Removes a key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> Result<(), AtendeError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Which decision was taken about a past appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfirmationAction {
    #[serde(rename = "confirmed")]
    Confirmed,
    #[serde(rename = "no-show")]
    NoShow,
}

/// The local record of one decision. At most one exists per appointment id;
/// a later decision overwrites the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfirmationRecord {
    pub id: String,
    pub action: ConfirmationAction,
    pub timestamp: DateTime<Utc>,
}

/// The appointment-id→decision map, persisted as a JSON array under
/// [`CONFIRMATION_STORE_KEY`] on every change.
pub struct ConfirmationStore {
    store: LocalStore,
    records: HashMap<String, ConfirmationRecord>,
}

impl ConfirmationStore {
    /// Rehydrates the map from durable storage. Unreadable stored data is
    /// discarded with a warning instead of crashing.
    pub fn load(store: LocalStore) -> Self {
        let records = match store.get(CONFIRMATION_STORE_KEY) {
            None => HashMap::new(),
            Some(raw) => match serde_json::from_str::<Vec<ConfirmationRecord>>(&raw) {
                Ok(list) => list
                    .into_iter()
                    .map(|record| (record.id.clone(), record))
                    .collect(),
                Err(err) => {
                    warn!("Discarding unreadable confirmation records: {err}");
                    HashMap::new()
                }
            },
        };
        ConfirmationStore { store, records }
    }

    /// Records a decision, overwriting any earlier one for the same id, and
    /// persists the whole map.
    pub fn record(&mut self, id: &str, action: ConfirmationAction, timestamp: DateTime<Utc>) {
        self.records.insert(
            id.to_string(),
            ConfirmationRecord {
                id: id.to_string(),
                action,
                timestamp,
            },
        );
        self.save();
    }

    pub fn get(&self, id: &str) -> Option<&ConfirmationRecord> {
        self.records.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops every record. Records never expire on their own.
    pub fn clear_all(&mut self) {
        self.records.clear();
        self.save();
    }

    fn save(&self) {
        let mut list: Vec<&ConfirmationRecord> = self.records.values().collect();
        list.sort_by(|a, b| a.id.cmp(&b.id));
        match serde_json::to_string(&list) {
            Ok(serialized) => {
                if let Err(err) = self.store.put(CONFIRMATION_STORE_KEY, &serialized) {
                    warn!("Failed to persist confirmation records: {err}");
                }
            }
            Err(err) => warn!("Failed to serialize confirmation records: {err}"),
        }
    }
}
