//! Time entries and the profile record on top of a [`KeyValueStore`].

use serde::Serialize;
use serde::de::DeserializeOwned;
use tt_core::{TimeEntry, UserProfile};

use crate::{KeyValueStore, StoreError};

/// Key holding the JSON array of entries, newest first.
pub const ENTRIES_KEY: &str = "timeEntries";

/// Key holding the JSON profile object.
pub const PROFILE_KEY: &str = "userProfile";

/// Persists the entry history and the profile singleton.
///
/// The store keeps the entry list in memory and rewrites the whole list on
/// every append. Failed writes are logged and returned, but never undo the
/// in-memory change.
pub struct EntryStore<S> {
    backend: S,
    entries: Vec<TimeEntry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    /// Wraps a backend. The in-memory list starts empty until
    /// [`load_entries`](Self::load_entries) is called.
    pub const fn new(backend: S) -> Self {
        Self {
            backend,
            entries: Vec::new(),
        }
    }

    /// The current in-memory entry list, newest first.
    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    /// Reads the persisted list without any fallback.
    pub fn try_load_entries(&self) -> Result<Vec<TimeEntry>, StoreError> {
        Ok(self.read(ENTRIES_KEY)?.unwrap_or_default())
    }

    /// Loads the persisted entry list into memory.
    ///
    /// Missing data yields an empty list. Read or decode failures are logged
    /// and also yield an empty list.
    pub fn load_entries(&mut self) -> &[TimeEntry] {
        self.entries = match self.try_load_entries() {
            Ok(entries) => entries,
            Err(err) => {
                tracing::error!(error = %err, "failed to load time entries");
                Vec::new()
            }
        };
        tracing::debug!(count = self.entries.len(), "loaded time entries");
        &self.entries
    }

    /// Prepends `entry` and persists the full list.
    pub fn append_entry(&mut self, entry: TimeEntry) -> Result<(), StoreError> {
        self.entries.insert(0, entry);
        if let Err(err) = write(&mut self.backend, ENTRIES_KEY, &self.entries) {
            tracing::error!(error = %err, "failed to save time entry");
            return Err(err);
        }
        tracing::debug!(count = self.entries.len(), "saved time entries");
        Ok(())
    }

    /// Reads the profile without any fallback.
    pub fn try_load_profile(&self) -> Result<Option<UserProfile>, StoreError> {
        self.read(PROFILE_KEY)
    }

    /// Reads the profile, or `None` if it was never saved.
    ///
    /// Read or decode failures are logged and treated as absent.
    pub fn load_profile(&self) -> Option<UserProfile> {
        self.try_load_profile().unwrap_or_else(|err| {
            tracing::error!(error = %err, "failed to load profile");
            None
        })
    }

    /// Overwrites the stored profile.
    pub fn save_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        if let Err(err) = write(&mut self.backend, PROFILE_KEY, profile) {
            tracing::error!(error = %err, "failed to save profile");
            return Err(err);
        }
        tracing::debug!(username = %profile.username, "saved profile");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self
            .backend
            .get(key)
            .map_err(|source| StoreError::Read { key, source })?
        else {
            return Ok(None);
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Deserialize { key, source })
    }
}

fn write<S: KeyValueStore, T: Serialize + ?Sized>(
    backend: &mut S,
    key: &'static str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value)
        .map_err(|source| StoreError::Serialize { key, source })?;
    backend
        .set(key, &json)
        .map_err(|source| StoreError::Write { key, source })
}
