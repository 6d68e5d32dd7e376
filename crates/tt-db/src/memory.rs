//! In-memory key-value store.

use std::collections::HashMap;

use crate::{BackendError, KeyValueStore};

/// A `HashMap`-backed [`KeyValueStore`].
///
/// Reads and writes can be made to fail on demand, which lets tests exercise
/// the log-and-continue paths of [`crate::EntryStore`].
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `get` fail.
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Makes every subsequent `set` fail.
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, BackendError> {
        if self.fail_reads {
            return Err(BackendError::Unavailable(format!("read of {key} refused")));
        }
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), BackendError> {
        if self.fail_writes {
            return Err(BackendError::Unavailable(format!("write of {key} refused")));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
