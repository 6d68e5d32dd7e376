//! Hook for pushing completed entries to an external sheet.

use tt_core::TimeEntry;

/// Receives each entry after it has been saved locally.
pub trait SyncHook {
    fn sync(&self, entry: &TimeEntry);
}

/// Default hook: no remote integration yet, the entry is only logged.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSync;

impl SyncHook for LogSync {
    fn sync(&self, entry: &TimeEntry) {
        tracing::info!(
            id = %entry.id(),
            task = entry.task_name(),
            duration = entry.duration(),
            "syncing entry with external sheet"
        );
    }
}
