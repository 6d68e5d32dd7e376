//! Wires the timer session to storage and the sync hook.

use tt_core::{
    Clock, SystemClock, TimeEntry, TimerError, TimerSession, TimerState, format_duration,
};
use tt_db::{EntryStore, KeyValueStore};

use crate::sync::SyncHook;

/// Owns the timer session and the entry store for one UI context.
///
/// Storage failures are already logged by [`EntryStore`]; the tracker keeps
/// going with its in-memory state either way.
pub struct Tracker<S, C: Clock = SystemClock> {
    session: TimerSession<C>,
    store: EntryStore<S>,
    sync: Box<dyn SyncHook>,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    /// Creates a tracker and loads the persisted history.
    pub fn new(
        session: TimerSession<C>,
        mut store: EntryStore<S>,
        sync: Box<dyn SyncHook>,
    ) -> Self {
        store.load_entries();
        Self {
            session,
            store,
            sync,
        }
    }

    pub const fn session(&self) -> &TimerSession<C> {
        &self.session
    }

    /// History, newest first.
    pub fn entries(&self) -> &[TimeEntry] {
        self.store.entries()
    }

    /// Elapsed time as `HH:MM:SS`.
    pub fn display(&self) -> String {
        format_duration(self.session.elapsed_secs())
    }

    pub fn start(&mut self) -> Result<(), TimerError> {
        self.session.start()
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        self.session.pause()
    }

    /// Stops the session, records the entry and hands it to the sync hook.
    ///
    /// The hook only sees entries that were saved. The entry is returned even
    /// when saving failed.
    pub fn stop(&mut self) -> Result<TimeEntry, TimerError> {
        let entry = self.session.stop()?;
        if self.store.append_entry(entry.clone()).is_ok() {
            self.sync.sync(&entry);
        } else {
            tracing::warn!(id = %entry.id(), "entry kept in memory only");
        }
        Ok(entry)
    }

    /// Stops the session if one is active.
    pub fn finish(&mut self) -> Option<TimeEntry> {
        if self.session.state() == TimerState::Idle {
            return None;
        }
        self.stop().ok()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chrono::{DateTime, Utc};
    use tt_core::{EntryId, ManualClock, TimerDefaults};
    use tt_db::{ENTRIES_KEY, MemoryStore};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingSync(Rc<RefCell<Vec<EntryId>>>);

    impl SyncHook for RecordingSync {
        fn sync(&self, entry: &TimeEntry) {
            self.0.borrow_mut().push(entry.id().clone());
        }
    }

    fn tracker(
        backend: MemoryStore,
    ) -> (Tracker<MemoryStore, ManualClock>, ManualClock, RecordingSync) {
        let start = DateTime::parse_from_rfc3339("2025-05-05T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = ManualClock::new(start);
        let sync = RecordingSync::default();
        let tracker = Tracker::new(
            TimerSession::with_clock(clock.clone(), TimerDefaults::default()),
            EntryStore::new(backend),
            Box::new(sync.clone()),
        );
        (tracker, clock, sync)
    }

    #[test]
    fn stop_persists_and_syncs() {
        let (mut tracker, clock, sync) = tracker(MemoryStore::new());

        tracker.start().unwrap();
        clock.advance_secs(5);
        assert_eq!(tracker.display(), "00:00:05");
        let entry = tracker.stop().unwrap();

        assert_eq!(entry.duration(), 5);
        assert_eq!(tracker.entries(), vec![entry.clone()]);
        assert_eq!(*sync.0.borrow(), vec![entry.id().clone()]);
        assert_eq!(tracker.display(), "00:00:00");
    }

    #[test]
    fn write_failure_keeps_entry_and_skips_sync() {
        let mut backend = MemoryStore::new();
        backend.set_fail_writes(true);
        let (mut tracker, clock, sync) = tracker(backend);

        tracker.start().unwrap();
        clock.advance_secs(3);
        let entry = tracker.stop().unwrap();

        assert_eq!(tracker.entries(), vec![entry]);
        assert!(sync.0.borrow().is_empty());
        assert_eq!(tracker.session().state(), TimerState::Idle);
    }

    #[test]
    fn loads_existing_history() {
        let old = TimeEntry::new("Earlier", None, Utc::now(), 60);
        let mut backend = MemoryStore::new();
        backend
            .set(ENTRIES_KEY, &serde_json::to_string(&[&old]).unwrap())
            .unwrap();

        let (mut tracker, _clock, _sync) = tracker(backend);
        assert_eq!(tracker.entries(), vec![old.clone()]);

        tracker.start().unwrap();
        let new = tracker.stop().unwrap();
        assert_eq!(tracker.entries(), vec![new, old]);
    }

    #[test]
    fn finish_only_stops_active_sessions() {
        let (mut tracker, clock, _sync) = tracker(MemoryStore::new());
        assert!(tracker.finish().is_none());

        tracker.start().unwrap();
        clock.advance_secs(2);
        tracker.pause().unwrap();
        let entry = tracker.finish().unwrap();
        assert_eq!(entry.duration(), 2);
    }
}
