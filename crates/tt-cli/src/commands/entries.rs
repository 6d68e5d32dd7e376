//! Entries command for listing the recorded history.

use std::io::Write;

use anyhow::Result;
use tt_core::format_duration;
use tt_db::{EntryStore, KeyValueStore};

use super::util::entry_label;

/// Prints entries newest first, or the stored JSON list with `json`.
pub fn run<S: KeyValueStore, W: Write>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    json: bool,
) -> Result<()> {
    let entries = store.load_entries();

    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(entries)?)?;
        return Ok(());
    }

    writeln!(writer, "Recent Time Entries")?;
    if entries.is_empty() {
        writeln!(writer, "No entries recorded.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(
            writer,
            "- {}  {}  {}",
            entry_label(entry),
            format_duration(entry.duration()),
            entry.display_date()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use tt_core::{EntryId, TimeEntry};
    use tt_db::MemoryStore;

    use super::*;

    fn entry(id: &str, task: &str, project: Option<&str>, duration: u64) -> TimeEntry {
        let end = DateTime::parse_from_rfc3339("2025-07-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        TimeEntry::with_id(
            EntryId::new(id).unwrap(),
            task,
            project.map(String::from),
            end,
            duration,
        )
    }

    #[test]
    fn empty_history() {
        let mut store = EntryStore::new(MemoryStore::new());
        let mut output = Vec::new();

        run(&mut output, &mut store, false).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Recent Time Entries\nNo entries recorded.\n"
        );
    }

    #[test]
    fn lists_newest_first() {
        let mut store = EntryStore::new(MemoryStore::new());
        let first = entry("1", "Write report", Some("Acme"), 3725);
        let second = entry("2", "Standup", None, 900);
        store.append_entry(first.clone()).unwrap();
        store.append_entry(second.clone()).unwrap();
        let mut output = Vec::new();

        run(&mut output, &mut store, false).unwrap();

        let expected = format!(
            "Recent Time Entries\n- Standup  00:15:00  {}\n- Write report (Acme)  01:02:05  {}\n",
            second.display_date(),
            first.display_date()
        );
        assert_eq!(String::from_utf8(output).unwrap(), expected);
    }

    #[test]
    fn json_output_matches_stored_layout() {
        let mut store = EntryStore::new(MemoryStore::new());
        store
            .append_entry(entry("1", "Write report", Some("Acme"), 60))
            .unwrap();
        let mut output = Vec::new();

        run(&mut output, &mut store, true).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["taskName"], "Write report");
        assert_eq!(value[0]["startTime"], "2025-07-10T11:59:00Z");
        assert_eq!(value[0]["duration"], 60);
    }
}
