//! Status command for showing storage location and totals.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tt_core::format_duration;
use tt_db::{EntryStore, KeyValueStore};

pub fn run<S: KeyValueStore, W: Write>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    database_path: &Path,
) -> Result<()> {
    let greeting = store.load_profile().unwrap_or_default().greeting();
    let entries = store.load_entries();
    let total: u64 = entries.iter().map(tt_core::TimeEntry::duration).sum();

    writeln!(writer, "Time tracker status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(writer, "Profile:  {greeting}")?;
    writeln!(writer, "Entries:  {}", entries.len())?;
    writeln!(writer, "Tracked:  {}", format_duration(total))?;

    Ok(())
}
