//! Core domain logic for the time tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Timer sessions: start/pause/stop and elapsed-time accounting
//! - Time entries: the immutable record a stopped session produces
//! - The user profile singleton

pub mod clock;
pub mod entry;
pub mod profile;
pub mod timer;
pub mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{TimeEntry, format_duration};
pub use profile::UserProfile;
pub use timer::{TimerDefaults, TimerError, TimerSession, TimerState};
pub use types::{EntryId, ValidationError};
