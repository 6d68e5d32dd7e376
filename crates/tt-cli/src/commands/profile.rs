//! Profile commands for viewing and editing the user profile.

use std::io::Write;

use anyhow::Result;
use tt_core::UserProfile;
use tt_db::{EntryStore, KeyValueStore};

/// Field edits from the command line. `None` leaves a field unchanged.
#[derive(Debug, Default, Clone)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl ProfileChanges {
    /// Applies the edits on top of `profile`.
    pub fn apply(self, profile: UserProfile) -> UserProfile {
        UserProfile {
            username: self.username.unwrap_or(profile.username),
            email: self.email.or(profile.email),
            company: self.company.or(profile.company),
        }
        .normalized()
    }
}

/// Prints the greeting and the saved fields.
pub fn show<S: KeyValueStore, W: Write>(writer: &mut W, store: &EntryStore<S>) -> Result<()> {
    let profile = store.load_profile().unwrap_or_default();
    write_profile(writer, &profile)
}

/// Edits the saved profile and writes it back.
///
/// A failed save is logged and the edited profile is still shown.
pub fn set<S: KeyValueStore, W: Write>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    changes: ProfileChanges,
) -> Result<()> {
    let profile = changes.apply(store.load_profile().unwrap_or_default());
    if store.save_profile(&profile).is_err() {
        writeln!(writer, "Profile not saved.")?;
    }
    write_profile(writer, &profile)
}

fn write_profile<W: Write>(writer: &mut W, profile: &UserProfile) -> Result<()> {
    writeln!(writer, "{}", profile.greeting())?;
    let username = if profile.is_created() {
        profile.username.as_str()
    } else {
        "-"
    };
    writeln!(writer, "Username: {username}")?;
    writeln!(writer, "Email:    {}", profile.email.as_deref().unwrap_or("-"))?;
    writeln!(writer, "Company:  {}", profile.company.as_deref().unwrap_or("-"))?;
    Ok(())
}
