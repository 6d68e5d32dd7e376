//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Manual stopwatch time tracker.
///
/// Time work sessions with start/pause/stop and keep a local history of them.
#[derive(Debug, Parser)]
#[command(name = "tt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive timer (commands: start, pause, stop, status, quit).
    Run,

    /// List recorded time entries, newest first.
    Entries {
        /// Output the stored JSON list.
        #[arg(long)]
        json: bool,
    },

    /// Show or edit the user profile.
    #[command(subcommand)]
    Profile(ProfileAction),

    /// Show storage location and totals.
    Status,
}

/// Profile subcommands.
#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    /// Show the saved profile.
    Show,

    /// Update profile fields and save.
    ///
    /// Fields that are not given keep their saved value.
    Set {
        #[arg(long)]
        username: Option<String>,

        /// Email address (pass an empty string to clear).
        #[arg(long)]
        email: Option<String>,

        /// Company (pass an empty string to clear).
        #[arg(long)]
        company: Option<String>,
    },
}
