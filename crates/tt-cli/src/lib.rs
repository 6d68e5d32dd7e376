//! Time tracker CLI library.
//!
//! This crate provides the CLI interface for the time tracker.

mod cli;
pub mod commands;
mod config;
pub mod sync;
pub mod tracker;

pub use cli::{Cli, Commands, ProfileAction};
pub use config::Config;
pub use sync::{LogSync, SyncHook};
pub use tracker::Tracker;
