//! CLI subcommand implementations.

pub mod entries;
pub mod profile;
pub mod run;
pub mod status;
pub mod util;
