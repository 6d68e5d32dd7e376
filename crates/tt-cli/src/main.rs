use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tt_cli::commands::profile::ProfileChanges;
use tt_cli::commands::{entries, profile, run, status};
use tt_cli::{Cli, Commands, Config, LogSync, ProfileAction, Tracker};
use tt_core::{SystemClock, TimerSession};
use tt_db::{Database, EntryStore};

/// Load config and open the store, ensuring the parent directory exists.
fn open_store(config_path: Option<&Path>) -> Result<(EntryStore<Database>, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    Ok((EntryStore::new(db), config))
}

fn run_interactive(store: EntryStore<Database>, config: &Config) -> Result<()> {
    let session = TimerSession::with_clock(SystemClock::new(), config.timer_defaults());
    let mut tracker = Tracker::new(session, store, Box::new(LogSync));

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;
    runtime.block_on(async {
        let input = tokio::io::BufReader::new(tokio::io::stdin());
        let mut out = std::io::stdout().lock();
        run::run(&mut tracker, input, &mut out).await
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Commands::Run) => {
            let (store, config) = open_store(cli.config.as_deref())?;
            run_interactive(store, &config)?;
        }
        Some(Commands::Entries { json }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            entries::run(&mut stdout, &mut store, *json)?;
        }
        Some(Commands::Profile(action)) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            match action {
                ProfileAction::Show => profile::show(&mut stdout, &store)?,
                ProfileAction::Set {
                    username,
                    email,
                    company,
                } => {
                    let changes = ProfileChanges {
                        username: username.clone(),
                        email: email.clone(),
                        company: company.clone(),
                    };
                    profile::set(&mut stdout, &mut store, changes)?;
                }
            }
        }
        Some(Commands::Status) => {
            let (mut store, config) = open_store(cli.config.as_deref())?;
            status::run(&mut stdout, &mut store, &config.database_path)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
