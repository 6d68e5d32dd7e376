//! Interactive timer loop.
//!
//! Reads one command per line and redraws the elapsed time once a second
//! while the timer runs. The redraw only reads the session, so a late tick or
//! a slow save never changes what gets recorded.

use std::fmt;
use std::io::Write;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::MissedTickBehavior;
use tt_core::{Clock, TimerState, format_duration};
use tt_db::KeyValueStore;

use super::util::{entry_label, labels};
use crate::tracker::Tracker;

/// A line of input understood by the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerCommand {
    Start,
    Pause,
    Stop,
    Status,
    Quit,
}

/// Input that is not a known command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown command: {} (expected start, pause, stop, status or quit)",
            self.0
        )
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for TrackerCommand {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" | "resume" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "stop" => Ok(Self::Stop),
            "status" => Ok(Self::Status),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(UnknownCommand(other.to_string())),
        }
    }
}

/// Runs the loop until `quit` or end of input.
///
/// A session still active at exit is stopped and recorded, including when
/// the loop ends on a read or write error. That error is returned afterwards.
pub async fn run<S, C, R, W>(tracker: &mut Tracker<S, C>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let outcome = drive(tracker, input, out).await;
    if let Err(err) = &outcome {
        tracing::error!(error = %err, "timer loop ended early");
    }

    if let Some(entry) = tracker.finish() {
        writeln!(
            out,
            "Stopped {}: {}",
            entry_label(&entry),
            format_duration(entry.duration())
        )?;
        out.flush()?;
    }
    outcome
}

async fn drive<S, C, R, W>(tracker: &mut Tracker<S, C>, input: R, out: &mut W) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    writeln!(
        out,
        "{} entries recorded. Type start, pause, stop, status or quit.",
        tracker.entries().len()
    )?;
    out.flush()?;

    loop {
        tokio::select! {
            biased;
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read command")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<TrackerCommand>() {
                    Ok(TrackerCommand::Quit) => break,
                    Ok(command) => apply(tracker, command, out)?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            _ = ticker.tick(), if tracker.session().is_running() => {
                writeln!(out, "{}", tracker.display())?;
            }
        }
        out.flush()?;
    }
    Ok(())
}

/// Applies one command and reports the outcome.
///
/// Rejected transitions are reported and logged; they never end the loop.
pub fn apply<S, C, W>(
    tracker: &mut Tracker<S, C>,
    command: TrackerCommand,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    let resuming = tracker.session().state() == TimerState::Paused;
    let outcome = match command {
        TrackerCommand::Start => tracker.start().map(|()| {
            let session = tracker.session();
            let label = labels(session.task_name(), Some(session.project_name()));
            if resuming {
                format!("Resumed {label} at {}", tracker.display())
            } else {
                format!("Started {label}")
            }
        }),
        TrackerCommand::Pause => tracker
            .pause()
            .map(|()| format!("Paused at {}", tracker.display())),
        TrackerCommand::Stop => tracker.stop().map(|entry| {
            format!(
                "Stopped {}: {}",
                entry_label(&entry),
                format_duration(entry.duration())
            )
        }),
        TrackerCommand::Status => Ok(status_line(tracker)),
        TrackerCommand::Quit => return Ok(()),
    };

    match outcome {
        Ok(message) => writeln!(out, "{message}")?,
        Err(err) => {
            tracing::warn!(error = %err, "rejected timer command");
            writeln!(out, "{err}")?;
        }
    }
    Ok(())
}

fn status_line<S: KeyValueStore, C: Clock>(tracker: &Tracker<S, C>) -> String {
    let session = tracker.session();
    match session.state() {
        TimerState::Idle => format!("idle, {} entries recorded", tracker.entries().len()),
        state => format!(
            "{state} {} {}",
            tracker.display(),
            labels(session.task_name(), Some(session.project_name()))
        ),
    }
}
