//! The stopwatch state machine.
//!
//! A [`TimerSession`] moves between [`TimerState::Idle`], [`TimerState::Running`]
//! and [`TimerState::Paused`]. Elapsed time is measured against the session's
//! [`Clock`] rather than by counting ticks, so whatever drives the display can
//! fire late or not at all without changing the recorded duration.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::entry::TimeEntry;

/// Task label assigned when a session starts from idle.
pub const DEFAULT_TASK_NAME: &str = "New Task";

/// Project label assigned when a session starts from idle.
pub const DEFAULT_PROJECT_NAME: &str = "Default Project";

/// Where the timer currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

impl TimerState {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from timer transitions.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    /// The action is not allowed from the current state.
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: TimerState,
    },
}

/// Labels given to a session that starts without user input.
///
/// Starting never prompts for a task or project; these values are used
/// instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerDefaults {
    pub task_name: String,
    pub project_name: String,
}

impl Default for TimerDefaults {
    fn default() -> Self {
        Self {
            task_name: DEFAULT_TASK_NAME.to_string(),
            project_name: DEFAULT_PROJECT_NAME.to_string(),
        }
    }
}

/// Tracks elapsed whole seconds for one work session at a time.
#[derive(Debug)]
pub struct TimerSession<C: Clock = SystemClock> {
    clock: C,
    defaults: TimerDefaults,
    state: TimerState,
    /// Running time banked by earlier pauses.
    accumulated: Duration,
    /// Monotonic reading taken at the latest start.
    running_since: Option<Duration>,
    task_name: String,
    project_name: String,
}

impl<C: Clock> TimerSession<C> {
    /// Creates an idle session.
    pub fn with_clock(clock: C, defaults: TimerDefaults) -> Self {
        Self {
            clock,
            defaults,
            state: TimerState::Idle,
            accumulated: Duration::ZERO,
            running_since: None,
            task_name: String::new(),
            project_name: String::new(),
        }
    }

    pub const fn state(&self) -> TimerState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, TimerState::Running)
    }

    /// Current task label. Empty while idle.
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Current project label. Empty while idle.
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    /// Total running time so far, excluding paused intervals.
    pub fn elapsed(&self) -> Duration {
        let live = self.running_since.map_or(Duration::ZERO, |since| {
            self.clock.monotonic().saturating_sub(since)
        });
        self.accumulated + live
    }

    /// Elapsed whole seconds; what the display shows and what `stop` records.
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    /// Starts or resumes the timer.
    ///
    /// Starting from idle assigns the default task and project labels. Resuming
    /// from paused keeps the current labels and elapsed time.
    pub fn start(&mut self) -> Result<(), TimerError> {
        match self.state {
            TimerState::Running => {
                return Err(TimerError::InvalidTransition {
                    action: "start",
                    state: self.state,
                });
            }
            TimerState::Idle => {
                self.task_name.clone_from(&self.defaults.task_name);
                self.project_name.clone_from(&self.defaults.project_name);
            }
            TimerState::Paused => {}
        }
        self.running_since = Some(self.clock.monotonic());
        self.state = TimerState::Running;
        tracing::debug!(
            task = %self.task_name,
            elapsed = self.elapsed_secs(),
            "timer started"
        );
        Ok(())
    }

    /// Halts the counter, keeping elapsed time and labels.
    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.state != TimerState::Running {
            return Err(TimerError::InvalidTransition {
                action: "pause",
                state: self.state,
            });
        }
        self.accumulated = self.elapsed();
        self.running_since = None;
        self.state = TimerState::Paused;
        tracing::debug!(elapsed = self.elapsed_secs(), "timer paused");
        Ok(())
    }

    /// Ends the session and returns the completed entry.
    ///
    /// The entry ends now and starts `elapsed` seconds earlier. The session is
    /// reset to idle with a zero counter and cleared labels.
    pub fn stop(&mut self) -> Result<TimeEntry, TimerError> {
        if self.state == TimerState::Idle {
            return Err(TimerError::InvalidTransition {
                action: "stop",
                state: self.state,
            });
        }
        let duration = self.elapsed_secs();
        let end_time = self.clock.now();
        let task_name = std::mem::take(&mut self.task_name);
        let project_name =
            Some(std::mem::take(&mut self.project_name)).filter(|p| !p.is_empty());

        self.accumulated = Duration::ZERO;
        self.running_since = None;
        self.state = TimerState::Idle;

        let entry = TimeEntry::new(task_name, project_name, end_time, duration);
        tracing::debug!(id = %entry.id(), duration, "timer stopped");
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};

    use super::*;
    use crate::clock::ManualClock;

    fn session() -> (TimerSession<ManualClock>, ManualClock) {
        let start = DateTime::parse_from_rfc3339("2025-02-03T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let clock = ManualClock::new(start);
        (
            TimerSession::with_clock(clock.clone(), TimerDefaults::default()),
            clock,
        )
    }

    #[test]
    fn start_wait_stop_records_defaults() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance_secs(5);
        let entry = timer.stop().unwrap();

        assert_eq!(entry.duration(), 5);
        assert_eq!(entry.task_name(), "New Task");
        assert_eq!(entry.project_name(), Some("Default Project"));
    }

    #[test]
    fn paused_time_is_excluded() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance_secs(7);
        timer.pause().unwrap();
        clock.advance_secs(100);
        assert_eq!(timer.elapsed_secs(), 7);
        timer.start().unwrap();
        clock.advance_secs(3);
        let entry = timer.stop().unwrap();

        assert_eq!(entry.duration(), 10);
    }

    #[test]
    fn repeated_pauses_sum_running_time() {
        let (mut timer, clock) = session();
        let running_ms = [1_500, 2_250, 3_750];

        for ms in running_ms {
            timer.start().unwrap();
            clock.advance(Duration::from_millis(ms));
            timer.pause().unwrap();
            clock.advance(Duration::from_millis(10_300));
        }
        timer.start().unwrap();
        clock.advance(Duration::from_millis(600));
        let entry = timer.stop().unwrap();

        // 1.5 + 2.25 + 3.75 + 0.6 = 8.1s running
        assert_eq!(entry.duration(), 8);
        assert_eq!((entry.end_time() - entry.start_time()).num_seconds(), 8);
    }

    #[test]
    fn stop_timestamps_span_duration() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance_secs(42);
        timer.pause().unwrap();
        clock.advance_secs(18);
        let entry = timer.stop().unwrap();

        assert_eq!(entry.end_time(), clock.now());
        assert_eq!(
            (entry.end_time() - entry.start_time()).num_seconds(),
            i64::try_from(entry.duration()).unwrap()
        );
    }

    #[test]
    fn partial_seconds_are_truncated_consistently() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance(Duration::from_millis(2_900));
        assert_eq!(timer.elapsed_secs(), 2);
        let entry = timer.stop().unwrap();
        assert_eq!(entry.duration(), 2);
    }

    #[test]
    fn stop_resets_session() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance_secs(3);
        timer.stop().unwrap();

        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.elapsed_secs(), 0);
        assert_eq!(timer.task_name(), "");
        assert_eq!(timer.project_name(), "");
    }

    #[test]
    fn pause_keeps_labels() {
        let (mut timer, _clock) = session();

        timer.start().unwrap();
        timer.pause().unwrap();

        assert_eq!(timer.state(), TimerState::Paused);
        assert_eq!(timer.task_name(), "New Task");
    }

    #[test]
    fn invalid_transitions_leave_state_unchanged() {
        let (mut timer, clock) = session();

        assert_eq!(
            timer.pause(),
            Err(TimerError::InvalidTransition {
                action: "pause",
                state: TimerState::Idle
            })
        );
        assert!(timer.stop().is_err());

        timer.start().unwrap();
        clock.advance_secs(2);
        assert!(timer.start().is_err());
        assert_eq!(timer.state(), TimerState::Running);
        assert_eq!(timer.elapsed_secs(), 2);

        timer.pause().unwrap();
        assert!(timer.pause().is_err());
        assert_eq!(timer.state(), TimerState::Paused);
    }

    #[test]
    fn stop_from_paused_is_allowed() {
        let (mut timer, clock) = session();

        timer.start().unwrap();
        clock.advance_secs(4);
        timer.pause().unwrap();

        let entry = timer.stop().unwrap();
        assert_eq!(entry.duration(), 4);
    }

    #[test]
    fn custom_defaults_are_used() {
        let (_, clock) = session();
        let mut timer = TimerSession::with_clock(
            clock,
            TimerDefaults {
                task_name: "Focus".into(),
                project_name: String::new(),
            },
        );

        timer.start().unwrap();
        let entry = timer.stop().unwrap();

        assert_eq!(entry.task_name(), "Focus");
        assert_eq!(entry.project_name(), None);
    }

    #[test]
    fn consecutive_entries_have_distinct_ids() {
        let (mut timer, _clock) = session();

        timer.start().unwrap();
        let first = timer.stop().unwrap();
        timer.start().unwrap();
        let second = timer.stop().unwrap();

        assert_ne!(first.id(), second.id());
    }
}
