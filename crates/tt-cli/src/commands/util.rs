//! Shared utilities for CLI commands.

use tt_core::TimeEntry;

/// `task (project)`, or just the task when there is no project.
pub fn entry_label(entry: &TimeEntry) -> String {
    labels(entry.task_name(), entry.project_name())
}

/// Formats a task/project pair the same way entries are shown.
pub fn labels(task: &str, project: Option<&str>) -> String {
    match project {
        Some(project) if !project.is_empty() => format!("{task} ({project})"),
        _ => task.to_string(),
    }
}
