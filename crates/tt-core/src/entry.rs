//! Completed timer sessions.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::types::EntryId;

/// An immutable record of one completed timed work session.
///
/// Field names are serialized in camelCase so stored blobs keep the
/// `taskName`/`startTime` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    id: EntryId,
    task_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project_name: Option<String>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration: u64,
}

impl TimeEntry {
    /// Builds an entry that ended at `end_time` after `duration` seconds.
    ///
    /// `start_time` is derived as `end_time - duration`, so the two timestamps
    /// always differ by exactly the recorded duration.
    pub fn new(
        task_name: impl Into<String>,
        project_name: Option<String>,
        end_time: DateTime<Utc>,
        duration: u64,
    ) -> Self {
        Self::with_id(
            EntryId::generate(),
            task_name,
            project_name,
            end_time,
            duration,
        )
    }

    /// Like [`TimeEntry::new`] with a caller-chosen ID.
    pub fn with_id(
        id: EntryId,
        task_name: impl Into<String>,
        project_name: Option<String>,
        end_time: DateTime<Utc>,
        duration: u64,
    ) -> Self {
        let span = chrono::Duration::seconds(i64::try_from(duration).unwrap_or(i64::MAX));
        let start_time = end_time
            .checked_sub_signed(span)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            id,
            task_name: task_name.into(),
            project_name,
            start_time,
            end_time,
            duration,
        }
    }

    pub const fn id(&self) -> &EntryId {
        &self.id
    }

    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub const fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// Elapsed whole seconds.
    pub const fn duration(&self) -> u64 {
        self.duration
    }

    /// Local calendar date the session started on, as `YYYY-MM-DD`.
    pub fn display_date(&self) -> String {
        self.start_time
            .with_timezone(&Local)
            .format("%Y-%m-%d")
            .to_string()
    }
}

/// Formats seconds as `HH:MM:SS`.
///
/// Hours are not wrapped at 24 and grow past two digits when needed.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn start_time_is_end_minus_duration() {
        let entry = TimeEntry::new(
            "New Task",
            Some("Default Project".into()),
            ts("2025-03-01T10:00:00Z"),
            125,
        );

        assert_eq!(entry.start_time(), ts("2025-03-01T09:57:55Z"));
        assert_eq!((entry.end_time() - entry.start_time()).num_seconds(), 125);
    }

    #[test]
    fn zero_duration_entry_has_equal_timestamps() {
        let entry = TimeEntry::new("", None, ts("2025-03-01T10:00:00Z"), 0);
        assert_eq!(entry.start_time(), entry.end_time());
        assert_eq!(entry.task_name(), "");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let entry = TimeEntry::with_id(
            EntryId::new("entry-1").unwrap(),
            "Write report",
            Some("Acme".into()),
            ts("2025-03-01T10:00:00Z"),
            60,
        );

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "entry-1",
                "taskName": "Write report",
                "projectName": "Acme",
                "startTime": "2025-03-01T09:59:00Z",
                "endTime": "2025-03-01T10:00:00Z",
                "duration": 60
            })
        );
    }

    #[test]
    fn missing_project_is_omitted_and_accepted() {
        let json = r#"{
            "id": "1717171717171",
            "taskName": "Review",
            "startTime": "2024-05-31T15:55:17.171Z",
            "endTime": "2024-05-31T15:56:17.171Z",
            "duration": 60
        }"#;
        let entry: TimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.project_name(), None);

        let out = serde_json::to_string(&entry).unwrap();
        assert!(!out.contains("projectName"));
    }

    #[test]
    fn rejects_negative_duration() {
        let json = r#"{
            "id": "x",
            "taskName": "",
            "startTime": "2024-05-31T15:55:17Z",
            "endTime": "2024-05-31T15:55:17Z",
            "duration": -1
        }"#;
        let result: Result<TimeEntry, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn format_duration_pads_fields() {
        assert_eq!(format_duration(0), "00:00:00");
        assert_eq!(format_duration(5), "00:00:05");
        assert_eq!(format_duration(3661), "01:01:01");
        assert_eq!(format_duration(100 * 3600), "100:00:00");
    }
}
