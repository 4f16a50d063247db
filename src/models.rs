// src/models.rs

use crate::pagination::ViewWindow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stored log record as served by `GET /logs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub key: String,
    pub message: String,
    pub environment: String,
    pub app_version: String,
    pub device_name: String,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl LogEntry {
    /// One-line heading used by the list view.
    pub fn title(&self) -> String {
        format!(
            "[{}] {} - {}@{} v{}",
            self.key,
            self.created_at.format("%Y-%m-%d %H:%M:%S"),
            self.device_name,
            self.environment,
            self.app_version
        )
    }

    pub fn description(&self) -> &str {
        &self.message
    }

    /// The text a list filter is matched against.
    pub fn filter_value(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}: {}",
            self.environment, self.app_version, self.device_name, self.key, self.message
        )
    }
}

/// Body of `POST /logs`. Timestamps are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewLogEntry {
    pub key: String,
    pub message: String,
    pub environment: String,
    pub app_version: String,
    pub device_name: String,
}

impl fmt::Display for NewLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}: {}",
            self.environment, self.app_version, self.device_name, self.key, self.message
        )
    }
}

/// One successful fetch: the records returned for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub window: ViewWindow,
    pub records: Vec<LogEntry>,
}

impl Page {
    pub fn new(window: ViewWindow, records: Vec<LogEntry>) -> Self {
        Self { window, records }
    }

    pub fn offset(&self) -> usize {
        self.window.offset
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// RFC 7807 style error body returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            kind: "/errors#bad-request".to_string(),
            title: "Bad Request".to_string(),
            status: 400,
            detail: detail.into(),
        }
    }

    pub fn internal_server_error(detail: impl Into<String>) -> Self {
        Self {
            kind: "/errors#internal-server-error".to_string(),
            title: "Internal Server Error".to_string(),
            status: 500,
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> LogEntry {
        LogEntry {
            key: "auth".to_string(),
            message: "token expired".to_string(),
            environment: "prod".to_string(),
            app_version: "1.2.0".to_string(),
            device_name: "pixel".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_display_and_title() {
        let e = entry();
        assert_eq!(e.to_string(), "[prod] 1.2.0 pixel auth: token expired");
        assert_eq!(e.title(), "[auth] 2024-03-01 12:30:00 - pixel@prod v1.2.0");
        assert_eq!(e.filter_value(), e.to_string());
    }

    #[test]
    fn test_decodes_wire_field_names() {
        let body = r#"[{
            "key": "k",
            "message": "m",
            "environment": "dev",
            "app_version": "0.1",
            "device_name": "laptop",
            "created_at": "2024-03-01T12:30:00Z",
            "updated_at": "2024-03-01T12:31:00Z"
        }]"#;
        let entries: Vec<LogEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].device_name, "laptop");
        assert_eq!(
            entries[0].updated_at,
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 31, 0).unwrap()
        );
    }

    #[test]
    fn test_new_entry_fields_default_to_empty() {
        let entry: NewLogEntry = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(entry.message, "hi");
        assert!(entry.key.is_empty());
    }

    #[test]
    fn test_problem_details_type_field() {
        let json = serde_json::to_value(ProblemDetails::bad_request("Invalid JSON format")).unwrap();
        assert_eq!(json["type"], "/errors#bad-request");
        assert_eq!(json["status"], 400);
    }
}
