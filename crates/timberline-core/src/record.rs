//! Domain types for timberline
//!
//! A record is one structured log entry as produced by the emitting
//! application. All fields are strings on the wire.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// One structured log entry
///
/// Missing fields decode as empty strings rather than failing the record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogRecord {
    pub time: String,
    pub level: String,
    pub prefix: String,
    pub file: String,
    pub line: String,
    pub message: String,
}

impl LogRecord {
    /// Display timestamp in HH:MM:SS, derived from the RFC3339 wire `time`.
    ///
    /// An unparsable timestamp yields an empty string; the record is still
    /// shown with a blank time cell.
    pub fn display_time(&self) -> String {
        DateTime::parse_from_rfc3339(&self.time)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_default()
    }

    /// Classify the freeform `level` field for row coloring.
    pub fn severity(&self) -> Severity {
        Severity::from_level(&self.level)
    }
}

/// Log severity classified from the freeform level string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warn,
    Info,
    Debug,
    Unknown,
}

impl Severity {
    /// Case-insensitive substring classification
    pub fn from_level(level: &str) -> Self {
        let lower = level.to_lowercase();
        if lower.contains("error") || lower.contains("err") {
            Severity::Error
        } else if lower.contains("warn") {
            Severity::Warn
        } else if lower.contains("info") {
            Severity::Info
        } else if lower.contains("debug") || lower.contains("trace") {
            Severity::Debug
        } else {
            Severity::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_time_formats_rfc3339() {
        let record = LogRecord {
            time: "2024-01-15T10:30:45Z".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_time(), "10:30:45");
    }

    #[test]
    fn display_time_keeps_wire_offset() {
        let record = LogRecord {
            time: "2024-01-15T10:30:45+02:00".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_time(), "10:30:45");
    }

    #[test]
    fn display_time_empty_on_unparsable() {
        let record = LogRecord {
            time: "not a timestamp".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_time(), "");
    }

    #[test]
    fn severity_classifies_common_levels() {
        assert_eq!(Severity::from_level("ERROR"), Severity::Error);
        assert_eq!(Severity::from_level("err"), Severity::Error);
        assert_eq!(Severity::from_level("WARN"), Severity::Warn);
        assert_eq!(Severity::from_level("Info"), Severity::Info);
        assert_eq!(Severity::from_level("debug"), Severity::Debug);
        assert_eq!(Severity::from_level("TRACE"), Severity::Debug);
        assert_eq!(Severity::from_level("notice"), Severity::Unknown);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let record: LogRecord = serde_json::from_str(r#"{"level":"INFO"}"#).unwrap();
        assert_eq!(record.level, "INFO");
        assert_eq!(record.message, "");
        assert_eq!(record.time, "");
    }
}
