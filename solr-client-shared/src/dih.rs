//! Data Import Handler (DIH) command responses.
//!
//! The import handler's reply shape depends on the job state, so every
//! section here defaults to empty rather than being optional.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::response::ResponseHeader;

const STARTED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// State of the import job as reported in the `status` field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DihStatus {
    /// No import is running.
    Idle,
    /// An import is in progress.
    Busy,
    /// Any other value, kept verbatim. Empty when the engine sent none.
    Unknown(String),
    #[default]
    Missing,
}

impl DihStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => Self::Missing,
            s if s.eq_ignore_ascii_case("idle") => Self::Idle,
            s if s.eq_ignore_ascii_case("busy") => Self::Busy,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, Self::Busy)
    }
}

/// The `statusMessages` block: free-form counters and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DihStatusMessages {
    pub entries: Vec<(String, String)>,
}

impl DihStatusMessages {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn counter(&self, name: &str) -> Option<u64> {
        self.get(name).and_then(|v| v.trim().parse().ok())
    }

    pub fn total_requests_made(&self) -> Option<u64> {
        self.counter("Total Requests made to DataSource")
    }

    pub fn total_rows_fetched(&self) -> Option<u64> {
        self.counter("Total Rows Fetched")
    }

    pub fn total_documents_processed(&self) -> Option<u64> {
        self.counter("Total Documents Processed")
    }

    pub fn total_documents_skipped(&self) -> Option<u64> {
        self.counter("Total Documents Skipped")
    }

    /// `Time Elapsed` while running, `Time taken` once finished.
    pub fn elapsed(&self) -> Option<&str> {
        self.get("Time Elapsed").or_else(|| self.get("Time taken"))
    }

    /// When the full or delta dump started, if reported.
    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.entries
            .iter()
            .find(|(key, _)| key.to_ascii_lowercase().ends_with("dump started"))
            .and_then(|(_, value)| {
                NaiveDateTime::parse_from_str(value.trim(), STARTED_AT_FORMAT).ok()
            })
    }

    /// The unnamed summary line the handler writes when a job completes.
    pub fn summary(&self) -> Option<&str> {
        self.get("")
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The `initArgs` block: the handler's configured defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DihInitArgs {
    pub defaults: Vec<(String, String)>,
}

impl DihInitArgs {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.defaults
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The data-config file the handler was configured with.
    pub fn config(&self) -> Option<&str> {
        self.get("config")
    }
}

/// Response to a DIH command such as `delta-import` or `status`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DihCommandResponse {
    pub header: ResponseHeader,
    /// Echo of the command that was executed.
    pub command: String,
    pub status: DihStatus,
    /// Human-readable outcome, e.g. "A command is still running...".
    pub import_response: String,
    pub status_messages: DihStatusMessages,
    pub init_args: DihInitArgs,
    /// The undecoded payload as received.
    pub raw_body: String,
}
