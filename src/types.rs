use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One monitored endpoint. Defined once at startup from config, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Unique, human-readable identifier (e.g. "Sukkur Municipal Corporation").
    pub name: String,
    pub url: String,
}

/// Last known state of a source: digest plus the raw body it was computed from.
/// At most one snapshot exists per source; a new one overwrites the old.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub source: String,
    pub digest: String,
    pub body: String,
    pub captured_at: DateTime<Utc>,
}

/// Emitted when a source's digest differs from the stored baseline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub source: String,
    pub url: String,
    pub detected_at: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn subject(&self) -> String {
        format!("New Tender Alert: {}", self.source)
    }

    pub fn body(&self) -> String {
        format!(
            "A change was detected at {} ({})\n",
            self.url,
            self.detected_at.to_rfc3339()
        )
    }
}
