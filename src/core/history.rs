//! Transition history tracking.
//!
//! Every committed transition is recorded with its property, the value pair,
//! and a timestamp. The log is immutable: `record` returns a new log with
//! the entry appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of one committed transition on a managed field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// The managed field that changed
    pub property: String,
    /// The value being transitioned from
    pub from: String,
    /// The value being transitioned to
    pub to: String,
    /// When the transition committed
    pub timestamp: DateTime<Utc>,
}

impl TransitionRecord {
    /// Create a record stamped with the current time.
    pub fn now(
        property: impl Into<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            from: from.into(),
            to: to.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered history of committed transitions across all managed fields of
/// one machine instance.
///
/// # Example
///
/// ```rust
/// use statefield::{TransitionLog, TransitionRecord};
///
/// let log = TransitionLog::new();
/// let log = log.record(TransitionRecord::now("state", "default", "working"));
/// let log = log.record(TransitionRecord::now("state", "working", "waiting"));
///
/// assert_eq!(log.path("state"), ["default", "working", "waiting"]);
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransitionLog {
    records: Vec<TransitionRecord>,
}

impl TransitionLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Append a record, returning a new log. The original is unchanged.
    pub fn record(&self, record: TransitionRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// All recorded transitions in commit order.
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    /// The sequence of values one property passed through: the first
    /// recorded `from`, then each `to`. Empty if the property never moved.
    pub fn path(&self, property: &str) -> Vec<&str> {
        let mut path = Vec::new();
        for record in self.records.iter().filter(|r| r.property == property) {
            if path.is_empty() {
                path.push(record.from.as_str());
            }
            path.push(record.to.as_str());
        }
        path
    }

    /// Duration between the first and last recorded transition, `None` if
    /// the log is empty.
    pub fn duration(&self) -> Option<Duration> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => last
                .timestamp
                .signed_duration_since(first.timestamp)
                .to_std()
                .ok(),
            _ => None,
        }
    }
}
