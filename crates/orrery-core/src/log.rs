//! Bounded, player-facing action log.

use std::collections::VecDeque;

use orrery_types::LogEntry;
use serde::{Deserialize, Serialize};

/// Most recent log entries, oldest first. Once `capacity` is reached the
/// oldest entry is dropped for each new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLog {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl ActionLog {
    /// An empty log holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Append a message stamped with `day`.
    pub fn push(&mut self, day: u64, message: impl Into<String>) {
        while self.entries.len() >= self.capacity.max(1) {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            day,
            message: message.into(),
        });
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// The newest entry.
    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of entries held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries kept.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn log_drops_oldest_when_full() {
        let mut log = ActionLog::new(2);
        log.push(1, "first");
        log.push(2, "second");
        log.push(3, "third");
        let messages: Vec<&str> = log.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "third"]);
        assert_eq!(log.latest().map(|e| e.day), Some(3));
    }

    #[test]
    fn zero_capacity_still_keeps_latest() {
        let mut log = ActionLog::new(0);
        log.push(1, "a");
        log.push(2, "b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.capacity(), 1);
    }

    #[test]
    fn deserialized_zero_capacity_does_not_stall_push() {
        let mut log: ActionLog =
            serde_json::from_value(serde_json::json!({ "capacity": 0, "entries": [] })).unwrap();
        log.push(1, "a");
        log.push(2, "b");
        assert_eq!(log.len(), 1);
        assert_eq!(log.latest().map(|e| e.day), Some(2));
    }
}
