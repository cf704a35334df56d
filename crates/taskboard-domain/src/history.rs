//! Per-card activity history.
//!
//! Append-only: entries are never edited or removed. Storage keeps insertion
//! order; displays read it newest-first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::card::CardId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(action: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            action: action.into(),
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: BTreeMap<CardId, Vec<HistoryEntry>>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(
        &mut self,
        card_id: CardId,
        action: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> &HistoryEntry {
        let log = self.entries.entry(card_id).or_default();
        log.push(HistoryEntry::new(action, timestamp));
        &log[log.len() - 1]
    }

    /// Entries in insertion order.
    pub fn entries(&self, card_id: CardId) -> &[HistoryEntry] {
        self.entries
            .get(&card_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn newest_first(&self, card_id: CardId) -> Vec<&HistoryEntry> {
        self.entries(card_id).iter().rev().collect()
    }

    pub fn len(&self, card_id: CardId) -> usize {
        self.entries(card_id).len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_append_keeps_insertion_order() {
        let mut log = HistoryLog::new();
        log.append(1, "started", at(0));
        log.append(1, "paused", at(5));
        log.append(2, "started", at(6));

        let actions: Vec<_> = log.entries(1).iter().map(|e| e.action.as_str()).collect();
        assert_eq!(actions, vec!["started", "paused"]);
        assert_eq!(log.len(2), 1);
    }

    #[test]
    fn test_newest_first_does_not_reorder_storage() {
        let mut log = HistoryLog::new();
        log.append(4, "first", at(0));
        log.append(4, "second", at(1));

        let newest: Vec<_> = log.newest_first(4).iter().map(|e| e.action.as_str()).collect();
        assert_eq!(newest, vec!["second", "first"]);
        assert_eq!(log.entries(4)[0].action, "first");
    }

    #[test]
    fn test_entry_ids_are_unique() {
        let mut log = HistoryLog::new();
        let a = log.append(1, "x", at(0)).id.clone();
        let b = log.append(1, "x", at(0)).id.clone();
        assert_ne!(a, b);
    }

    #[test]
    fn test_unknown_card_has_empty_history() {
        let log = HistoryLog::new();
        assert!(log.entries(42).is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn test_serializes_as_card_keyed_map() {
        let mut log = HistoryLog::new();
        log.append(9, "moved from todo to doing", at(0));
        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["9"][0]["action"], "moved from todo to doing");

        let restored: HistoryLog = serde_json::from_value(json).unwrap();
        assert_eq!(restored, log);
    }
}
