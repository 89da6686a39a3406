//! Per-item answer statistics.
//!
//! The store is treated as a value: `record_outcome` returns a new store and
//! leaves the receiver untouched.

use crate::types::Outcome;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed counts for one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsEntry {
    pub correct: u32,
    pub wrong: u32,
    /// Milliseconds since the Unix epoch.
    pub last_seen_at: i64,
}

impl StatsEntry {
    pub fn attempts(&self) -> u64 {
        u64::from(self.correct) + u64::from(self.wrong)
    }
}

/// Mapping of item id to its statistics. Absent ids have never been answered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatisticsStore {
    entries: BTreeMap<String, StatsEntry>,
}

impl StatisticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&StatsEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StatsEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }

    /// Return a copy of the store with one more outcome recorded for `id`.
    pub fn record_outcome(&self, id: &str, outcome: Outcome, now: DateTime<Utc>) -> Self {
        let mut next = self.clone();
        let entry = next.entries.entry(id.to_string()).or_default();
        match outcome {
            Outcome::Correct => entry.correct = entry.correct.saturating_add(1),
            Outcome::Wrong => entry.wrong = entry.wrong.saturating_add(1),
        }
        entry.last_seen_at = now.timestamp_millis();
        next
    }

    /// An empty store; all progress is discarded.
    pub fn reset(&self) -> Self {
        Self::new()
    }
}

impl FromIterator<(String, StatsEntry)> for StatisticsStore {
    fn from_iter<I: IntoIterator<Item = (String, StatsEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mastery::mastery_score;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn first_outcome_creates_entry() {
        let store = StatisticsStore::new().record_outcome("ka", Outcome::Correct, at(1_000));
        assert_eq!(
            store.get("ka"),
            Some(&StatsEntry { correct: 1, wrong: 0, last_seen_at: 1_000 })
        );
    }

    #[test]
    fn record_is_additive_and_isolated() {
        let base: StatisticsStore = [
            ("ka".to_string(), StatsEntry { correct: 2, wrong: 1, last_seen_at: 10 }),
            ("ki".to_string(), StatsEntry { correct: 0, wrong: 3, last_seen_at: 20 }),
        ]
        .into_iter()
        .collect();

        let next = base.record_outcome("ka", Outcome::Correct, at(99));

        assert_eq!(next.get("ki"), base.get("ki"));
        assert_eq!(
            next.get("ka"),
            Some(&StatsEntry { correct: 3, wrong: 1, last_seen_at: 99 })
        );
        // input untouched
        assert_eq!(base.get("ka").unwrap().correct, 2);
    }

    #[test]
    fn attempts_do_not_overflow_at_max_counts() {
        let entry = StatsEntry { correct: u32::MAX, wrong: u32::MAX, last_seen_at: 0 };
        assert_eq!(entry.attempts(), 2 * u64::from(u32::MAX));
    }

    #[test]
    fn wrong_outcome_increments_wrong_only() {
        let store = StatisticsStore::new()
            .record_outcome("su", Outcome::Wrong, at(5))
            .record_outcome("su", Outcome::Wrong, at(6));
        let entry = store.get("su").unwrap();
        assert_eq!((entry.correct, entry.wrong, entry.last_seen_at), (0, 2, 6));
    }

    #[test]
    fn reset_clears_every_entry() {
        let ids = ["a", "i", "u", "e", "o"];
        let store = ids.iter().fold(StatisticsStore::new(), |s, id| {
            s.record_outcome(id, Outcome::Correct, at(1))
        });
        assert_eq!(store.len(), 5);

        let cleared = store.reset();
        assert!(cleared.is_empty());
        for id in ids {
            assert_eq!(mastery_score(cleared.get(id)), 0.0);
        }
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let store = StatisticsStore::new().record_outcome("ka", Outcome::Wrong, at(42));
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"ka":{"correct":0,"wrong":1,"lastSeenAt":42}}"#);

        let back: StatisticsStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, store);
    }
}
