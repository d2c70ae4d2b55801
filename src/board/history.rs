//! Human-readable game log.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// An ordered, append-only log of game events.
///
/// When a cap is set, the oldest entries are evicted first; insertion order
/// of the retained entries is always preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLog {
    entries: VecDeque<String>,
    cap: Option<usize>,
    /// Total entries ever appended, including evicted ones.
    total: usize,
}

impl GameLog {
    pub fn new() -> Self {
        GameLog::default()
    }

    pub fn with_cap(cap: Option<usize>) -> Self {
        GameLog { entries: VecDeque::new(), cap: cap.filter(|&c| c > 0), total: 0 }
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.entries.push_back(entry.into());
        self.total += 1;
        self.evict();
    }

    /// Changes the cap, evicting the oldest entries beyond it.
    pub fn set_cap(&mut self, cap: Option<usize>) {
        self.cap = cap.filter(|&c| c > 0);
        self.evict();
    }

    fn evict(&mut self) {
        if let Some(cap) = self.cap {
            while self.entries.len() > cap {
                self.entries.pop_front();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries appended over the log's lifetime.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    /// Returns the entries appended after the log had `total` entries.
    ///
    /// Entries already evicted by the cap are skipped.
    pub fn since(&self, total: usize) -> impl Iterator<Item = &str> {
        let fresh = self.total.saturating_sub(total).min(self.entries.len());
        self.entries
            .iter()
            .skip(self.entries.len() - fresh)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_insertion_order() {
        let mut log = GameLog::new();
        log.push("a");
        log.push("b");
        log.push("c");
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(log.last(), Some("c"));
    }

    #[test]
    fn cap_evicts_oldest() {
        let mut log = GameLog::with_cap(Some(2));
        for e in ["a", "b", "c"] {
            log.push(e);
        }
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["b", "c"]);
        assert_eq!(log.total(), 3);
    }

    #[test]
    fn since_returns_new_entries() {
        let mut log = GameLog::new();
        log.push("a");
        let mark = log.total();
        log.push("b");
        log.push("c");
        assert_eq!(log.since(mark).collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn lowering_cap_evicts_immediately() {
        let mut log = GameLog::new();
        for e in ["a", "b", "c", "d"] {
            log.push(e);
        }
        log.set_cap(Some(2));
        assert_eq!(log.iter().collect::<Vec<_>>(), vec!["c", "d"]);
        assert_eq!(log.since(3).collect::<Vec<_>>(), vec!["d"]);
        log.set_cap(None);
        log.push("e");
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn zero_cap_means_unbounded() {
        let mut log = GameLog::with_cap(Some(0));
        log.push("a");
        log.push("b");
        assert_eq!(log.len(), 2);
    }
}
