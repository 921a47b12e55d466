//! Listen attribution counters.
//!
//! Every playthrough of a song or episode is folded into these counters the
//! moment it happens; nothing is stored per event. The counters are keyed by
//! arena id so the catalog itself stays immutable.

use crate::catalog::AudioId;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Default, Clone)]
pub struct ListenCounts {
    total: u64,
    per_user: HashMap<String, u64>,
    unique_listeners: HashSet<String>,
}

impl ListenCounts {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn user_plays(&self, username: &str) -> u64 {
        self.per_user.get(username).copied().unwrap_or(0)
    }

    pub fn unique_listener_count(&self) -> usize {
        self.unique_listeners.len()
    }

    pub fn listeners(&self) -> impl Iterator<Item = &str> {
        self.unique_listeners.iter().map(String::as_str)
    }

    pub fn per_user(&self) -> impl Iterator<Item = (&str, u64)> {
        self.per_user.iter().map(|(u, c)| (u.as_str(), *c))
    }
}

/// Per-item play counters for the whole run.
#[derive(Debug, Default)]
pub struct ListenLedger {
    entries: HashMap<AudioId, ListenCounts>,
}

impl ListenLedger {
    /// Attributes one playthrough of `id` to `username`. Repeated calls
    /// accumulate; there is no dedup.
    pub fn record_play(&mut self, id: AudioId, username: &str) {
        let counts = self.entries.entry(id).or_default();
        counts.total += 1;
        *counts.per_user.entry(username.to_owned()).or_insert(0) += 1;
        counts.unique_listeners.insert(username.to_owned());
    }

    pub fn counts(&self, id: AudioId) -> Option<&ListenCounts> {
        self.entries.get(&id)
    }

    pub fn total_plays(&self, id: AudioId) -> u64 {
        self.counts(id).map(ListenCounts::total).unwrap_or(0)
    }

    pub fn user_plays(&self, id: AudioId, username: &str) -> u64 {
        self.counts(id).map(|c| c.user_plays(username)).unwrap_or(0)
    }

    pub fn unique_listener_count(&self, id: AudioId) -> usize {
        self.counts(id)
            .map(ListenCounts::unique_listener_count)
            .unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AudioId, &ListenCounts)> {
        self.entries.iter().map(|(id, c)| (*id, c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SongId;

    fn song(n: usize) -> AudioId {
        AudioId::Song(SongId(n))
    }

    #[test]
    fn accumulates_plays_per_user() {
        let mut ledger = ListenLedger::default();
        ledger.record_play(song(0), "alice");
        ledger.record_play(song(0), "alice");
        ledger.record_play(song(0), "bob");

        assert_eq!(ledger.total_plays(song(0)), 3);
        assert_eq!(ledger.user_plays(song(0), "alice"), 2);
        assert_eq!(ledger.user_plays(song(0), "bob"), 1);
        assert_eq!(ledger.user_plays(song(0), "carol"), 0);
        assert_eq!(ledger.unique_listener_count(song(0)), 2);
    }

    #[test]
    fn total_equals_sum_of_user_counts() {
        let mut ledger = ListenLedger::default();
        for (user, plays) in [("a", 3u64), ("b", 5), ("c", 1)] {
            for _ in 0..plays {
                ledger.record_play(song(7), user);
            }
        }
        let counts = ledger.counts(song(7)).unwrap();
        let user_sum: u64 = counts.per_user().map(|(_, c)| c).sum();
        assert_eq!(counts.total(), user_sum);
        assert_eq!(counts.unique_listener_count(), 3);
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let ledger = ListenLedger::default();
        assert_eq!(ledger.total_plays(song(42)), 0);
        assert_eq!(ledger.unique_listener_count(song(42)), 0);
    }
}
