//! Per-artist revenue accounting and the end-of-run monetization report.

use serde::Serialize;
use std::collections::HashMap;

const NO_PROFITABLE_SONG: &str = "N/A";

#[derive(Debug, Default, Clone)]
struct ArtistLedger {
    song_revenue: f64,
    merch_revenue: f64,
    /// Revenue each of this artist's songs generated, by song name.
    per_song: HashMap<String, f64>,
}

impl ArtistLedger {
    fn total(&self) -> f64 {
        self.song_revenue + self.merch_revenue
    }

    /// Highest-revenue song name, ties broken lexicographically ascending.
    fn most_profitable_song(&self) -> String {
        if self.song_revenue == 0.0 {
            return NO_PROFITABLE_SONG.to_owned();
        }
        let mut best: Option<(&str, f64)> = None;
        for (name, revenue) in &self.per_song {
            let better = match best {
                None => true,
                Some((best_name, best_revenue)) => {
                    *revenue > best_revenue
                        || (*revenue == best_revenue && name.as_str() < best_name)
                }
            };
            if better {
                best = Some((name, *revenue));
            }
        }
        best.map(|(name, _)| name.to_owned())
            .unwrap_or_else(|| NO_PROFITABLE_SONG.to_owned())
    }
}

/// One artist's entry in the end-of-run report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ArtistRevenueReport {
    #[serde(rename = "merchRevenue")]
    pub merch_revenue: f64,
    #[serde(rename = "songRevenue")]
    pub song_revenue: f64,
    /// 1-based position by total revenue descending, name ascending on ties.
    pub ranking: usize,
    #[serde(rename = "mostProfitableSong")]
    pub most_profitable_song: String,
}

/// Accumulates revenue for every artist that monetized anything during the
/// run, either through listen distributions or merch sales.
#[derive(Debug, Default)]
pub struct RevenueLedger {
    artists: HashMap<String, ArtistLedger>,
}

impl RevenueLedger {
    /// Splits `pool` evenly across `plays` and credits each share to the
    /// owning artist and to that artist's per-song revenue map. Each element
    /// of `plays` is one playthrough as `(artist, song name)`; duplicates
    /// count once per play. Empty `plays` is a no-op.
    pub fn distribute(&mut self, plays: &[(String, String)], pool: f64) {
        if plays.is_empty() {
            return;
        }
        let share = pool / plays.len() as f64;
        for (artist, song) in plays {
            let ledger = self.artists.entry(artist.clone()).or_default();
            ledger.song_revenue += share;
            *ledger.per_song.entry(song.clone()).or_insert(0.0) += share;
        }
    }

    pub fn record_merch_sale(&mut self, artist: &str, price: f64) {
        self.artists.entry(artist.to_owned()).or_default().merch_revenue += price;
    }

    pub fn song_revenue(&self, artist: &str) -> f64 {
        self.artists.get(artist).map(|a| a.song_revenue).unwrap_or(0.0)
    }

    pub fn merch_revenue(&self, artist: &str) -> f64 {
        self.artists
            .get(artist)
            .map(|a| a.merch_revenue)
            .unwrap_or(0.0)
    }

    pub fn most_profitable_song(&self, artist: &str) -> String {
        self.artists
            .get(artist)
            .map(ArtistLedger::most_profitable_song)
            .unwrap_or_else(|| NO_PROFITABLE_SONG.to_owned())
    }

    /// End-of-run ranking of every monetized artist, ordered by total revenue
    /// descending with ties broken by name ascending. Revenues are rounded to
    /// two decimals in the report.
    pub fn report(&self) -> Vec<(String, ArtistRevenueReport)> {
        let mut ranked: Vec<(&String, &ArtistLedger)> = self.artists.iter().collect();
        ranked.sort_by(|(name_a, a), (name_b, b)| {
            b.total()
                .partial_cmp(&a.total())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| name_a.cmp(name_b))
        });
        ranked
            .into_iter()
            .enumerate()
            .map(|(position, (name, ledger))| {
                (
                    name.clone(),
                    ArtistRevenueReport {
                        merch_revenue: round2(ledger.merch_revenue),
                        song_revenue: round2(ledger.song_revenue),
                        ranking: position + 1,
                        most_profitable_song: ledger.most_profitable_song(),
                    },
                )
            })
            .collect()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plays(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(a, s)| ((*a).to_owned(), (*s).to_owned()))
            .collect()
    }

    #[test]
    fn splits_pool_evenly_and_conserves_it() {
        let mut ledger = RevenueLedger::default();
        ledger.distribute(
            &plays(&[("A", "s1"), ("A", "s2"), ("B", "s3"), ("B", "s3")]),
            100.0,
        );
        assert!((ledger.song_revenue("A") - 50.0).abs() < 1e-9);
        assert!((ledger.song_revenue("B") - 50.0).abs() < 1e-9);
        let total = ledger.song_revenue("A") + ledger.song_revenue("B");
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_distribution_is_a_noop() {
        let mut ledger = RevenueLedger::default();
        ledger.distribute(&[], 1_000_000.0);
        assert!(ledger.report().is_empty());
    }

    #[test]
    fn most_profitable_song_breaks_ties_lexicographically() {
        let mut ledger = RevenueLedger::default();
        ledger.distribute(&plays(&[("A", "zeta"), ("A", "alpha")]), 200.0);
        assert_eq!(ledger.most_profitable_song("A"), "alpha");
    }

    #[test]
    fn most_profitable_song_is_na_without_song_revenue() {
        let mut ledger = RevenueLedger::default();
        ledger.record_merch_sale("A", 50.0);
        assert_eq!(ledger.most_profitable_song("A"), "N/A");
        assert_eq!(ledger.most_profitable_song("unknown"), "N/A");
    }

    #[test]
    fn ranks_by_total_revenue_then_name() {
        let mut ledger = RevenueLedger::default();
        ledger.distribute(&plays(&[("B", "s1")]), 100.0);
        ledger.distribute(&plays(&[("A", "s2")]), 100.0);
        ledger.record_merch_sale("C", 500.0);

        let report = ledger.report();
        assert_eq!(report[0].0, "C");
        assert_eq!(report[0].1.ranking, 1);
        // A and B tie on total; name ascending puts A before B.
        assert_eq!(report[1].0, "A");
        assert_eq!(report[1].1.ranking, 2);
        assert_eq!(report[2].0, "B");
        assert_eq!(report[2].1.ranking, 3);
    }

    #[test]
    fn report_rounds_to_two_decimals() {
        let mut ledger = RevenueLedger::default();
        // 1000000 / 3 = 333333.333...
        ledger.distribute(&plays(&[("A", "s1"), ("A", "s2"), ("A", "s3")]), 1_000_000.0);
        let report = ledger.report();
        assert_eq!(report[0].1.song_revenue, 1_000_000.0);
        let mut one_third = RevenueLedger::default();
        one_third.distribute(&plays(&[("A", "s1"), ("B", "s2"), ("C", "s3")]), 1_000_000.0);
        assert_eq!(one_third.report()[0].1.song_revenue, 333_333.33);
    }
}
