//! Process-lifetime leaderboard of finished sessions.

use std::cmp::Ordering;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Result of one completed quiz pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: usize,
    pub elapsed_seconds: f64,
}

impl LeaderboardEntry {
    pub fn new(name: impl Into<String>, score: usize, elapsed_seconds: f64) -> Self {
        Self {
            name: name.into(),
            score,
            elapsed_seconds,
        }
    }
}

/// Append-only store. Writers are serialized; readers may run alongside.
#[derive(Debug, Default)]
pub struct Leaderboard {
    entries: RwLock<Vec<LeaderboardEntry>>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Never rejects and never merges same-named entries.
    pub fn record(&self, entry: LeaderboardEntry) {
        info!(
            name = %entry.name,
            score = entry.score,
            elapsed = entry.elapsed_seconds,
            "leaderboard entry recorded"
        );
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry);
    }

    /// Snapshot sorted by score (desc), then time (asc), then insertion order.
    pub fn ranked(&self) -> Vec<LeaderboardEntry> {
        let mut ranked = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        // sort_by is stable, so ties keep insertion order
        ranked.sort_by(|a, b| match b.score.cmp(&a.score) {
            Ordering::Equal => a.elapsed_seconds.total_cmp(&b.elapsed_seconds),
            other => other,
        });
        ranked
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn names(entries: &[LeaderboardEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_ranked_orders_by_score_then_time() {
        let board = Leaderboard::new();
        board.record(LeaderboardEntry::new("A", 3, 10.0));
        board.record(LeaderboardEntry::new("B", 5, 20.0));
        board.record(LeaderboardEntry::new("C", 5, 5.0));

        assert_eq!(names(&board.ranked()), vec!["C", "B", "A"]);
    }

    #[test]
    fn test_full_ties_keep_insertion_order() {
        let board = Leaderboard::new();
        board.record(LeaderboardEntry::new("first", 4, 7.5));
        board.record(LeaderboardEntry::new("second", 4, 7.5));
        board.record(LeaderboardEntry::new("third", 4, 7.5));

        assert_eq!(names(&board.ranked()), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_ranked_does_not_reorder_storage() {
        let board = Leaderboard::new();
        board.record(LeaderboardEntry::new("slow", 1, 50.0));
        board.record(LeaderboardEntry::new("fast", 9, 1.0));
        let _ = board.ranked();

        let stored = board.entries.read().unwrap();
        assert_eq!(names(&stored), vec!["slow", "fast"]);
    }

    #[test]
    fn test_same_name_is_not_deduplicated() {
        let board = Leaderboard::new();
        board.record(LeaderboardEntry::new("Alice", 1, 3.0));
        board.record(LeaderboardEntry::new("Alice", 2, 4.0));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_empty_board_ranks_empty() {
        assert!(Leaderboard::new().ranked().is_empty());
    }

    #[test]
    fn test_concurrent_records_are_not_lost() {
        let board = Arc::new(Leaderboard::new());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let board = Arc::clone(&board);
                std::thread::spawn(move || {
                    for i in 0..50 {
                        board.record(LeaderboardEntry::new(format!("t{t}-{i}"), i, 1.0));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(board.len(), 400);
    }
}
