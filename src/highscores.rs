//! High score record
//!
//! Persisted through a [`KeyValueStore`](crate::persistence::KeyValueStore)
//! as `{"highScore":N}`. Only the best score survives process restarts.

use serde::{Deserialize, Serialize};

use crate::persistence::Record;

/// Best score across all sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HighScore {
    #[serde(rename = "highScore")]
    pub best: u64,
}

impl HighScore {
    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Raise the record if `score` beats it. Returns true when it did.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

impl Record for HighScore {
    const STORAGE_KEY: &'static str = "only-sun-game";

    fn merge(&mut self, stored: Self) {
        self.record(stored.best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{KeyValueStore, MemoryStore, Persisted, read_record, write_record};

    #[test]
    fn test_record_only_raises() {
        let mut high = HighScore::new(50);
        assert!(!high.record(10));
        assert!(!high.record(50));
        assert_eq!(high.best, 50);
        assert!(high.record(51));
        assert_eq!(high.best, 51);
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&HighScore::new(120)).unwrap();
        assert_eq!(json, r#"{"highScore":120}"#);
    }

    #[test]
    fn test_save_then_load() {
        let mut store = MemoryStore::new();
        write_record(&mut store, &HighScore::new(77)).unwrap();
        assert_eq!(Persisted::<HighScore>::load(&store).get().best, 77);
    }

    #[test]
    fn test_merge_keeps_the_larger_score() {
        let mut high = HighScore::new(30);
        high.merge(HighScore::new(5000));
        assert_eq!(high.best, 5000);
        high.merge(HighScore::new(10));
        assert_eq!(high.best, 5000);
    }

    #[test]
    fn test_load_corrupt_record_starts_fresh() {
        let mut store = MemoryStore::new();
        store.set(HighScore::STORAGE_KEY, "not json").unwrap();
        assert_eq!(read_record::<HighScore>(&store).unwrap(), None);
        assert_eq!(
            *Persisted::<HighScore>::load(&store).get(),
            HighScore::default()
        );
    }
}
