//! Coin balance
//!
//! Each finished run pays `score / 10` coins into the wallet, stored as
//! `{"coins":N}` next to the high score.

use serde::{Deserialize, Serialize};

use crate::persistence::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wallet {
    pub coins: u64,
}

impl Wallet {
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }

    /// Add `coins` to the balance. Returns false for an empty deposit.
    pub fn deposit(&mut self, coins: u64) -> bool {
        if coins == 0 {
            return false;
        }
        self.coins = self.coins.saturating_add(coins);
        true
    }
}

impl Record for Wallet {
    const STORAGE_KEY: &'static str = "only-sun-app";

    // Anything held in memory was earned while storage was unreadable
    fn merge(&mut self, stored: Self) {
        self.coins = self.coins.saturating_add(stored.coins);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit() {
        let mut wallet = Wallet::new(5);
        assert!(!wallet.deposit(0));
        assert!(wallet.deposit(12));
        assert_eq!(wallet.coins, 17);

        wallet.coins = u64::MAX - 1;
        wallet.deposit(10);
        assert_eq!(wallet.coins, u64::MAX);
    }

    #[test]
    fn test_merge_adds_pending_coins() {
        let mut wallet = Wallet::new(3);
        wallet.merge(Wallet::new(40));
        assert_eq!(wallet.coins, 43);
    }

    #[test]
    fn test_wire_format() {
        assert_eq!(
            serde_json::to_string(&Wallet::new(8)).unwrap(),
            r#"{"coins":8}"#
        );
    }
}
