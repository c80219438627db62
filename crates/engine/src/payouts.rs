//! In-memory payout sink.
//!
//! Accumulates outbound credits per account and keeps the full credit log,
//! so tests can assert on exact fund flows.

use parking_lot::RwLock;
use relics_types::{AccountId, Amount, PayoutSink};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPayouts {
    balances: Arc<RwLock<HashMap<AccountId, Amount>>>,
    log: Arc<RwLock<Vec<(AccountId, Amount)>>>,
}

impl InMemoryPayouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total credited to `account` so far.
    pub fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.read().get(account).copied().unwrap_or(0)
    }

    /// Every credit issued, in order.
    pub fn credits(&self) -> Vec<(AccountId, Amount)> {
        self.log.read().clone()
    }

    /// Sum of every credit ever issued.
    pub fn total_credited(&self) -> Amount {
        self.log
            .read()
            .iter()
            .fold(0u64, |total, (_, amount)| total.saturating_add(*amount))
    }
}

impl PayoutSink for InMemoryPayouts {
    fn credit(&self, to: &AccountId, amount: Amount) {
        let mut balances = self.balances.write();
        let entry = balances.entry(*to).or_default();
        *entry = entry.saturating_add(amount);
        self.log.write().push((*to, amount));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credits_accumulate_and_log() {
        let payouts = InMemoryPayouts::new();
        let alice = AccountId::of_byte(1);
        payouts.credit(&alice, 10);
        payouts.credit(&alice, 5);
        assert_eq!(payouts.balance_of(&alice), 15);
        assert_eq!(payouts.total_credited(), 15);
        assert_eq!(payouts.credits(), vec![(alice, 10), (alice, 5)]);
    }
}
