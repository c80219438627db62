//! Retained-fee book.

use parking_lot::RwLock;
use relics_types::{
    AccessControl, AccountId, Amount, EngineError, PayoutSink, Result,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
struct Book {
    balance: Amount,
    total_claim_fees: Amount,
    total_level_fees: Amount,
    total_withdrawn: Amount,
}

/// Summary of everything the treasury has seen.
///
/// `balance + total_withdrawn == total_claim_fees + total_level_fees`
/// holds at every observable boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryStats {
    pub balance: Amount,
    pub total_claim_fees: Amount,
    pub total_level_fees: Amount,
    pub total_withdrawn: Amount,
}

/// Accumulates retained fees and releases them only via admin withdrawal.
///
/// Clones share the same book.
#[derive(Clone)]
pub struct Treasury {
    book: Arc<RwLock<Book>>,
    access: Arc<dyn AccessControl>,
    payouts: Arc<dyn PayoutSink>,
    /// Where withdrawals are sent.
    recipient: AccountId,
}

impl Treasury {
    pub fn new(
        access: Arc<dyn AccessControl>,
        payouts: Arc<dyn PayoutSink>,
        recipient: AccountId,
    ) -> Self {
        Self {
            book: Arc::new(RwLock::new(Book::default())),
            access,
            payouts,
            recipient,
        }
    }

    /// Retain a claim fee.
    pub fn deposit_claim_fee(&self, amount: Amount) {
        if amount == 0 {
            debug!(target: "treasury", "zero claim fee, nothing to retain");
            return;
        }
        let mut book = self.book.write();
        book.balance = book.balance.saturating_add(amount);
        book.total_claim_fees = book.total_claim_fees.saturating_add(amount);
        info!(target: "treasury", "retained claim fee of {} (balance {})", amount, book.balance);
    }

    /// Retain a level-up fee.
    pub fn deposit_level_fee(&self, amount: Amount) {
        if amount == 0 {
            debug!(target: "treasury", "zero level-up fee, nothing to retain");
            return;
        }
        let mut book = self.book.write();
        book.balance = book.balance.saturating_add(amount);
        book.total_level_fees = book.total_level_fees.saturating_add(amount);
        info!(target: "treasury", "retained level-up fee of {} (balance {})", amount, book.balance);
    }

    /// Current withdrawable balance.
    pub fn balance(&self) -> Amount {
        self.book.read().balance
    }

    pub fn stats(&self) -> TreasuryStats {
        let book = self.book.read();
        TreasuryStats {
            balance: book.balance,
            total_claim_fees: book.total_claim_fees,
            total_level_fees: book.total_level_fees,
            total_withdrawn: book.total_withdrawn,
        }
    }

    /// Drain the entire balance to the configured recipient. Admin-only.
    /// Returns the amount withdrawn; per-token state is untouched.
    pub fn withdraw(&self, caller: &AccountId) -> Result<Amount> {
        if !self.access.is_admin(caller) {
            return Err(EngineError::AccessDenied);
        }

        let amount = {
            let mut book = self.book.write();
            let amount = book.balance;
            book.balance = 0;
            book.total_withdrawn = book.total_withdrawn.saturating_add(amount);
            amount
        };

        // Book is settled first; the outbound credit sees final state.
        if amount > 0 {
            self.payouts.credit(&self.recipient, amount);
        }

        info!(
            target: "treasury",
            "withdrew {} to {}",
            amount,
            self.recipient
        );

        Ok(amount)
    }
}
