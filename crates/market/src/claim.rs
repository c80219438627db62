//! First acquisition of minted tokens.

use parking_lot::RwLock;
use relics_registry::TokenRegistry;
use relics_treasury::Treasury;
use relics_types::{
    AccessControl, AccountId, Amount, EngineError, Event, OwnershipLedger, PayoutSink, Result,
    TokenId,
};
use std::sync::Arc;
use tracing::info;

/// Converts an unclaimed token into an owned one against the configured
/// claim cost. Clones share the same cost cell.
#[derive(Clone)]
pub struct ClaimDesk {
    registry: TokenRegistry,
    ledger: Arc<dyn OwnershipLedger>,
    treasury: Treasury,
    payouts: Arc<dyn PayoutSink>,
    access: Arc<dyn AccessControl>,
    cost: Arc<RwLock<Amount>>,
}

impl ClaimDesk {
    pub fn new(
        registry: TokenRegistry,
        ledger: Arc<dyn OwnershipLedger>,
        treasury: Treasury,
        payouts: Arc<dyn PayoutSink>,
        access: Arc<dyn AccessControl>,
        initial_cost: Amount,
    ) -> Self {
        Self {
            registry,
            ledger,
            treasury,
            payouts,
            access,
            cost: Arc::new(RwLock::new(initial_cost)),
        }
    }

    /// Current claim cost. May be zero.
    pub fn claim_cost(&self) -> Amount {
        *self.cost.read()
    }

    /// Set the claim cost. Admin-only; any value including zero.
    pub fn set_claim_cost(&self, value: Amount, caller: &AccountId) -> Result<()> {
        if !self.access.is_admin(caller) {
            return Err(EngineError::AccessDenied);
        }
        *self.cost.write() = value;
        info!(target: "market", "claim cost set to {}", value);
        Ok(())
    }

    /// Claim token `id` for `caller`.
    ///
    /// Retains exactly the claim cost in the treasury and refunds the
    /// rest of `payment`. All effects are atomic: a failure at any gate
    /// leaves the token claimable and no funds moved.
    pub fn claim(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<Event> {
        if !self.registry.is_claimable(id)? {
            return Err(EngineError::AlreadyClaimed { id });
        }
        let cost = self.claim_cost();
        if payment < cost {
            return Err(EngineError::InsufficientFunds {
                required: cost,
                offered: payment,
            });
        }

        // Ledger transfer is the only fallible effect; it runs before any
        // internal mutation so a failure aborts the claim cleanly.
        self.ledger.transfer(id, *caller)?;
        self.registry.mark_claimed(id)?;
        // Ownership changed hands, so any listing is void.
        self.registry.clear_listing(id)?;
        self.treasury.deposit_claim_fee(cost);

        let refund = payment - cost;
        if refund > 0 {
            self.payouts.credit(caller, refund);
        }

        info!(
            target: "market",
            "token {} claimed by {} for {} (refund {})",
            id,
            caller,
            cost,
            refund
        );

        Ok(Event::Claimed {
            id,
            new_owner: *caller,
        })
    }
}
