//! Fixed-price peer-to-peer marketplace.

use relics_registry::TokenRegistry;
use relics_types::{
    AccountId, Amount, EngineError, Event, Listing, OwnershipLedger, PayoutSink, Result, TokenId,
};
use std::sync::Arc;
use tracing::info;

/// List, cancel, and buy already-claimed tokens at flat fixed prices.
///
/// Sellers are paid directly at sale time; nothing from a sale is routed
/// through the treasury. Clones share the same underlying records.
#[derive(Clone)]
pub struct Marketplace {
    registry: TokenRegistry,
    ledger: Arc<dyn OwnershipLedger>,
    payouts: Arc<dyn PayoutSink>,
}

impl Marketplace {
    pub fn new(
        registry: TokenRegistry,
        ledger: Arc<dyn OwnershipLedger>,
        payouts: Arc<dyn PayoutSink>,
    ) -> Self {
        Self {
            registry,
            ledger,
            payouts,
        }
    }

    /// Offer token `id` for sale at `price`.
    pub fn list(&self, id: TokenId, price: Amount, caller: &AccountId) -> Result<Event> {
        self.registry.record(id)?;
        let owner = self.ledger.owner_of(id)?;
        if &owner != caller {
            return Err(EngineError::NotOwner { id });
        }
        if price == 0 {
            return Err(EngineError::InvalidPrice);
        }
        self.registry.set_listing(id, price)?;

        info!(target: "market", "token {} listed by {} at {}", id, owner, price);

        Ok(Event::Listed { id, owner, price })
    }

    /// Withdraw an active offer.
    pub fn cancel(&self, id: TokenId, caller: &AccountId) -> Result<Event> {
        self.registry.record(id)?;
        let owner = self.ledger.owner_of(id)?;
        if &owner != caller {
            return Err(EngineError::NotOwner { id });
        }
        if self.registry.clear_listing(id)?.is_none() {
            return Err(EngineError::NotListed { id });
        }

        info!(target: "market", "token {} listing canceled by {}", id, owner);

        Ok(Event::ListingCanceled { id, owner })
    }

    /// Buy a listed token.
    ///
    /// Pays the seller exactly the listed price, refunds the buyer the
    /// difference, transfers ownership, and clears the listing, all in one
    /// atomic transition. Payouts are issued only after every internal
    /// effect is final.
    pub fn buy(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<Event> {
        let listing = self
            .registry
            .listing_of(id)?
            .ok_or(EngineError::NotListed { id })?;
        let seller = self.ledger.owner_of(id)?;
        if &seller == caller {
            return Err(EngineError::AlreadyOwner { id });
        }
        if payment < listing.price {
            return Err(EngineError::InsufficientFunds {
                required: listing.price,
                offered: payment,
            });
        }

        self.ledger.transfer(id, *caller)?;
        self.registry.clear_listing(id)?;

        self.payouts.credit(&seller, listing.price);
        let refund = payment - listing.price;
        if refund > 0 {
            self.payouts.credit(caller, refund);
        }

        info!(
            target: "market",
            "token {} sold by {} to {} for {}",
            id,
            seller,
            caller,
            listing.price
        );

        Ok(Event::Sold {
            seller,
            buyer: *caller,
            id,
            price: listing.price,
        })
    }

    /// Active sale price of `id`.
    ///
    /// Out-of-range ids fail `InvalidToken` before the listing check, so a
    /// nonexistent token is never reported as merely unlisted.
    pub fn price_of(&self, id: TokenId) -> Result<Amount> {
        self.registry
            .listing_of(id)?
            .map(|listing| listing.price)
            .ok_or(EngineError::NotListed { id })
    }

    /// Ascending snapshot of every listed id, taken at call time.
    pub fn active_listings(&self) -> Vec<TokenId> {
        self.registry.listed_ids()
    }

    /// Invalidate the listing of a token whose ownership changed outside
    /// `buy`. Returns the cleared listing, if there was one.
    pub fn handle_transfer(&self, id: TokenId) -> Result<Option<Listing>> {
        let cleared = self.registry.clear_listing(id)?;
        if cleared.is_some() {
            info!(target: "market", "token {} listing invalidated by ownership change", id);
        }
        Ok(cleared)
    }
}
