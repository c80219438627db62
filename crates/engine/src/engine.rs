//! The engine facade.

use crate::config::EngineConfig;
use crate::events::EventLog;
use relics_clock::LogicalClock;
use relics_market::{ClaimDesk, Marketplace};
use relics_progression::{CooldownSchedule, Progression};
use relics_registry::TokenRegistry;
use relics_treasury::{Treasury, TreasuryStats};
use relics_types::{
    AccessControl, AccountId, Amount, EngineError, Event, Level, MintedToken, OwnershipLedger,
    PayoutSink, Relic, Result, Seed, Tick, TokenId,
};
use std::sync::Arc;
use tracing::info;

/// Collectible-token engine: issuance, claim, resale, and progression over
/// one shared record store.
///
/// Execution is a serially-ordered state machine: each operation runs to
/// completion, either committing every effect or none. Payable operations
/// follow checks → fallible ledger mutation → infallible internal effects
/// → outbound payouts, so a reentrant call from a payout recipient always
/// observes fully-consistent post-state.
#[derive(Clone)]
pub struct RelicEngine {
    registry: TokenRegistry,
    claims: ClaimDesk,
    marketplace: Marketplace,
    progression: Progression,
    treasury: Treasury,
    ledger: Arc<dyn OwnershipLedger>,
    events: EventLog,
    custodian: AccountId,
}

impl RelicEngine {
    /// Wire an engine from configuration, mint entropy, and collaborator
    /// handles. Fails if the configuration is invalid.
    pub fn new(
        config: EngineConfig,
        entropy: [u8; 32],
        clock: Arc<LogicalClock>,
        ledger: Arc<dyn OwnershipLedger>,
        access: Arc<dyn AccessControl>,
        payouts: Arc<dyn PayoutSink>,
    ) -> Result<Self> {
        config.validate()?;

        let registry = TokenRegistry::new(
            config.economy.max_supply,
            entropy,
            access.clone(),
            clock.clone(),
        );
        let treasury = Treasury::new(access.clone(), payouts.clone(), config.treasury_recipient);
        let claims = ClaimDesk::new(
            registry.clone(),
            ledger.clone(),
            treasury.clone(),
            payouts.clone(),
            access.clone(),
            config.economy.claim_cost,
        );
        let marketplace = Marketplace::new(registry.clone(), ledger.clone(), payouts.clone());
        let schedule = CooldownSchedule::new(config.economy.cooldown_tiers.clone())?;
        let progression = Progression::new(
            registry.clone(),
            ledger.clone(),
            treasury.clone(),
            payouts.clone(),
            access,
            clock,
            config.economy.level_up_cost,
            schedule,
        );

        Ok(Self {
            registry,
            claims,
            marketplace,
            progression,
            treasury,
            ledger,
            events: EventLog::new(),
            custodian: config.custodian,
        })
    }

    // ---- issuance -------------------------------------------------------

    /// Mint `count` tokens to the custodian. Admin-only.
    pub fn mint(&self, count: u64, caller: &AccountId) -> Result<Vec<MintedToken>> {
        let minted = self.registry.mint(count, caller)?;
        for token in &minted {
            self.ledger.register(token.id, self.custodian)?;
            self.events.record(Event::Minted {
                id: token.id,
                seed: token.seed,
            });
        }
        Ok(minted)
    }

    pub fn total_supply(&self) -> u64 {
        self.registry.total_supply()
    }

    pub fn seed_of(&self, id: TokenId) -> Result<Seed> {
        self.registry.seed_of(id)
    }

    pub fn is_claimable(&self, id: TokenId) -> Result<bool> {
        self.registry.is_claimable(id)
    }

    /// Snapshot of a full token record.
    pub fn token(&self, id: TokenId) -> Result<Relic> {
        self.registry.record(id)
    }

    // ---- claim ----------------------------------------------------------

    pub fn claim_cost(&self) -> Amount {
        self.claims.claim_cost()
    }

    pub fn set_claim_cost(&self, value: Amount, caller: &AccountId) -> Result<()> {
        self.claims.set_claim_cost(value, caller)
    }

    pub fn claim(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<()> {
        let event = self.claims.claim(id, payment, caller)?;
        self.events.record(event);
        Ok(())
    }

    // ---- marketplace ----------------------------------------------------

    pub fn list(&self, id: TokenId, price: Amount, caller: &AccountId) -> Result<()> {
        let event = self.marketplace.list(id, price, caller)?;
        self.events.record(event);
        Ok(())
    }

    pub fn cancel(&self, id: TokenId, caller: &AccountId) -> Result<()> {
        let event = self.marketplace.cancel(id, caller)?;
        self.events.record(event);
        Ok(())
    }

    pub fn buy(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<()> {
        let event = self.marketplace.buy(id, payment, caller)?;
        self.events.record(event);
        Ok(())
    }

    pub fn price_of(&self, id: TokenId) -> Result<Amount> {
        self.marketplace.price_of(id)
    }

    pub fn active_listings(&self) -> Vec<TokenId> {
        self.marketplace.active_listings()
    }

    /// Direct owner-to-owner transfer that bypasses the marketplace.
    ///
    /// Any active listing is invalidated within the same transition, so a
    /// stale offer can never let a third party buy out the new owner.
    pub fn transfer(&self, id: TokenId, to: AccountId, caller: &AccountId) -> Result<()> {
        self.registry.record(id)?;
        if !self.ledger.exists(id) {
            return Err(EngineError::InvalidToken { id });
        }
        let owner = self.ledger.owner_of(id)?;
        if &owner != caller {
            return Err(EngineError::NotOwner { id });
        }

        self.ledger.transfer(id, to)?;
        if self.marketplace.handle_transfer(id)?.is_some() {
            self.events.record(Event::ListingCanceled { id, owner });
        }

        info!(target: "engine", "token {} transferred from {} to {}", id, owner, to);

        Ok(())
    }

    // ---- progression ----------------------------------------------------

    pub fn level_up_cost(&self) -> Amount {
        self.progression.level_up_cost()
    }

    pub fn set_level_up_cost(&self, value: Amount, caller: &AccountId) -> Result<()> {
        self.progression.set_level_up_cost(value, caller)
    }

    pub fn cooldown_schedule(&self) -> CooldownSchedule {
        self.progression.cooldown_schedule()
    }

    pub fn set_cooldown_schedule(
        &self,
        schedule: CooldownSchedule,
        caller: &AccountId,
    ) -> Result<()> {
        self.progression.set_cooldown_schedule(schedule, caller)
    }

    pub fn level_of(&self, id: TokenId) -> Result<Level> {
        self.progression.level_of(id)
    }

    pub fn ticks_until_ready(&self, id: TokenId) -> Result<Tick> {
        self.progression.ticks_until_ready(id)
    }

    pub fn level_up(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<()> {
        let event = self.progression.level_up(id, payment, caller)?;
        self.events.record(event);
        Ok(())
    }

    // ---- treasury -------------------------------------------------------

    pub fn treasury_balance(&self) -> Amount {
        self.treasury.balance()
    }

    pub fn treasury_stats(&self) -> TreasuryStats {
        self.treasury.stats()
    }

    /// Withdraw the whole treasury balance. Admin-only.
    pub fn withdraw(&self, caller: &AccountId) -> Result<Amount> {
        self.treasury.withdraw(caller)
    }

    // ---- events ---------------------------------------------------------

    /// All events emitted so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.snapshot()
    }

    /// Take all emitted events, leaving the log empty.
    pub fn drain_events(&self) -> Vec<Event> {
        self.events.drain()
    }
}
