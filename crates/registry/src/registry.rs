//! Token registry implementation.

use crate::seed::SeedGenerator;
use parking_lot::{Mutex, RwLock};
use relics_clock::LogicalClock;
use relics_types::{
    AccessControl, AccountId, Amount, EngineError, Level, Listing, MintedToken, Relic, Result,
    Seed, Tick, TokenId,
};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

/// Registry of every minted token.
///
/// Cloning yields another handle onto the same records; all state lives
/// behind shared locks so the market and progression subsystems operate on
/// the same store.
#[derive(Clone)]
pub struct TokenRegistry {
    /// Records indexed by `id - 1`; ids are 1-indexed and never reused.
    tokens: Arc<RwLock<Vec<Relic>>>,
    /// Every seed ever assigned.
    used_seeds: Arc<RwLock<HashSet<Seed>>>,
    seeder: Arc<Mutex<SeedGenerator>>,
    max_supply: u64,
    access: Arc<dyn AccessControl>,
    clock: Arc<LogicalClock>,
}

impl TokenRegistry {
    pub fn new(
        max_supply: u64,
        entropy: [u8; 32],
        access: Arc<dyn AccessControl>,
        clock: Arc<LogicalClock>,
    ) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(Vec::new())),
            used_seeds: Arc::new(RwLock::new(HashSet::new())),
            seeder: Arc::new(Mutex::new(SeedGenerator::new(entropy))),
            max_supply,
            access,
            clock,
        }
    }

    /// Mint `count` new tokens. Admin-only.
    ///
    /// The whole batch is staged before anything is committed: a seed
    /// failure on the last token leaves supply, records, and the seed set
    /// exactly as they were.
    pub fn mint(&self, count: u64, caller: &AccountId) -> Result<Vec<MintedToken>> {
        if !self.access.is_admin(caller) {
            return Err(EngineError::AccessDenied);
        }

        let mut tokens = self.tokens.write();
        let supply = tokens.len() as u64;
        let requested = supply.saturating_add(count);
        if requested > self.max_supply {
            return Err(EngineError::MaxSupplyExceeded {
                requested,
                cap: self.max_supply,
            });
        }

        let mut seeder = self.seeder.lock();
        // Stage against a scratch generator and a scratch seed set so a
        // mid-batch failure leaves the committed state untouched.
        let mut scratch = seeder.clone();
        let mut taken: HashSet<Seed> = self.used_seeds.read().clone();
        let mut staged: Vec<MintedToken> = Vec::with_capacity(count as usize);
        for offset in 0..count {
            let id = supply + offset + 1;
            let seed = scratch.draw(id, &taken)?;
            taken.insert(seed);
            staged.push(MintedToken { id, seed });
        }

        let tick = self.clock.current();
        let mut used = self.used_seeds.write();
        for minted in &staged {
            tokens.push(Relic::minted(minted.id, minted.seed, tick));
            used.insert(minted.seed);
        }
        *seeder = scratch;

        info!(
            target: "registry",
            "minted {} tokens at tick {} (supply {} -> {})",
            count,
            tick,
            supply,
            tokens.len()
        );

        Ok(staged)
    }

    /// Number of tokens minted so far.
    pub fn total_supply(&self) -> u64 {
        self.tokens.read().len() as u64
    }

    /// Snapshot of one record.
    pub fn record(&self, id: TokenId) -> Result<Relic> {
        let tokens = self.tokens.read();
        Self::slot(&tokens, id).cloned()
    }

    pub fn seed_of(&self, id: TokenId) -> Result<Seed> {
        Ok(self.record(id)?.seed)
    }

    pub fn is_claimable(&self, id: TokenId) -> Result<bool> {
        Ok(self.record(id)?.claimable)
    }

    /// Clear the claimable flag after a first acquisition. Fails
    /// `AlreadyClaimed` if it is already clear.
    pub fn mark_claimed(&self, id: TokenId) -> Result<()> {
        let mut tokens = self.tokens.write();
        let relic = Self::slot_mut(&mut tokens, id)?;
        if !relic.claimable {
            return Err(EngineError::AlreadyClaimed { id });
        }
        relic.claimable = false;
        Ok(())
    }

    /// Attach a sale offer. The `price > 0` invariant is enforced here as
    /// well as at the marketplace boundary.
    pub fn set_listing(&self, id: TokenId, price: Amount) -> Result<()> {
        if price == 0 {
            return Err(EngineError::InvalidPrice);
        }
        let mut tokens = self.tokens.write();
        let relic = Self::slot_mut(&mut tokens, id)?;
        relic.listing = Some(Listing { price });
        Ok(())
    }

    /// Remove and return the active listing, if any.
    pub fn clear_listing(&self, id: TokenId) -> Result<Option<Listing>> {
        let mut tokens = self.tokens.write();
        let relic = Self::slot_mut(&mut tokens, id)?;
        Ok(relic.listing.take())
    }

    pub fn listing_of(&self, id: TokenId) -> Result<Option<Listing>> {
        Ok(self.record(id)?.listing)
    }

    /// Ascending snapshot of every currently listed id.
    pub fn listed_ids(&self) -> Vec<TokenId> {
        self.tokens
            .read()
            .iter()
            .filter(|relic| relic.is_listed())
            .map(|relic| relic.id)
            .collect()
    }

    /// Advance a token by exactly one level and reset its cooldown
    /// baseline to `tick`. Returns the new level.
    pub fn bump_level(&self, id: TokenId, tick: Tick) -> Result<Level> {
        let mut tokens = self.tokens.write();
        let relic = Self::slot_mut(&mut tokens, id)?;
        relic.level = relic
            .level
            .checked_add(1)
            .ok_or(EngineError::InvalidParameter("level overflow"))?;
        relic.last_progress_tick = tick;
        Ok(relic.level)
    }

    fn slot<'a>(tokens: &'a [Relic], id: TokenId) -> Result<&'a Relic> {
        if id == 0 {
            return Err(EngineError::InvalidToken { id });
        }
        tokens
            .get(id as usize - 1)
            .ok_or(EngineError::InvalidToken { id })
    }

    fn slot_mut<'a>(tokens: &'a mut [Relic], id: TokenId) -> Result<&'a mut Relic> {
        if id == 0 {
            return Err(EngineError::InvalidToken { id });
        }
        tokens
            .get_mut(id as usize - 1)
            .ok_or(EngineError::InvalidToken { id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Admin(AccountId);

    impl AccessControl for Admin {
        fn is_admin(&self, caller: &AccountId) -> bool {
            caller == &self.0
        }
    }

    fn registry(max_supply: u64) -> (TokenRegistry, AccountId) {
        let admin = AccountId::of_byte(0xad);
        let registry = TokenRegistry::new(
            max_supply,
            [42u8; 32],
            Arc::new(Admin(admin)),
            Arc::new(LogicalClock::new(10)),
        );
        (registry, admin)
    }

    #[test]
    fn test_mint_batch_appends_claimable_records() {
        let (registry, admin) = registry(100);
        let minted = registry.mint(3, &admin).unwrap();
        assert_eq!(minted.len(), 3);
        assert_eq!(registry.total_supply(), 3);
        for (index, token) in minted.iter().enumerate() {
            assert_eq!(token.id, index as u64 + 1);
            let relic = registry.record(token.id).unwrap();
            assert!(relic.claimable);
            assert_eq!(relic.level, 1);
            assert_eq!(relic.last_progress_tick, 10);
        }
    }

    #[test]
    fn test_mint_assigns_pairwise_distinct_seeds() {
        let (registry, admin) = registry(200);
        let mut seen = HashSet::new();
        registry.mint(120, &admin).unwrap();
        registry.mint(80, &admin).unwrap();
        for id in 1..=200u64 {
            assert!(seen.insert(registry.seed_of(id).unwrap()));
        }
    }

    #[test]
    fn test_non_admin_cannot_mint() {
        let (registry, _) = registry(10);
        let outsider = AccountId::of_byte(1);
        assert!(matches!(
            registry.mint(1, &outsider),
            Err(EngineError::AccessDenied)
        ));
        assert_eq!(registry.total_supply(), 0);
    }

    #[test]
    fn test_mint_past_cap_leaves_supply_unchanged() {
        let (registry, admin) = registry(5);
        registry.mint(4, &admin).unwrap();
        let err = registry.mint(2, &admin).unwrap_err();
        assert!(matches!(
            err,
            EngineError::MaxSupplyExceeded {
                requested: 6,
                cap: 5
            }
        ));
        assert_eq!(registry.total_supply(), 4);
        registry.mint(1, &admin).unwrap();
        assert_eq!(registry.total_supply(), 5);
    }

    #[test]
    fn test_reads_reject_out_of_range_ids() {
        let (registry, admin) = registry(10);
        registry.mint(2, &admin).unwrap();
        assert!(matches!(
            registry.seed_of(0),
            Err(EngineError::InvalidToken { id: 0 })
        ));
        assert!(matches!(
            registry.is_claimable(3),
            Err(EngineError::InvalidToken { id: 3 })
        ));
    }

    #[test]
    fn test_mark_claimed_is_one_shot() {
        let (registry, admin) = registry(10);
        registry.mint(1, &admin).unwrap();
        registry.mark_claimed(1).unwrap();
        assert!(!registry.is_claimable(1).unwrap());
        assert!(matches!(
            registry.mark_claimed(1),
            Err(EngineError::AlreadyClaimed { id: 1 })
        ));
    }

    #[test]
    fn test_listing_primitives() {
        let (registry, admin) = registry(10);
        registry.mint(2, &admin).unwrap();
        assert!(matches!(
            registry.set_listing(1, 0),
            Err(EngineError::InvalidPrice)
        ));
        registry.set_listing(1, 500).unwrap();
        assert_eq!(
            registry.listing_of(1).unwrap(),
            Some(Listing { price: 500 })
        );
        assert_eq!(registry.listed_ids(), vec![1]);
        assert_eq!(
            registry.clear_listing(1).unwrap(),
            Some(Listing { price: 500 })
        );
        assert_eq!(registry.clear_listing(1).unwrap(), None);
        assert!(registry.listed_ids().is_empty());
    }

    #[test]
    fn test_bump_level_updates_baseline() {
        let (registry, admin) = registry(10);
        registry.mint(1, &admin).unwrap();
        assert_eq!(registry.bump_level(1, 777).unwrap(), 2);
        let relic = registry.record(1).unwrap();
        assert_eq!(relic.level, 2);
        assert_eq!(relic.last_progress_tick, 777);
    }
}
