//! Level advancement.

use crate::schedule::CooldownSchedule;
use parking_lot::RwLock;
use relics_clock::LogicalClock;
use relics_registry::TokenRegistry;
use relics_treasury::Treasury;
use relics_types::{
    AccessControl, AccountId, Amount, EngineError, Event, Level, OwnershipLedger, PayoutSink,
    Result, Tick, TokenId,
};
use std::sync::Arc;
use tracing::info;

/// Advances tokens through levels after a cooldown and against a fee.
#[derive(Clone)]
pub struct Progression {
    registry: TokenRegistry,
    ledger: Arc<dyn OwnershipLedger>,
    treasury: Treasury,
    payouts: Arc<dyn PayoutSink>,
    access: Arc<dyn AccessControl>,
    clock: Arc<LogicalClock>,
    cost: Arc<RwLock<Amount>>,
    schedule: Arc<RwLock<CooldownSchedule>>,
}

impl Progression {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        registry: TokenRegistry,
        ledger: Arc<dyn OwnershipLedger>,
        treasury: Treasury,
        payouts: Arc<dyn PayoutSink>,
        access: Arc<dyn AccessControl>,
        clock: Arc<LogicalClock>,
        initial_cost: Amount,
        schedule: CooldownSchedule,
    ) -> Self {
        Self {
            registry,
            ledger,
            treasury,
            payouts,
            access,
            clock,
            cost: Arc::new(RwLock::new(initial_cost)),
            schedule: Arc::new(RwLock::new(schedule)),
        }
    }

    /// Current level-up cost. May be zero.
    pub fn level_up_cost(&self) -> Amount {
        *self.cost.read()
    }

    /// Set the level-up cost. Admin-only.
    pub fn set_level_up_cost(&self, value: Amount, caller: &AccountId) -> Result<()> {
        if !self.access.is_admin(caller) {
            return Err(EngineError::AccessDenied);
        }
        *self.cost.write() = value;
        info!(target: "progression", "level-up cost set to {}", value);
        Ok(())
    }

    /// Replace the cooldown schedule. Admin-only.
    pub fn set_cooldown_schedule(
        &self,
        schedule: CooldownSchedule,
        caller: &AccountId,
    ) -> Result<()> {
        if !self.access.is_admin(caller) {
            return Err(EngineError::AccessDenied);
        }
        *self.schedule.write() = schedule;
        info!(target: "progression", "cooldown schedule replaced");
        Ok(())
    }

    pub fn cooldown_schedule(&self) -> CooldownSchedule {
        self.schedule.read().clone()
    }

    /// Current level of `id`.
    pub fn level_of(&self, id: TokenId) -> Result<Level> {
        Ok(self.registry.record(id)?.level)
    }

    /// Ticks left until `id` may level up; zero means eligible now.
    pub fn ticks_until_ready(&self, id: TokenId) -> Result<Tick> {
        let relic = self.registry.record(id)?;
        let cooldown = self.schedule.read().cooldown_for(relic.level);
        let ready_at = relic.last_progress_tick.saturating_add(cooldown);
        Ok(ready_at.saturating_sub(self.clock.current()))
    }

    /// Advance `id` by one level.
    ///
    /// Retains the level-up cost in the treasury and refunds the excess.
    /// Level and cooldown baseline stay with the token across ownership
    /// changes; a buyer continues from where the seller left off.
    pub fn level_up(&self, id: TokenId, payment: Amount, caller: &AccountId) -> Result<Event> {
        self.registry.record(id)?;
        let owner = self.ledger.owner_of(id)?;
        if &owner != caller {
            return Err(EngineError::NotOwner { id });
        }
        let remaining = self.ticks_until_ready(id)?;
        if remaining > 0 {
            return Err(EngineError::NotReady { id, remaining });
        }
        let cost = self.level_up_cost();
        if payment < cost {
            return Err(EngineError::InsufficientFunds {
                required: cost,
                offered: payment,
            });
        }

        let tick = self.clock.current();
        let new_level = self.registry.bump_level(id, tick)?;
        self.treasury.deposit_level_fee(cost);

        let refund = payment - cost;
        if refund > 0 {
            self.payouts.credit(caller, refund);
        }

        info!(
            target: "progression",
            "token {} leveled up to {} at tick {}",
            id,
            new_level,
            tick
        );

        Ok(Event::LeveledUp { id, new_level })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::RwLock;
    use std::collections::HashMap;

    struct Admin(AccountId);

    impl AccessControl for Admin {
        fn is_admin(&self, caller: &AccountId) -> bool {
            caller == &self.0
        }
    }

    #[derive(Default)]
    struct OwnerMap(RwLock<HashMap<TokenId, AccountId>>);

    impl OwnershipLedger for OwnerMap {
        fn register(&self, id: TokenId, owner: AccountId) -> anyhow::Result<()> {
            self.0.write().insert(id, owner);
            Ok(())
        }

        fn owner_of(&self, id: TokenId) -> anyhow::Result<AccountId> {
            self.0
                .read()
                .get(&id)
                .copied()
                .ok_or_else(|| anyhow::anyhow!("unknown token {id}"))
        }

        fn transfer(&self, id: TokenId, new_owner: AccountId) -> anyhow::Result<()> {
            self.0.write().insert(id, new_owner);
            Ok(())
        }

        fn exists(&self, id: TokenId) -> bool {
            self.0.read().contains_key(&id)
        }
    }

    #[derive(Default)]
    struct Sink(RwLock<HashMap<AccountId, Amount>>);

    impl Sink {
        fn balance_of(&self, account: &AccountId) -> Amount {
            self.0.read().get(account).copied().unwrap_or(0)
        }
    }

    impl PayoutSink for Sink {
        fn credit(&self, to: &AccountId, amount: Amount) {
            *self.0.write().entry(*to).or_default() += amount;
        }
    }

    struct Setup {
        progression: Progression,
        treasury: Treasury,
        clock: Arc<LogicalClock>,
        payouts: Arc<Sink>,
        admin: AccountId,
        owner: AccountId,
    }

    /// One token minted at tick 1 and owned by `owner`, cooldown tiers
    /// [400, 500], level-up cost 50.
    fn setup() -> Setup {
        let admin = AccountId::of_byte(0xad);
        let owner = AccountId::of_byte(0xa1);
        let access = Arc::new(Admin(admin));
        let clock = Arc::new(LogicalClock::new(1));
        let ledger = Arc::new(OwnerMap::default());
        let payouts = Arc::new(Sink::default());

        let registry = TokenRegistry::new(10, [3u8; 32], access.clone(), clock.clone());
        let treasury = Treasury::new(access.clone(), payouts.clone(), admin);
        registry.mint(1, &admin).unwrap();
        ledger.register(1, owner).unwrap();

        let progression = Progression::new(
            registry,
            ledger,
            treasury.clone(),
            payouts.clone(),
            access,
            clock.clone(),
            50,
            CooldownSchedule::new(vec![400, 500]).unwrap(),
        );

        Setup {
            progression,
            treasury,
            clock,
            payouts,
            admin,
            owner,
        }
    }

    #[test]
    fn test_fresh_token_is_level_one_and_cooling_down() {
        let s = setup();
        assert_eq!(s.progression.level_of(1).unwrap(), 1);
        assert_eq!(s.progression.ticks_until_ready(1).unwrap(), 400);
        assert!(matches!(
            s.progression.level_of(2),
            Err(EngineError::InvalidToken { id: 2 })
        ));
    }

    #[test]
    fn test_level_up_before_cooldown_fails() {
        let s = setup();
        s.clock.advance_to(300);
        let err = s.progression.level_up(1, 50, &s.owner).unwrap_err();
        assert!(matches!(err, EngineError::NotReady { id: 1, remaining } if remaining == 101));
        assert_eq!(s.progression.level_of(1).unwrap(), 1);
    }

    #[test]
    fn test_level_up_after_cooldown() {
        let s = setup();
        s.clock.advance_to(401);
        assert_eq!(s.progression.ticks_until_ready(1).unwrap(), 0);

        let event = s.progression.level_up(1, 80, &s.owner).unwrap();
        assert_eq!(
            event,
            Event::LeveledUp {
                id: 1,
                new_level: 2
            }
        );
        assert_eq!(s.treasury.balance(), 50);
        assert_eq!(s.payouts.balance_of(&s.owner), 30);

        // Baseline reset: the next tier (500 ticks) now applies.
        assert_eq!(s.progression.ticks_until_ready(1).unwrap(), 500);
        s.clock.advance_to(800);
        assert!(matches!(
            s.progression.level_up(1, 50, &s.owner),
            Err(EngineError::NotReady { .. })
        ));
        s.clock.advance_to(901);
        s.progression.level_up(1, 50, &s.owner).unwrap();
        assert_eq!(s.progression.level_of(1).unwrap(), 3);
    }

    #[test]
    fn test_only_owner_levels_up() {
        let s = setup();
        s.clock.advance_to(500);
        assert!(matches!(
            s.progression.level_up(1, 50, &s.admin),
            Err(EngineError::NotOwner { id: 1 })
        ));
    }

    #[test]
    fn test_underpayment_fails_after_readiness() {
        let s = setup();
        s.clock.advance_to(500);
        assert!(matches!(
            s.progression.level_up(1, 49, &s.owner),
            Err(EngineError::InsufficientFunds {
                required: 50,
                offered: 49
            })
        ));
        assert_eq!(s.progression.level_of(1).unwrap(), 1);
    }

    #[test]
    fn test_level_survives_ownership_transfer() {
        let s = setup();
        s.clock.advance_to(401);
        s.progression.level_up(1, 50, &s.owner).unwrap();

        // Hand the token to someone else outside the marketplace.
        let buyer = AccountId::of_byte(0xb0);
        s.progression.ledger.transfer(1, buyer).unwrap();

        assert_eq!(s.progression.level_of(1).unwrap(), 2);
        s.clock.advance_to(1_000);
        s.progression.level_up(1, 50, &buyer).unwrap();
        assert_eq!(s.progression.level_of(1).unwrap(), 3);
    }

    #[test]
    fn test_admin_reconfigures_cost_and_schedule() {
        let s = setup();
        let outsider = AccountId::of_byte(0x77);
        assert!(s.progression.set_level_up_cost(99, &outsider).is_err());
        s.progression.set_level_up_cost(99, &s.admin).unwrap();
        assert_eq!(s.progression.level_up_cost(), 99);

        let schedule = CooldownSchedule::new(vec![10, 10, 20]).unwrap();
        s.progression
            .set_cooldown_schedule(schedule.clone(), &s.admin)
            .unwrap();
        assert_eq!(s.progression.cooldown_schedule(), schedule);
        assert_eq!(s.progression.ticks_until_ready(1).unwrap(), 10);
    }
}
