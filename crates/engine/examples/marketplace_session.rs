//! Walk one token through its whole life: mint, claim, list, sell,
//! level up, withdraw.
//!
//! Run with `RUST_LOG=info cargo run --example marketplace_session`.

use relics_engine::{
    AccountId, EngineConfig, InMemoryOwnershipLedger, InMemoryPayouts, LogicalClock, RelicEngine,
    SingleAdmin,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let admin = AccountId::of_byte(0xad);
    let alice = AccountId::of_byte(0xa1);
    let bob = AccountId::of_byte(0xb0);

    let config = EngineConfig {
        treasury_recipient: admin,
        ..EngineConfig::default()
    };
    let clock = Arc::new(LogicalClock::new(1));
    let ledger = Arc::new(InMemoryOwnershipLedger::new());
    let payouts = Arc::new(InMemoryPayouts::new());
    let engine = RelicEngine::new(
        config,
        [7u8; 32],
        clock.clone(),
        ledger,
        Arc::new(SingleAdmin::new(admin)),
        payouts.clone(),
    )?;

    engine.mint(3, &admin)?;
    println!("minted {} tokens", engine.total_supply());

    let cost = engine.claim_cost();
    engine.claim(1, cost, &alice)?;
    println!("token 1 claimed by alice, seed {}", engine.seed_of(1)?);

    engine.list(1, cost * 4, &alice)?;
    engine.buy(1, cost * 4, &bob)?;
    println!("token 1 sold to bob for {}", cost * 4);

    clock.advance_to(500);
    engine.level_up(1, engine.level_up_cost(), &bob)?;
    println!("token 1 is now level {}", engine.level_of(1)?);

    let withdrawn = engine.withdraw(&admin)?;
    println!("treasury withdrawal: {withdrawn}");

    for event in engine.events() {
        println!("event: {event:?}");
    }

    Ok(())
}
