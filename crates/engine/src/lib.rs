//! Relics engine — collectible-token issuance, claim, resale, and
//! progression as one deterministic, serially-ordered state machine.
//!
//! The engine composes the registry, claim desk, marketplace, progression,
//! and treasury subsystems over three external collaborator traits
//! (ownership ledger, access control, payout sink) and records every
//! observable event. In-memory collaborator implementations suitable for
//! tests and embedding are provided here.

pub mod access;
pub mod config;
pub mod engine;
pub mod events;
pub mod ledger;
pub mod payouts;

pub use access::SingleAdmin;
pub use config::EngineConfig;
pub use engine::RelicEngine;
pub use events::EventLog;
pub use ledger::InMemoryOwnershipLedger;
pub use payouts::InMemoryPayouts;

pub use relics_clock::LogicalClock;
pub use relics_market::{ClaimDesk, Marketplace};
pub use relics_progression::{CooldownSchedule, Progression};
pub use relics_registry::TokenRegistry;
pub use relics_treasury::{Treasury, TreasuryStats};
pub use relics_types::{
    AccessControl, AccountId, Amount, EconomyParams, EngineError, Event, Level, Listing,
    MintedToken, OwnershipLedger, PayoutSink, Relic, Result, Seed, Tick, TokenId,
};
