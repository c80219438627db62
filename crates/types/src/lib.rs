//! Shared vocabulary for the relics engine.
//!
//! Everything the subsystem crates exchange lives here: account and token
//! identifiers, fixed-point amounts, the per-token record, economy
//! parameters, observable events, the error taxonomy, and the traits
//! through which the engine talks to its external collaborators.

pub mod account;
pub mod collaborators;
pub mod errors;
pub mod events;
pub mod params;
pub mod scalars;
pub mod token;

pub use account::AccountId;
pub use collaborators::{AccessControl, OwnershipLedger, PayoutSink};
pub use errors::{EngineError, Result};
pub use events::Event;
pub use params::EconomyParams;
pub use scalars::{Amount, Level, Tick, TokenId, UNIT};
pub use token::{Listing, MintedToken, Relic, Seed};
