//! Claim desk and marketplace for the relics engine.
//!
//! The claim desk converts an unclaimed token into an owned one against
//! payment; the marketplace handles peer-to-peer list/cancel/buy of
//! already-claimed tokens. Every payable path follows the same discipline:
//! checks, then the fallible ledger transfer, then infallible internal
//! effects, then outbound payouts.

pub mod claim;
pub mod listings;

pub use claim::ClaimDesk;
pub use listings::Marketplace;
