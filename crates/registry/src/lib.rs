//! Token registry for the relics engine.
//!
//! Owns the per-token records, issues globally unique seeds, and enforces
//! the supply cap. Market and progression subsystems read and mutate
//! records through the registry's primitives; id-range validation lives
//! here, policy checks stay with the callers.

pub mod registry;
pub mod seed;

pub use registry::TokenRegistry;
pub use seed::{SeedGenerator, MAX_SEED_ATTEMPTS};
