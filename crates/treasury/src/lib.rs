//! Treasury for the relics engine.
//!
//! Claim and level-up fees accumulate into a single running balance;
//! seller payouts never touch it. The balance leaves only through an
//! explicit administrator withdrawal.

pub mod book;

pub use book::{Treasury, TreasuryStats};
