//! Scalar aliases and fixed-point money helpers.
//!
//! All amounts are integers counted in motes, the smallest currency unit
//! (8 decimal places, Bitcoin-style). No floating point is allowed in any
//! money or cooldown computation.

/// Token identifier. Ids are 1-indexed and never reused.
pub type TokenId = u64;

/// Logical-clock tick (e.g. block height). Monotonically non-decreasing.
pub type Tick = u64;

/// Progression level of a token. Starts at 1, increases by exactly 1.
pub type Level = u32;

/// Amount in motes (smallest unit, 8 decimals, Bitcoin-style). Wide
/// intermediate math uses u128.
pub type Amount = u64;

/// Number of decimal places of the currency.
pub const AMOUNT_DECIMALS: u32 = 8;

/// Motes per whole coin.
pub const UNIT: Amount = 10u64.pow(AMOUNT_DECIMALS);

/// Convert whole coins to motes (saturating).
#[inline]
pub const fn coins(n: u64) -> Amount {
    n.saturating_mul(UNIT)
}

/// Checked addition for amounts.
#[inline]
pub fn checked_add_amount(a: Amount, b: Amount) -> Option<Amount> {
    a.checked_add(b)
}

/// Checked subtraction for amounts.
#[inline]
pub fn checked_sub_amount(a: Amount, b: Amount) -> Option<Amount> {
    a.checked_sub(b)
}
