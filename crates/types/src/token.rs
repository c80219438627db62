//! Per-token records.

use crate::scalars::{Amount, Level, Tick, TokenId};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Opaque per-token seed, assigned once at mint and globally unique across
/// all ever-minted tokens. Serialized as a lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub [u8; 32]);

impl Seed {
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for Seed {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = hex::decode(s)?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(bytes))
    }
}

impl Serialize for Seed {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(self.0))
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(DeError::custom)
    }
}

/// An active fixed-price sale offer. Present on a token iff it is offered
/// for sale; the price is always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub price: Amount,
}

/// One collectible token record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relic {
    /// 1-indexed id, never reused.
    pub id: TokenId,
    /// Unique seed assigned at mint, immutable thereafter.
    pub seed: Seed,
    /// True from mint until the first successful claim.
    pub claimable: bool,
    /// Active sale offer, if any.
    pub listing: Option<Listing>,
    /// Progression level, starts at 1.
    pub level: Level,
    /// Tick of mint or of the last successful level-up.
    pub last_progress_tick: Tick,
}

impl Relic {
    /// A freshly minted record: claimable, level 1, progress baseline at
    /// the mint tick.
    pub fn minted(id: TokenId, seed: Seed, tick: Tick) -> Self {
        Self {
            id,
            seed,
            claimable: true,
            listing: None,
            level: 1,
            last_progress_tick: tick,
        }
    }

    pub fn is_listed(&self) -> bool {
        self.listing.is_some()
    }
}

/// Id and seed of a token produced by a mint batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintedToken {
    pub id: TokenId,
    pub seed: Seed,
}
