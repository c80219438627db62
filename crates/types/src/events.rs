//! Observable events emitted by the engine.

use crate::account::AccountId;
use crate::scalars::{Amount, Level, TokenId};
use crate::token::Seed;
use serde::{Deserialize, Serialize};

/// Notification emitted by a successful state transition.
///
/// Ownership-changed notifications for transfers that bypass the
/// marketplace are produced by the ownership ledger collaborator; the
/// engine only emits the listing invalidation they trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    Minted {
        id: TokenId,
        seed: Seed,
    },
    Claimed {
        id: TokenId,
        new_owner: AccountId,
    },
    Listed {
        id: TokenId,
        owner: AccountId,
        price: Amount,
    },
    ListingCanceled {
        id: TokenId,
        owner: AccountId,
    },
    Sold {
        seller: AccountId,
        buyer: AccountId,
        id: TokenId,
        price: Amount,
    },
    LeveledUp {
        id: TokenId,
        new_level: Level,
    },
}
