//! Traits for the external collaborators the engine consumes.
//!
//! The base non-fungible-token bookkeeping, privileged-caller gating, and
//! fund egress are not part of the engine; they are reached only through
//! these interfaces. In-memory reference implementations live in
//! `relics-engine`.

use crate::account::AccountId;
use crate::scalars::{Amount, TokenId};
use anyhow::Result;

/// Authoritative owner-of-token mapping and transfer primitive.
///
/// Implementations are free to fail (storage faults, unknown ids); the
/// engine orders every fallible ledger call before its own state
/// mutations so a failed call leaves no partial transition behind.
pub trait OwnershipLedger: Send + Sync {
    /// Record a freshly minted token under its initial owner.
    fn register(&self, id: TokenId, owner: AccountId) -> Result<()>;

    /// Current owner of a token.
    fn owner_of(&self, id: TokenId) -> Result<AccountId>;

    /// Move a token to a new owner.
    fn transfer(&self, id: TokenId, new_owner: AccountId) -> Result<()>;

    /// Whether the ledger knows the token at all.
    fn exists(&self, id: TokenId) -> bool;
}

/// Privileged-caller predicate. Modeled as an explicit capability held by
/// each component and checked per call, not as inherited behavior.
pub trait AccessControl: Send + Sync {
    fn is_admin(&self, caller: &AccountId) -> bool;
}

/// Outbound value transfer: claim/buy refunds, seller payouts, and
/// administrator withdrawals.
///
/// Credits are issued strictly after all internal state is final, so a
/// reentrant call from the recipient observes fully-consistent post-state.
/// The sink itself is infallible by contract; delivery beyond this
/// boundary is the host's concern.
pub trait PayoutSink: Send + Sync {
    fn credit(&self, to: &AccountId, amount: Amount);
}
