//! In-memory ownership ledger.
//!
//! Stands in for the external non-fungible-token bookkeeping in tests and
//! self-contained deployments. Exactly one owner per token at all times.

use anyhow::{anyhow, bail, Result};
use parking_lot::RwLock;
use relics_types::{AccountId, OwnershipLedger, TokenId};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct InMemoryOwnershipLedger {
    owners: Arc<RwLock<HashMap<TokenId, AccountId>>>,
}

impl InMemoryOwnershipLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tokens the ledger knows about.
    pub fn len(&self) -> usize {
        self.owners.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.read().is_empty()
    }
}

impl OwnershipLedger for InMemoryOwnershipLedger {
    fn register(&self, id: TokenId, owner: AccountId) -> Result<()> {
        let mut owners = self.owners.write();
        if owners.contains_key(&id) {
            bail!("token {id} is already registered");
        }
        owners.insert(id, owner);
        Ok(())
    }

    fn owner_of(&self, id: TokenId) -> Result<AccountId> {
        self.owners
            .read()
            .get(&id)
            .copied()
            .ok_or_else(|| anyhow!("token {id} is not registered"))
    }

    fn transfer(&self, id: TokenId, new_owner: AccountId) -> Result<()> {
        let mut owners = self.owners.write();
        match owners.get_mut(&id) {
            Some(owner) => {
                *owner = new_owner;
                Ok(())
            }
            None => bail!("token {id} is not registered"),
        }
    }

    fn exists(&self, id: TokenId) -> bool {
        self.owners.read().contains_key(&id)
    }
}
