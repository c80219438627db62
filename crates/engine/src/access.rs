//! Access control backed by a single administrator account.

use relics_types::{AccessControl, AccountId};

/// The simplest privileged-caller predicate: exactly one admin.
#[derive(Debug, Clone)]
pub struct SingleAdmin {
    admin: AccountId,
}

impl SingleAdmin {
    pub fn new(admin: AccountId) -> Self {
        Self { admin }
    }

    pub fn admin(&self) -> &AccountId {
        &self.admin
    }
}

impl AccessControl for SingleAdmin {
    fn is_admin(&self, caller: &AccountId) -> bool {
        caller == &self.admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_the_configured_account_is_admin() {
        let control = SingleAdmin::new(AccountId::of_byte(1));
        assert!(control.is_admin(&AccountId::of_byte(1)));
        assert!(!control.is_admin(&AccountId::of_byte(2)));
    }
}
