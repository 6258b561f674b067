//! # Role Manager
//!
//! Owns the administrative owner identity and the set of trusted verifiers.
//! The owner is fixed at construction and never changes; only the owner may
//! alter the verifier set. The set may shrink to empty without affecting
//! records that were already attested.

use crate::domain::errors::RegistryError;
use kyc_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Owner identity plus the mutable verifier set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoleManager {
    owner: Address,
    verifiers: HashSet<Address>,
}

impl RoleManager {
    /// Bring the role set into existence.
    ///
    /// The initializing identity becomes both owner and the first verifier
    /// in one atomic step.
    #[must_use]
    pub fn new(initial: Address) -> Self {
        let mut verifiers = HashSet::new();
        verifiers.insert(initial);
        Self {
            owner: initial,
            verifiers,
        }
    }

    /// The administrative owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Pure query: is this identity an enrolled verifier?
    #[must_use]
    pub fn is_verifier(&self, identity: &Address) -> bool {
        self.verifiers.contains(identity)
    }

    /// Number of enrolled verifiers.
    #[must_use]
    pub fn verifier_count(&self) -> usize {
        self.verifiers.len()
    }

    /// Precondition: only the owner may alter the verifier set.
    pub fn require_owner(&self, caller: &Address) -> Result<(), RegistryError> {
        if *caller == self.owner {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized { caller: *caller })
        }
    }

    /// Precondition: only an enrolled verifier may attest records.
    pub fn require_verifier(&self, caller: &Address) -> Result<(), RegistryError> {
        if self.is_verifier(caller) {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized { caller: *caller })
        }
    }

    /// Enroll a verifier. Idempotent: re-enrolling an existing verifier is a
    /// successful no-op. Authorization is checked by the caller via
    /// [`RoleManager::require_owner`].
    pub fn enroll(&mut self, target: Address) {
        self.verifiers.insert(target);
    }

    /// Remove a verifier. Idempotent removal; already-attested records keep
    /// their verified flag.
    pub fn withdraw(&mut self, target: &Address) {
        self.verifiers.remove(target);
    }
}
