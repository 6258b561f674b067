//! # Consent Ledger
//!
//! Per (subject, counterparty) pair: a pending-request flag and a granted
//! flag, stored independently.
//!
//! The transition rules reproduce the source system exactly, including its
//! reachable states outside the NoRequest -> Pending -> Granted triad:
//!
//! - a repeated access request re-arms `pending` without clearing an
//!   existing grant, so `pending && granted` is reachable;
//! - granting never clears `pending`;
//! - revocation clears both flags unconditionally.
//!
//! Intent behind the extra states is ambiguous in the source; they are kept
//! as-is and pinned by tests rather than silently "corrected". Record
//! existence and expiry preconditions live with the caller, which owns the
//! record store.

use crate::domain::entities::ConsentPair;
use crate::domain::errors::RegistryError;
use kyc_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keyed store of consent pairs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConsentLedger {
    pairs: HashMap<(Address, Address), ConsentPair>,
}

impl ConsentLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the pending flag for a counterparty's request.
    ///
    /// Unconditional: succeeds even when a grant is already in force, and
    /// does not touch the granted flag.
    pub fn mark_pending(&mut self, subject: Address, counterparty: Address) {
        self.pairs
            .entry((subject, counterparty))
            .or_default()
            .pending = true;
    }

    /// Set the granted flag. Requires a pending request at the moment of the
    /// call; does NOT clear the pending flag.
    pub fn grant(
        &mut self,
        subject: Address,
        counterparty: Address,
    ) -> Result<(), RegistryError> {
        let pair = self
            .pairs
            .get_mut(&(subject, counterparty))
            .filter(|pair| pair.pending)
            .ok_or(RegistryError::InvalidState {
                subject,
                counterparty,
            })?;
        pair.granted = true;
        Ok(())
    }

    /// Clear both flags unconditionally. No partial revoke, no grace period.
    pub fn revoke(&mut self, subject: Address, counterparty: Address) {
        // Dropping the entry reads identically to a pair with both flags
        // clear and keeps the ledger bounded by live relationships.
        self.pairs.remove(&(subject, counterparty));
    }

    /// Raw read of the pending flag, not expiry-adjusted.
    #[must_use]
    pub fn is_pending(&self, subject: &Address, counterparty: &Address) -> bool {
        self.pairs
            .get(&(*subject, *counterparty))
            .is_some_and(|pair| pair.pending)
    }

    /// Raw read of the granted flag. Effective consent additionally requires
    /// the subject's record to be live; the registry composes that check.
    #[must_use]
    pub fn is_granted(&self, subject: &Address, counterparty: &Address) -> bool {
        self.pairs
            .get(&(*subject, *counterparty))
            .is_some_and(|pair| pair.granted)
    }

    /// Counterparties with a live pending request against `subject`.
    #[must_use]
    pub fn pending_for(&self, subject: &Address) -> Vec<Address> {
        let mut counterparties: Vec<Address> = self
            .pairs
            .iter()
            .filter(|((s, _), pair)| s == subject && pair.pending)
            .map(|((_, c), _)| *c)
            .collect();
        counterparties.sort_unstable();
        counterparties
    }

    /// Subjects whose granted flag is raised for `counterparty` (raw, not
    /// expiry-adjusted).
    #[must_use]
    pub fn granted_subjects_for(&self, counterparty: &Address) -> Vec<Address> {
        let mut subjects: Vec<Address> = self
            .pairs
            .iter()
            .filter(|((_, c), pair)| c == counterparty && pair.granted)
            .map(|((s, _), _)| *s)
            .collect();
        subjects.sort_unstable();
        subjects
    }

    /// Number of tracked pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether the ledger tracks no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
