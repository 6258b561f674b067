//! # Domain Entities
//!
//! Core data structures owned by the registry.

use kyc_types::{Hash, Timestamp, NEVER_EXPIRES};
use serde::{Deserialize, Serialize};

/// One live identity record per subject.
///
/// Re-registration replaces the whole record, including resetting `verified`
/// to false - a fresh registration intentionally discards prior attestation.
/// Absence of a record is represented by absence from the store, never by a
/// zeroed row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    /// Fingerprint of the externally stored ciphertext, never the plaintext.
    pub fingerprint: Hash,
    /// Opaque locator for the ciphertext. Carried verbatim, never followed.
    pub external_pointer: String,
    /// When this registration was accepted.
    pub registered_at: Timestamp,
    /// Expiry timestamp; [`NEVER_EXPIRES`] means the record never expires.
    pub expires_at: Timestamp,
    /// Set to true only by an enrolled verifier; reset on re-registration.
    pub verified: bool,
}

impl KycRecord {
    /// Whether this record is past its validity window at `now`.
    ///
    /// Non-expiring records (`expires_at == 0`) are never expired.
    #[must_use]
    pub fn is_expired(&self, now: Timestamp) -> bool {
        self.expires_at != NEVER_EXPIRES && now > self.expires_at
    }
}

/// Consent state for one (subject, counterparty) pair.
///
/// Two independent booleans. The reachable state space deliberately exceeds
/// the NoRequest/Pending/Granted triad: a repeated access request re-arms
/// `pending` without clearing an existing grant, and granting never clears
/// `pending`. See the consent ledger for the exact transition rules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentPair {
    /// An access request is awaiting the subject's decision.
    pub pending: bool,
    /// The subject has granted access. Effective consent additionally
    /// requires the subject's record to be live; see `has_consent`.
    pub granted: bool,
}

impl ConsentPair {
    /// Whether both flags are clear (the pair carries no information).
    #[must_use]
    pub fn is_clear(&self) -> bool {
        !self.pending && !self.granted
    }
}
