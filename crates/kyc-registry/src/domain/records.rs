//! # Identity Record Store
//!
//! Owns one [`KycRecord`] per subject identity. Registration always
//! overwrites; attestation flips the verified flag; expiry is evaluated
//! against an injected `now`, never wall-clock reads from inside the store.

use crate::domain::entities::KycRecord;
use crate::domain::errors::RegistryError;
use kyc_types::{Address, Hash, Timestamp, ValidityDays};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keyed store of live identity records.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RecordStore {
    records: HashMap<Address, KycRecord>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or re-register) a record for `subject`.
    ///
    /// Always succeeds: any prior record is replaced wholesale and the
    /// verified flag is reset - re-registration intentionally discards prior
    /// attestation. Returns a copy of the stored record.
    pub fn register(
        &mut self,
        subject: Address,
        fingerprint: Hash,
        external_pointer: String,
        validity: ValidityDays,
        now: Timestamp,
    ) -> KycRecord {
        let record = KycRecord {
            fingerprint,
            external_pointer,
            registered_at: now,
            expires_at: validity.expires_at(now),
            verified: false,
        };
        self.records.insert(subject, record.clone());
        record
    }

    /// Read a subject's record.
    pub fn get(&self, subject: &Address) -> Result<&KycRecord, RegistryError> {
        self.records
            .get(subject)
            .ok_or(RegistryError::NotFound { subject: *subject })
    }

    /// Mark a subject's record as verified. Idempotent.
    ///
    /// Expiry is deliberately not checked here: a verifier may attest an
    /// already-expired record, and consent reads will still treat it as
    /// invalid until re-registration.
    pub fn set_verified(&mut self, subject: &Address) -> Result<(), RegistryError> {
        let record = self
            .records
            .get_mut(subject)
            .ok_or(RegistryError::NotFound { subject: *subject })?;
        record.verified = true;
        Ok(())
    }

    /// Whether a subject's registration is unusable at `now`.
    ///
    /// True when no record exists, or when the record is past its validity
    /// window. Non-expiring live records are never expired.
    #[must_use]
    pub fn is_expired(&self, subject: &Address, now: Timestamp) -> bool {
        match self.records.get(subject) {
            Some(record) => record.is_expired(now),
            None => true,
        }
    }

    /// Precondition for consent operations: the subject's record must exist
    /// and not be expired.
    pub fn require_live(&self, subject: &Address, now: Timestamp) -> Result<(), RegistryError> {
        let record = self.get(subject)?;
        if record.is_expired(now) {
            return Err(RegistryError::Expired { subject: *subject });
        }
        Ok(())
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
