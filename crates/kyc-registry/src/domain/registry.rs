//! # Registry
//!
//! Composes the role manager, record store, consent ledger, and audit trail
//! into one deterministic state machine. Every mutating operation evaluates
//! its full precondition set and, if satisfied, performs its entire state
//! mutation and audit append as one indivisible step - partial application
//! is never observable. A failed precondition returns an error and leaves
//! all state untouched; retrying is the boundary layer's decision.
//!
//! The struct is plain and synchronous. Callers that need concurrency put
//! it behind a single write-serialization point (see the service layer).

use crate::domain::audit::AuditLog;
use crate::domain::consent::ConsentLedger;
use crate::domain::entities::KycRecord;
use crate::domain::errors::RegistryError;
use crate::domain::records::RecordStore;
use crate::domain::roles::RoleManager;
use crate::ports::clock::Clock;
use kyc_types::{Address, Hash, RegistryEvent, ValidityDays};
use std::sync::Arc;

/// The access-control and consent state machine.
pub struct Registry {
    roles: RoleManager,
    records: RecordStore,
    consent: ConsentLedger,
    audit: AuditLog,
    clock: Arc<dyn Clock>,
}

impl Registry {
    /// Bring the registry into existence.
    ///
    /// The initializing identity becomes both owner and the first verifier
    /// atomically. No event is emitted for this bootstrap step; sequence
    /// zero belongs to the first accepted mutation.
    #[must_use]
    pub fn new(owner: Address, clock: Arc<dyn Clock>) -> Self {
        Self {
            roles: RoleManager::new(owner),
            records: RecordStore::new(),
            consent: ConsentLedger::new(),
            audit: AuditLog::new(),
            clock,
        }
    }

    fn emit(&mut self, event: RegistryEvent) -> RegistryEvent {
        self.audit.append(event.clone());
        event
    }

    // =========================================================================
    // ROLE MANAGER OPERATIONS
    // =========================================================================

    /// Enroll a verifier. Owner only; idempotent, and an event is emitted
    /// even when the target was already enrolled.
    pub fn add_verifier(
        &mut self,
        caller: Address,
        target: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        self.roles.require_owner(&caller)?;
        self.roles.enroll(target);
        Ok(self.emit(RegistryEvent::VerifierAdded {
            owner: caller,
            verifier: target,
            timestamp: self.clock.now(),
        }))
    }

    /// Remove a verifier. Owner only; idempotent removal.
    pub fn remove_verifier(
        &mut self,
        caller: Address,
        target: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        self.roles.require_owner(&caller)?;
        self.roles.withdraw(&target);
        Ok(self.emit(RegistryEvent::VerifierRemoved {
            owner: caller,
            verifier: target,
            timestamp: self.clock.now(),
        }))
    }

    /// Pure query: is this identity an enrolled verifier?
    #[must_use]
    pub fn is_verifier(&self, identity: &Address) -> bool {
        self.roles.is_verifier(identity)
    }

    /// The administrative owner, fixed at construction.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    // =========================================================================
    // IDENTITY RECORD STORE OPERATIONS
    // =========================================================================

    /// Register (or re-register) the caller's own record.
    ///
    /// Self-registration is structural: the record slot written is the
    /// caller's own identity - no third party can register on someone's
    /// behalf. Always succeeds: any prior record is replaced and its
    /// attestation discarded.
    pub fn register(
        &mut self,
        subject: Address,
        fingerprint: Hash,
        external_pointer: String,
        validity: ValidityDays,
    ) -> RegistryEvent {
        let now = self.clock.now();
        let record = self.records.register(
            subject,
            fingerprint,
            external_pointer.clone(),
            validity,
            now,
        );
        self.emit(RegistryEvent::Registered {
            subject,
            fingerprint,
            external_pointer,
            expires_at: record.expires_at,
            timestamp: now,
        })
    }

    /// Attest a subject's record. Verifier only; idempotent.
    ///
    /// Expiry is not checked: attesting an expired record succeeds, though
    /// consent reads will still treat the record as invalid.
    pub fn verify(
        &mut self,
        caller: Address,
        subject: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        self.roles.require_verifier(&caller)?;
        self.records.set_verified(&subject)?;
        Ok(self.emit(RegistryEvent::Verified {
            subject,
            verifier: caller,
            timestamp: self.clock.now(),
        }))
    }

    /// Read a subject's record.
    pub fn get_record(&self, subject: &Address) -> Result<KycRecord, RegistryError> {
        self.records.get(subject).cloned()
    }

    /// Whether a subject's registration is unusable right now (absent, or
    /// past its validity window).
    #[must_use]
    pub fn is_expired(&self, subject: &Address) -> bool {
        self.records.is_expired(subject, self.clock.now())
    }

    // =========================================================================
    // CONSENT LEDGER OPERATIONS
    // =========================================================================

    /// A counterparty requests access to a subject's record.
    ///
    /// The subject's record must exist and not be expired. The pending flag
    /// is then armed unconditionally - even over a grant already in force,
    /// which is left untouched.
    pub fn request_access(
        &mut self,
        caller: Address,
        subject: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let now = self.clock.now();
        self.records.require_live(&subject, now)?;
        self.consent.mark_pending(subject, caller);
        Ok(self.emit(RegistryEvent::AccessRequested {
            subject,
            counterparty: caller,
            timestamp: now,
        }))
    }

    /// The subject grants a counterparty access.
    ///
    /// Requires a pending request at the moment of the call and a live
    /// record for the subject. The pending flag is NOT cleared.
    pub fn grant_consent(
        &mut self,
        caller: Address,
        counterparty: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let now = self.clock.now();
        self.records.require_live(&caller, now)?;
        self.consent.grant(caller, counterparty)?;
        Ok(self.emit(RegistryEvent::ConsentGranted {
            subject: caller,
            counterparty,
            timestamp: now,
        }))
    }

    /// The subject revokes a counterparty's access.
    ///
    /// Unconditional: clears both flags regardless of prior state, always
    /// succeeds, and always emits - even when nothing was granted. Takes
    /// effect immediately; there is no grace period.
    pub fn revoke_consent(&mut self, caller: Address, counterparty: Address) -> RegistryEvent {
        self.consent.revoke(caller, counterparty);
        self.emit(RegistryEvent::ConsentRevoked {
            subject: caller,
            counterparty,
            timestamp: self.clock.now(),
        })
    }

    /// Effective consent: false the moment the subject's record is expired
    /// or absent, regardless of the stored granted flag.
    ///
    /// The document-retrieval collaborator must treat a `false` result as an
    /// absolute denial before following any external pointer.
    #[must_use]
    pub fn has_consent(&self, subject: &Address, counterparty: &Address) -> bool {
        if self.records.is_expired(subject, self.clock.now()) {
            return false;
        }
        self.consent.is_granted(subject, counterparty)
    }

    /// Raw read of the pending flag, not expiry-adjusted.
    #[must_use]
    pub fn has_pending_request(&self, subject: &Address, counterparty: &Address) -> bool {
        self.consent.is_pending(subject, counterparty)
    }

    /// Counterparties currently awaiting this subject's decision.
    #[must_use]
    pub fn pending_requests_for(&self, subject: &Address) -> Vec<Address> {
        self.consent.pending_for(subject)
    }

    /// Subjects whose effective consent currently reads true for this
    /// counterparty. Expiry-adjusted, unlike the raw granted flag.
    #[must_use]
    pub fn grants_held_by(&self, counterparty: &Address) -> Vec<Address> {
        let now = self.clock.now();
        self.consent
            .granted_subjects_for(counterparty)
            .into_iter()
            .filter(|subject| !self.records.is_expired(subject, now))
            .collect()
    }

    // =========================================================================
    // AUDIT TRAIL
    // =========================================================================

    /// Read-only view of the audit trail.
    #[must_use]
    pub fn audit(&self) -> &AuditLog {
        &self.audit
    }
}
