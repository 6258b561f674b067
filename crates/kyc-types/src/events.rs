//! # Registry Events
//!
//! Defines every event the registry can emit. One accepted mutation produces
//! exactly one event; rejected operations produce none. The audit trail
//! stores these values in call order and the live feed broadcasts the very
//! same values, so history can always be replayed without re-deriving it
//! from current state (revoked grants would otherwise be invisible).

use crate::entities::{Address, Hash, Timestamp};
use serde::{Deserialize, Serialize};

/// All events that can be appended to the audit trail and published to the
/// event feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistryEvent {
    // =========================================================================
    // IDENTITY RECORD STORE
    // =========================================================================
    /// A subject registered (or re-registered) a document fingerprint.
    ///
    /// Re-registration replaces the prior record wholesale and resets the
    /// verified flag, so a `Registered` event always marks the start of a
    /// fresh, unattested validity window.
    Registered {
        /// The identity the record is about (also the caller).
        subject: Address,
        /// Fingerprint of the externally stored ciphertext.
        fingerprint: Hash,
        /// Opaque locator for the ciphertext. Carried, never interpreted.
        external_pointer: String,
        /// Expiry timestamp; `0` means the record never expires.
        expires_at: Timestamp,
        /// When the registration was accepted.
        timestamp: Timestamp,
    },

    /// A trusted verifier attested the subject's record.
    Verified {
        /// The identity whose record was attested.
        subject: Address,
        /// The verifier that performed the attestation.
        verifier: Address,
        /// When the attestation was accepted.
        timestamp: Timestamp,
    },

    // =========================================================================
    // CONSENT LEDGER
    // =========================================================================
    /// A counterparty asked for access to the subject's record.
    AccessRequested {
        /// The identity whose record is being requested.
        subject: Address,
        /// The identity asking for access.
        counterparty: Address,
        /// When the request was accepted.
        timestamp: Timestamp,
    },

    /// The subject granted a counterparty access.
    ConsentGranted {
        /// The identity granting access to its own record.
        subject: Address,
        /// The identity receiving access.
        counterparty: Address,
        /// When the grant was accepted.
        timestamp: Timestamp,
    },

    /// The subject revoked a counterparty's access and cleared any pending
    /// request. Emitted even when nothing was previously granted.
    ConsentRevoked {
        /// The identity revoking access.
        subject: Address,
        /// The identity losing access.
        counterparty: Address,
        /// When the revocation was accepted.
        timestamp: Timestamp,
    },

    // =========================================================================
    // ROLE MANAGER
    // =========================================================================
    /// The owner enrolled a verifier. Emitted even when the verifier was
    /// already enrolled (idempotent success).
    VerifierAdded {
        /// The administrative owner performing the change.
        owner: Address,
        /// The verifier being enrolled.
        verifier: Address,
        /// When the change was accepted.
        timestamp: Timestamp,
    },

    /// The owner removed a verifier. Already-attested records keep their
    /// verified flag.
    VerifierRemoved {
        /// The administrative owner performing the change.
        owner: Address,
        /// The verifier being removed.
        verifier: Address,
        /// When the change was accepted.
        timestamp: Timestamp,
    },
}

impl RegistryEvent {
    /// Get the topic for this event (for feed filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Registered { .. } => EventTopic::Registration,
            Self::Verified { .. } => EventTopic::Attestation,
            Self::AccessRequested { .. }
            | Self::ConsentGranted { .. }
            | Self::ConsentRevoked { .. } => EventTopic::Consent,
            Self::VerifierAdded { .. } | Self::VerifierRemoved { .. } => EventTopic::Roles,
        }
    }

    /// The identity this event is primarily about.
    ///
    /// For role changes this is the verifier whose enrollment changed.
    #[must_use]
    pub fn subject(&self) -> Address {
        match self {
            Self::Registered { subject, .. }
            | Self::Verified { subject, .. }
            | Self::AccessRequested { subject, .. }
            | Self::ConsentGranted { subject, .. }
            | Self::ConsentRevoked { subject, .. } => *subject,
            Self::VerifierAdded { verifier, .. } | Self::VerifierRemoved { verifier, .. } => {
                *verifier
            }
        }
    }

    /// The second participant: the counterparty, verifier, or owner that
    /// took part in the transition.
    #[must_use]
    pub fn actor(&self) -> Address {
        match self {
            Self::Registered { subject, .. } => *subject,
            Self::Verified { verifier, .. } => *verifier,
            Self::AccessRequested { counterparty, .. }
            | Self::ConsentGranted { counterparty, .. }
            | Self::ConsentRevoked { counterparty, .. } => *counterparty,
            Self::VerifierAdded { owner, .. } | Self::VerifierRemoved { owner, .. } => *owner,
        }
    }

    /// When the transition was accepted.
    #[must_use]
    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Registered { timestamp, .. }
            | Self::Verified { timestamp, .. }
            | Self::AccessRequested { timestamp, .. }
            | Self::ConsentGranted { timestamp, .. }
            | Self::ConsentRevoked { timestamp, .. }
            | Self::VerifierAdded { timestamp, .. }
            | Self::VerifierRemoved { timestamp, .. } => *timestamp,
        }
    }

    /// Stable name of the event kind, for log lines and kind filters.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Registered { .. } => "registered",
            Self::Verified { .. } => "verified",
            Self::AccessRequested { .. } => "access_requested",
            Self::ConsentGranted { .. } => "consent_granted",
            Self::ConsentRevoked { .. } => "consent_revoked",
            Self::VerifierAdded { .. } => "verifier_added",
            Self::VerifierRemoved { .. } => "verifier_removed",
        }
    }

    /// Check whether an identity took part in this event on either side.
    #[must_use]
    pub fn involves(&self, identity: &Address) -> bool {
        self.subject() == *identity || self.actor() == *identity
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Record registrations.
    Registration,
    /// Verifier attestations.
    Attestation,
    /// Access requests, grants, and revocations.
    Consent,
    /// Verifier-set changes.
    Roles,
    /// All events (no filtering).
    All,
}
