//! # Registry Errors
//!
//! Every failure is local, synchronous, and non-retryable by the core: the
//! operation aborts with no partial mutation and no event. None of these
//! represent a fatal condition - they are expected outcomes of caller error
//! or natural state evolution (expiry). The boundary layer translates them
//! into user-facing responses.

use kyc_types::Address;
use thiserror::Error;

/// Rejection reasons for registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Role check failed: the caller may not perform this operation.
    #[error("Unauthorized caller: {caller:?}")]
    Unauthorized { caller: Address },

    /// No record exists for the referenced subject.
    #[error("No record found for subject: {subject:?}")]
    NotFound { subject: Address },

    /// A record exists but is past its validity window.
    #[error("Record expired for subject: {subject:?}")]
    Expired { subject: Address },

    /// The consent pair is not in a state that permits the transition
    /// (granting without a pending request).
    #[error("Invalid consent state for subject {subject:?} and counterparty {counterparty:?}")]
    InvalidState {
        subject: Address,
        counterparty: Address,
    },
}
