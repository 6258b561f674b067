//! # kyc-registry
//!
//! Access-control and consent state machine for a document-attestation
//! registry.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: authoritative current state of every
//!   record, role, and consent pair
//! - **Deterministic Gatekeeper**: decides, synchronously and auditable,
//!   whether a requested transition is allowed and what it changes
//! - **Event Source**: appends one event per accepted mutation to the audit
//!   trail and publishes the same event to the feed
//!
//! ## Control Flow
//!
//! ```text
//! caller identity + arguments
//!         │
//!         ▼
//! [Role Manager check] ──unauthorized──→ error, no state change, no event
//!         │
//!         ▼
//! [Record / Consent preconditions] ──not found / expired / invalid──→ error
//!         │
//!         ▼
//! [state mutation] → [audit append] → [feed publish]
//! ```
//!
//! ## Boundary Contract
//!
//! Caller identity is established by the boundary layer before any operation
//! here is invoked; the core only compares addresses. The core never fetches
//! documents, never encrypts payloads, and never authenticates end users.
//! The document-retrieval collaborator must treat a `false` result from
//! [`service::RegistryService::has_consent`] as an absolute denial.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{ConsentPair, KycRecord};

    // Domain components
    pub use crate::domain::audit::{AuditLog, SequencedEvent};
    pub use crate::domain::consent::ConsentLedger;
    pub use crate::domain::records::RecordStore;
    pub use crate::domain::registry::Registry;
    pub use crate::domain::roles::RoleManager;

    // Errors
    pub use crate::domain::errors::RegistryError;

    // Ports
    pub use crate::ports::clock::Clock;

    // Adapters
    pub use crate::adapters::clock::{ManualClock, SystemClock};

    // Service
    pub use crate::service::{RegistryService, ServiceStats};

    // Shared primitives
    pub use kyc_types::{
        Address, EventTopic, Hash, RegistryEvent, Timestamp, ValidityDays, NEVER_EXPIRES,
        SECONDS_PER_DAY,
    };
}

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
