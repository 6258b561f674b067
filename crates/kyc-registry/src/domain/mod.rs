//! Domain layer: the pure, synchronous state machine.
//!
//! No I/O, no async, no interior mutability. All mutation goes through
//! [`registry::Registry`], which composes the role, record, and consent
//! components and appends to the audit trail.

pub mod audit;
pub mod consent;
pub mod entities;
pub mod errors;
pub mod records;
pub mod registry;
pub mod roles;

pub use audit::{AuditLog, SequencedEvent};
pub use consent::ConsentLedger;
pub use entities::{ConsentPair, KycRecord};
pub use errors::RegistryError;
pub use records::RecordStore;
pub use registry::Registry;
pub use roles::RoleManager;
