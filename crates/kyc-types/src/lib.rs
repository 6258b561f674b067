//! # Shared Types Crate
//!
//! This crate contains the domain primitives and the event vocabulary shared
//! by every crate in the workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Opaque Identity**: An [`Address`] is an opaque 20-byte account
//!   identifier supplied by the boundary layer. The core never derives,
//!   interprets, or authenticates it.
//! - **One Event Vocabulary**: The audit trail and the live feed carry the
//!   same [`RegistryEvent`] values; downstream consumers never see two
//!   divergent encodings of the same transition.

pub mod entities;
pub mod events;

pub use entities::*;
pub use events::{EventTopic, RegistryEvent};
