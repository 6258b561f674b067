//! # KYC Bus - Event Feed for Registry Consumers
//!
//! The registry's sole notification mechanism: every accepted mutation is
//! published here, in call order, as a [`kyc_types::RegistryEvent`].
//!
//! ## Consumption Rules
//!
//! - **Feed, not storage**: the audit-log mirror and any notification layer
//!   learn of state changes by subscribing to this feed. They must not poll
//!   raw registry storage - the history of revoked grants only exists in the
//!   event sequence.
//! - **Ordered delivery**: subscribers observe events in the order the
//!   mutations were accepted.
//! - **Lag over backpressure**: a slow subscriber misses events rather than
//!   blocking the publisher; the durable trail inside the registry remains
//!   available for catch-up replay.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │   Registry   │                    │ Audit Mirror │
//! │   Service    │    publish()       │  / Notifier  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Feed  │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::EventFilter;
pub use kyc_types::{EventTopic, RegistryEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lag kicks in.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
