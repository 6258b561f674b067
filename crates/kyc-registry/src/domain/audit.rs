//! # Audit Trail
//!
//! Append-only log of every accepted mutation, in call order. The exposed
//! surface is `append` plus ordered reads - no in-place edits, no removal.
//! Current mutable state can always be reconciled against this trail, and
//! history that current state cannot express (revoked grants) survives here.

use kyc_types::{Address, RegistryEvent};
use serde::{Deserialize, Serialize};

/// An event plus its position in the trail.
///
/// Sequence numbers are dense, start at zero, and never repeat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequencedEvent {
    /// Position in the trail.
    pub sequence: u64,
    /// The recorded transition.
    pub event: RegistryEvent,
}

/// The append-only event trail.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AuditLog {
    events: Vec<SequencedEvent>,
}

impl AuditLog {
    /// Create an empty trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, returning its sequence number.
    pub fn append(&mut self, event: RegistryEvent) -> u64 {
        let sequence = self.events.len() as u64;
        self.events.push(SequencedEvent { sequence, event });
        sequence
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the trail is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Iterate the trail in order, starting at a sequence number.
    ///
    /// An offset past the end yields an empty iterator; replay consumers use
    /// this to resume from their last processed position.
    pub fn iter_from(&self, offset: u64) -> impl Iterator<Item = &SequencedEvent> {
        let start = usize::try_from(offset).unwrap_or(usize::MAX);
        self.events.get(start.min(self.events.len())..).into_iter().flatten()
    }

    /// Events of one kind, in order. Kind names are the stable strings from
    /// [`RegistryEvent::kind`].
    #[must_use]
    pub fn of_kind(&self, kind: &str) -> Vec<&SequencedEvent> {
        self.events
            .iter()
            .filter(|entry| entry.event.kind() == kind)
            .collect()
    }

    /// Events involving an identity on either side, in order.
    ///
    /// This is the scoped view a boundary layer serves to one account: a
    /// subject sees traffic about its record, a counterparty sees the
    /// requests and grants it took part in.
    #[must_use]
    pub fn involving(&self, identity: &Address) -> Vec<&SequencedEvent> {
        self.events
            .iter()
            .filter(|entry| entry.event.involves(identity))
            .collect()
    }
}
