//! # Event Filters
//!
//! Subscription-side filtering over the registry event vocabulary defined in
//! `kyc-types`.

use kyc_types::{Address, EventTopic, RegistryEvent};

/// Filter for subscribing to specific events.
///
/// An empty dimension means "no restriction on that dimension"; a filter
/// with both dimensions empty accepts everything.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Participant identities to include. Empty means all participants.
    /// An event matches when any listed identity appears on either side.
    pub participants: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            participants: Vec::new(),
        }
    }

    /// Create a filter for events involving any of the given identities.
    ///
    /// This is how a boundary layer scopes the feed to what one account is
    /// allowed to see: a subject watches its own consent traffic, a
    /// counterparty watches grants made to it.
    #[must_use]
    pub fn involving(participants: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            participants,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &RegistryEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let participant_match = self.participants.is_empty()
            || self.participants.iter().any(|p| event.involves(p));

        topic_match && participant_match
    }
}
