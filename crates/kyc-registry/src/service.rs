//! # Registry Service
//!
//! Async façade over the domain state machine. One `tokio::sync::RwLock` is
//! the global serialization point: a mutating call holds the write guard for
//! precondition check, state mutation, audit append, and feed publish, so
//! subscribers observe events in exactly the order mutations were accepted.
//! Read-only queries take the read guard and copy the answer out.
//!
//! The service adds the operational shell around the pure domain: tracing,
//! acceptance/rejection counters, and the feed hookup.

use crate::domain::audit::SequencedEvent;
use crate::domain::entities::KycRecord;
use crate::domain::errors::RegistryError;
use crate::domain::registry::Registry;
use crate::ports::clock::Clock;
use kyc_bus::{EventFilter, EventPublisher, EventStream, InMemoryEventBus, Subscription};
use kyc_types::{address_to_hex, Address, Hash, RegistryEvent, ValidityDays};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Operation counters for the service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Mutations that passed their preconditions and committed.
    pub operations_accepted: u64,
    /// Mutations rejected by a precondition check.
    pub operations_rejected: u64,
    /// Events handed to the feed (one per accepted mutation).
    pub events_published: u64,
}

/// The registry behind its serialization point, wired to the event feed.
pub struct RegistryService {
    /// The domain state machine. All access goes through this lock.
    inner: Arc<RwLock<Registry>>,
    /// The event feed for downstream consumers.
    bus: Arc<InMemoryEventBus>,
    /// Operation counters.
    stats: Arc<RwLock<ServiceStats>>,
}

impl RegistryService {
    /// Create a service with its own feed.
    #[must_use]
    pub fn new(owner: Address, clock: Arc<dyn Clock>) -> Self {
        Self::with_bus(owner, clock, Arc::new(InMemoryEventBus::new()))
    }

    /// Create a service publishing to an existing feed.
    #[must_use]
    pub fn with_bus(owner: Address, clock: Arc<dyn Clock>, bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Registry::new(owner, clock))),
            bus,
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// The feed this service publishes to.
    #[must_use]
    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        self.bus.clone()
    }

    /// Subscribe to the feed.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Subscribe to the feed as a stream.
    #[must_use]
    pub fn event_stream(&self, filter: EventFilter) -> EventStream {
        self.bus.event_stream(filter)
    }

    /// Current operation counters.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    // Called with the registry write guard still held, so the publish order
    // matches the mutation order.
    async fn committed(&self, event: RegistryEvent) -> RegistryEvent {
        let receivers = self.bus.publish(event.clone()).await;
        {
            let mut stats = self.stats.write().await;
            stats.operations_accepted += 1;
            stats.events_published += 1;
        }
        debug!(kind = event.kind(), receivers, "Mutation committed");
        event
    }

    async fn rejected(&self, error: RegistryError) -> RegistryError {
        self.stats.write().await.operations_rejected += 1;
        warn!(error = %error, "Mutation rejected");
        error
    }

    // =========================================================================
    // MUTATING OPERATIONS
    // =========================================================================

    /// Register (or re-register) the caller's own record.
    #[instrument(skip_all, fields(subject = %address_to_hex(&subject)))]
    pub async fn register(
        &self,
        subject: Address,
        fingerprint: Hash,
        external_pointer: String,
        validity: ValidityDays,
    ) -> RegistryEvent {
        let mut registry = self.inner.write().await;
        let event = registry.register(subject, fingerprint, external_pointer, validity);
        self.committed(event).await
    }

    /// Attest a subject's record. Verifier only.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        subject = %address_to_hex(&subject),
    ))]
    pub async fn verify(
        &self,
        caller: Address,
        subject: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let mut registry = self.inner.write().await;
        match registry.verify(caller, subject) {
            Ok(event) => Ok(self.committed(event).await),
            Err(error) => Err(self.rejected(error).await),
        }
    }

    /// Enroll a verifier. Owner only.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        target = %address_to_hex(&target),
    ))]
    pub async fn add_verifier(
        &self,
        caller: Address,
        target: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let mut registry = self.inner.write().await;
        match registry.add_verifier(caller, target) {
            Ok(event) => Ok(self.committed(event).await),
            Err(error) => Err(self.rejected(error).await),
        }
    }

    /// Remove a verifier. Owner only.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        target = %address_to_hex(&target),
    ))]
    pub async fn remove_verifier(
        &self,
        caller: Address,
        target: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let mut registry = self.inner.write().await;
        match registry.remove_verifier(caller, target) {
            Ok(event) => Ok(self.committed(event).await),
            Err(error) => Err(self.rejected(error).await),
        }
    }

    /// A counterparty requests access to a subject's record.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        subject = %address_to_hex(&subject),
    ))]
    pub async fn request_access(
        &self,
        caller: Address,
        subject: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let mut registry = self.inner.write().await;
        match registry.request_access(caller, subject) {
            Ok(event) => Ok(self.committed(event).await),
            Err(error) => Err(self.rejected(error).await),
        }
    }

    /// The subject grants a counterparty access.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        counterparty = %address_to_hex(&counterparty),
    ))]
    pub async fn grant_consent(
        &self,
        caller: Address,
        counterparty: Address,
    ) -> Result<RegistryEvent, RegistryError> {
        let mut registry = self.inner.write().await;
        match registry.grant_consent(caller, counterparty) {
            Ok(event) => Ok(self.committed(event).await),
            Err(error) => Err(self.rejected(error).await),
        }
    }

    /// The subject revokes a counterparty's access. Always succeeds.
    #[instrument(skip_all, fields(
        caller = %address_to_hex(&caller),
        counterparty = %address_to_hex(&counterparty),
    ))]
    pub async fn revoke_consent(&self, caller: Address, counterparty: Address) -> RegistryEvent {
        let mut registry = self.inner.write().await;
        let event = registry.revoke_consent(caller, counterparty);
        self.committed(event).await
    }

    // =========================================================================
    // READ-ONLY QUERIES
    // =========================================================================

    /// Read a subject's record.
    pub async fn get_record(&self, subject: &Address) -> Result<KycRecord, RegistryError> {
        self.inner.read().await.get_record(subject)
    }

    /// Whether a subject's registration is unusable right now.
    pub async fn is_expired(&self, subject: &Address) -> bool {
        self.inner.read().await.is_expired(subject)
    }

    /// Effective, expiry-adjusted consent. A `false` result is an absolute
    /// denial for the document-retrieval collaborator.
    pub async fn has_consent(&self, subject: &Address, counterparty: &Address) -> bool {
        self.inner.read().await.has_consent(subject, counterparty)
    }

    /// Raw read of the pending flag.
    pub async fn has_pending_request(&self, subject: &Address, counterparty: &Address) -> bool {
        self.inner
            .read()
            .await
            .has_pending_request(subject, counterparty)
    }

    /// Pure query: is this identity an enrolled verifier?
    pub async fn is_verifier(&self, identity: &Address) -> bool {
        self.inner.read().await.is_verifier(identity)
    }

    /// The administrative owner.
    pub async fn owner(&self) -> Address {
        self.inner.read().await.owner()
    }

    /// Counterparties currently awaiting this subject's decision.
    pub async fn pending_requests_for(&self, subject: &Address) -> Vec<Address> {
        self.inner.read().await.pending_requests_for(subject)
    }

    /// Subjects whose effective consent reads true for this counterparty.
    pub async fn grants_held_by(&self, counterparty: &Address) -> Vec<Address> {
        self.inner.read().await.grants_held_by(counterparty)
    }

    // =========================================================================
    // AUDIT TRAIL
    // =========================================================================

    /// Number of recorded audit events.
    pub async fn audit_len(&self) -> usize {
        self.inner.read().await.audit().len()
    }

    /// Copy the audit trail from a sequence offset, for replay consumers
    /// catching up after feed lag.
    pub async fn audit_events_from(&self, offset: u64) -> Vec<SequencedEvent> {
        self.inner
            .read()
            .await
            .audit()
            .iter_from(offset)
            .cloned()
            .collect()
    }

    /// Copy the audit events involving one identity, for scoped views.
    pub async fn audit_events_involving(&self, identity: &Address) -> Vec<SequencedEvent> {
        self.inner
            .read()
            .await
            .audit()
            .involving(identity)
            .into_iter()
            .cloned()
            .collect()
    }
}
