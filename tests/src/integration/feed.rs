//! # Event Feed & Audit Mirror Behavior
//!
//! Downstream consumers (audit mirror, notification layer) learn of state
//! changes only through the feed, and catch up through the trail. These
//! flows pin the ordering and replay contracts they rely on.

#[cfg(test)]
use super::support::{attested_setup, ALICE, BANK, FP, VERIFIER};
#[cfg(test)]
use kyc_bus::EventFilter;
#[cfg(test)]
use kyc_registry::prelude::*;
#[cfg(test)]
use tokio_stream::StreamExt;

#[tokio::test]
async fn test_feed_carries_the_whole_choreography_in_order() {
    let (service, _clock) = attested_setup().await;
    let mut sub = service.subscribe(EventFilter::all());

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.verify(VERIFIER, ALICE).await.expect("attest");
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");
    service.revoke_consent(ALICE, BANK).await;

    let mut kinds = Vec::new();
    for _ in 0..5 {
        kinds.push(sub.recv().await.expect("event").kind());
    }
    assert_eq!(
        kinds,
        vec![
            "registered",
            "verified",
            "access_requested",
            "consent_granted",
            "consent_revoked",
        ]
    );
}

#[tokio::test]
async fn test_topic_scoped_subscription() {
    let (service, _clock) = attested_setup().await;
    let mut consent_only = service.subscribe(EventFilter::topics(vec![EventTopic::Consent]));

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.verify(VERIFIER, ALICE).await.expect("attest");
    service.request_access(BANK, ALICE).await.expect("request");

    // Registration and attestation are filtered out.
    let first = consent_only.recv().await.expect("event");
    assert!(matches!(first, RegistryEvent::AccessRequested { .. }));
}

#[tokio::test]
async fn test_participant_scoped_subscription() {
    let (service, _clock) = attested_setup().await;
    let mut bank_view = service.subscribe(EventFilter::involving(vec![BANK]));

    // Alice's registration does not involve the bank.
    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");

    let first = bank_view.recv().await.expect("event");
    assert_eq!(first.kind(), "access_requested");
    assert!(first.involves(&BANK));
}

#[tokio::test]
async fn test_event_stream_combinators() {
    let (service, _clock) = attested_setup().await;
    let stream = service.event_stream(EventFilter::all());

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");

    let kinds: Vec<&'static str> = stream.take(2).map(|event| event.kind()).collect().await;
    assert_eq!(kinds, vec!["registered", "access_requested"]);
}

#[tokio::test]
async fn test_trail_replay_after_missed_feed_traffic() {
    let (service, _clock) = attested_setup().await;

    // No subscriber at all - the live copies are dropped.
    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.request_access(BANK, ALICE).await.expect("request");
    service.grant_consent(ALICE, BANK).await.expect("grant");
    service.revoke_consent(ALICE, BANK).await;

    // A late mirror reconstructs everything from the trail, including the
    // revoked grant that current state can no longer express.
    let trail = service.audit_events_from(0).await;
    assert_eq!(trail.len(), 5); // verifier enrollment + four mutations
    assert_eq!(trail[3].event.kind(), "consent_granted");
    assert_eq!(trail[4].event.kind(), "consent_revoked");
    assert!(!service.has_consent(&ALICE, &BANK).await);

    // Resume from a checkpoint.
    let tail = service.audit_events_from(4).await;
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].sequence, 4);
}

#[tokio::test]
async fn test_identity_scoped_audit_view() {
    let (service, _clock) = attested_setup().await;

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;
    service.verify(VERIFIER, ALICE).await.expect("attest");
    service.request_access(BANK, ALICE).await.expect("request");

    // The bank's scoped view holds only the traffic it took part in.
    let bank_view = service.audit_events_involving(&BANK).await;
    assert_eq!(bank_view.len(), 1);
    assert_eq!(bank_view[0].event.kind(), "access_requested");

    // The subject sees everything about its record.
    let alice_view = service.audit_events_involving(&ALICE).await;
    assert_eq!(alice_view.len(), 3);
}

#[tokio::test]
async fn test_feed_events_serialize_for_downstream_transport() -> anyhow::Result<()> {
    let (service, _clock) = attested_setup().await;
    let mut sub = service.subscribe(EventFilter::all());

    service
        .register(ALICE, FP, "ptr123".to_string(), ValidityDays(365))
        .await;

    let event = sub.recv().await.expect("event");
    let json = serde_json::to_string(&event)?;
    assert!(json.contains("Registered"));
    let back: RegistryEvent = serde_json::from_str(&json)?;
    assert_eq!(back, event);
    Ok(())
}
